//! Drag lifecycle, input family arbitration and move throttling.

use std::time::Duration;

use crate::{
    Instant,
    config::Orientation,
    event_target::{InputEvent, InputSource, TrackRect},
    state::ThumbIndex,
};

/// Minimum time between two committed drag moves (about 120 per second).
pub const THROTTLE_WINDOW: Duration = Duration::from_millis(8);

/// Drag state of one slider.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DragPhase {
    /// No drag in progress.
    #[default]
    Idle,
    /// A thumb is being dragged.
    Dragging {
        /// The dragged thumb.
        thumb: ThumbIndex,
        /// Input family that owns the drag.
        source: InputSource,
        /// Pointer or touch id that started the drag.
        pointer_id: Option<u64>,
    },
}

/// Tracks one drag gesture and gates its moves.
///
/// Moves that arrive inside [`THROTTLE_WINDOW`] of the last commit are kept
/// as a pending value (latest wins) and released by [`Self::flush_due`] or
/// [`Self::end`]; they are never dropped.
#[derive(Debug, Default)]
pub struct DragController {
    phase: DragPhase,
    capture: Option<u64>,
    last_commit: Option<Instant>,
    pending: Option<f64>,
}

impl DragController {
    /// Enters the dragging state for `thumb`, owned by the family of `event`.
    pub fn start(&mut self, thumb: ThumbIndex, event: &InputEvent) {
        self.phase = DragPhase::Dragging {
            thumb,
            source: event.source,
            pointer_id: event.pointer_id,
        };
        self.capture = event.pointer_id.filter(|_| event.capture_supported);
        self.last_commit = None;
        self.pending = None;
    }

    /// Current phase.
    pub fn phase(&self) -> DragPhase {
        self.phase
    }

    /// Whether a drag is in progress.
    pub fn is_dragging(&self) -> bool {
        matches!(self.phase, DragPhase::Dragging { .. })
    }

    /// The dragged thumb.
    pub fn active_thumb(&self) -> Option<ThumbIndex> {
        match self.phase {
            DragPhase::Dragging { thumb, .. } => Some(thumb),
            DragPhase::Idle => None,
        }
    }

    /// Whether a throttled move is waiting to be committed.
    pub fn has_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// Pointer id the host should capture while dragging.
    pub fn captured_pointer(&self) -> Option<u64> {
        self.capture
    }

    /// Decides whether this drag consumes a global event.
    ///
    /// Handled events, events from another input family than the one that
    /// started the drag, and events from other pointers are rejected.
    pub fn accepts(&self, event: &InputEvent) -> bool {
        if event.is_handled() {
            return false;
        }
        match self.phase {
            DragPhase::Idle => false,
            DragPhase::Dragging {
                source, pointer_id, ..
            } => {
                if event.source != source {
                    return false;
                }
                match (source, pointer_id, event.pointer_id) {
                    (InputSource::Mouse, ..) => true,
                    (_, Some(owner), Some(id)) => owner == id,
                    _ => true,
                }
            }
        }
    }

    /// Passes a move through the throttle. Returns the value to commit now,
    /// or `None` when it was stored as pending.
    pub fn gate(&mut self, value: f64, now: Instant) -> Option<f64> {
        let open = self
            .last_commit
            .is_none_or(|last| now.saturating_duration_since(last) >= THROTTLE_WINDOW);
        if open {
            self.last_commit = Some(now);
            self.pending = None;
            Some(value)
        } else {
            self.pending = Some(value);
            None
        }
    }

    /// Releases the pending move once the throttle window has elapsed.
    pub fn flush_due(&mut self, now: Instant) -> Option<f64> {
        let last = self.last_commit?;
        if now.saturating_duration_since(last) < THROTTLE_WINDOW {
            return None;
        }
        let value = self.pending.take()?;
        self.last_commit = Some(now);
        Some(value)
    }

    /// Leaves the dragging state and returns the pending move, if any.
    pub fn end(&mut self) -> Option<f64> {
        self.phase = DragPhase::Idle;
        self.capture = None;
        self.last_commit = None;
        self.pending.take()
    }
}

/// Position of a point along the track in percent.
///
/// Vertical tracks grow upwards, so the top edge maps to 100. Returns `None`
/// for a track without extent.
pub fn track_percent(rect: &TrackRect, x: f64, y: f64, orientation: Orientation) -> Option<f64> {
    let fraction = match orientation {
        Orientation::Horizontal => {
            if rect.width <= 0.0 {
                return None;
            }
            (x - rect.left) / rect.width
        }
        Orientation::Vertical => {
            if rect.height <= 0.0 {
                return None;
            }
            1.0 - (y - rect.top) / rect.height
        }
    };
    Some((fraction * 100.0).clamp(0.0, 100.0))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::event_target::PointerPhase;

    fn down(now: Instant) -> InputEvent {
        InputEvent::pointer(PointerPhase::Down, 7, 0.0, 0.0, now)
    }

    #[test]
    fn start_records_thumb_and_capture() {
        let now = Instant::now();
        let mut drag = DragController::default();
        drag.start(ThumbIndex::End, &down(now));
        assert!(drag.is_dragging());
        assert_eq!(drag.active_thumb(), Some(ThumbIndex::End));
        assert_eq!(drag.captured_pointer(), Some(7));

        drag.end();
        assert_eq!(drag.phase(), DragPhase::Idle);
        assert_eq!(drag.captured_pointer(), None);
    }

    #[test]
    fn mouse_drag_requests_no_capture() {
        let mut drag = DragController::default();
        drag.start(
            ThumbIndex::Start,
            &InputEvent::mouse(PointerPhase::Down, 0.0, 0.0, Instant::now()),
        );
        assert_eq!(drag.captured_pointer(), None);
    }

    #[test]
    fn throttle_stores_latest_pending_move() {
        let start = Instant::now();
        let mut drag = DragController::default();
        drag.start(ThumbIndex::Start, &down(start));

        assert_eq!(drag.gate(10.0, start), Some(10.0));
        assert_eq!(drag.gate(11.0, start + Duration::from_millis(2)), None);
        assert_eq!(drag.gate(12.0, start + Duration::from_millis(4)), None);
        assert!(drag.has_pending());

        assert_eq!(drag.flush_due(start + Duration::from_millis(5)), None);
        assert_eq!(drag.flush_due(start + Duration::from_millis(9)), Some(12.0));
        assert!(!drag.has_pending());
        assert_eq!(drag.flush_due(start + Duration::from_millis(30)), None);
    }

    #[test]
    fn end_returns_pending_move() {
        let start = Instant::now();
        let mut drag = DragController::default();
        drag.start(ThumbIndex::Start, &down(start));
        drag.gate(10.0, start);
        drag.gate(20.0, start + Duration::from_millis(1));
        assert_eq!(drag.end(), Some(20.0));
        assert_eq!(drag.end(), None);
    }

    #[test]
    fn arbitration_follows_owner() {
        let now = Instant::now();
        let mut drag = DragController::default();
        let pointer_move = InputEvent::pointer(PointerPhase::Move, 7, 1.0, 0.0, now);
        assert!(!drag.accepts(&pointer_move));

        drag.start(ThumbIndex::Start, &down(now));
        assert!(drag.accepts(&pointer_move));
        assert!(!drag.accepts(&InputEvent::mouse(PointerPhase::Move, 1.0, 0.0, now)));
        assert!(!drag.accepts(&InputEvent::touch(PointerPhase::Move, 7, 1.0, 0.0, now)));
        assert!(!drag.accepts(&InputEvent::pointer(PointerPhase::Move, 8, 1.0, 0.0, now)));

        let mut handled = pointer_move.clone();
        handled.mark_handled();
        assert!(!drag.accepts(&handled));
    }

    #[test]
    fn horizontal_track_percent() {
        let rect = TrackRect::new(100.0, 0.0, 200.0, 10.0);
        assert_eq!(track_percent(&rect, 246.0, 5.0, Orientation::Horizontal), Some(73.0));
        assert_eq!(track_percent(&rect, 0.0, 5.0, Orientation::Horizontal), Some(0.0));
        assert_eq!(track_percent(&rect, 900.0, 5.0, Orientation::Horizontal), Some(100.0));
    }

    #[test]
    fn vertical_track_grows_upwards() {
        let rect = TrackRect::new(0.0, 0.0, 10.0, 200.0);
        assert_eq!(track_percent(&rect, 5.0, 0.0, Orientation::Vertical), Some(100.0));
        assert_eq!(track_percent(&rect, 5.0, 150.0, Orientation::Vertical), Some(25.0));
        assert_eq!(track_percent(&rect, 5.0, 200.0, Orientation::Vertical), Some(0.0));
    }

    #[test]
    fn empty_track_has_no_position() {
        let rect = TrackRect::default();
        assert_eq!(track_percent(&rect, 1.0, 1.0, Orientation::Horizontal), None);
    }
}
