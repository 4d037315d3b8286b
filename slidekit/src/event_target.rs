//! Shared, document-level event target for global drag listeners.
//!
//! ## Usage
//!
//! A host owns one [`EventTarget`] per window and forwards every global
//! pointer, mouse and touch event to [`EventTarget::dispatch`]. Each slider
//! registers its global move/release listeners once at construction and
//! removes exactly those listeners when it is destroyed.

use std::sync::{Arc, Weak};

use parking_lot::RwLock;
use slotmap::{SlotMap, new_key_type};
use smallvec::SmallVec;
use tracing::debug;

use crate::{Instant, prop::Slot};

new_key_type! {
    /// Generational key of one registered listener.
    pub struct ListenerKey;
}

/// Kinds of global events a slider listens for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GlobalEventKind {
    /// `pointermove`
    PointerMove,
    /// `pointerup`
    PointerUp,
    /// `mousemove`
    MouseMove,
    /// `mouseup`
    MouseUp,
    /// `touchmove`
    TouchMove,
    /// `touchend`
    TouchEnd,
}

impl GlobalEventKind {
    /// Every kind, in registration order.
    pub const ALL: [GlobalEventKind; 6] = [
        GlobalEventKind::PointerMove,
        GlobalEventKind::PointerUp,
        GlobalEventKind::MouseMove,
        GlobalEventKind::MouseUp,
        GlobalEventKind::TouchMove,
        GlobalEventKind::TouchEnd,
    ];
}

/// Input family an event came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum InputSource {
    /// Unified pointer events.
    Pointer,
    /// Legacy mouse events.
    Mouse,
    /// Legacy touch events.
    Touch,
}

/// Phase of an input event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerPhase {
    /// Press on a thumb or the track.
    Down,
    /// Movement.
    Move,
    /// Release.
    Up,
}

/// A positional input event in host coordinates.
#[derive(Debug, Clone, PartialEq)]
pub struct InputEvent {
    /// Input family.
    pub source: InputSource,
    /// Event phase.
    pub phase: PointerPhase,
    /// Horizontal client coordinate.
    pub x: f64,
    /// Vertical client coordinate.
    pub y: f64,
    /// Pointer id for pointer events, touch identifier for touch events.
    pub pointer_id: Option<u64>,
    /// When the event happened.
    pub timestamp: Instant,
    /// Whether the host can capture this pointer.
    pub capture_supported: bool,
    /// `false` for secondary mouse buttons, which never start a drag.
    pub primary_button: bool,
    handled: bool,
}

impl InputEvent {
    fn new(source: InputSource, phase: PointerPhase, x: f64, y: f64, timestamp: Instant) -> Self {
        Self {
            source,
            phase,
            x,
            y,
            pointer_id: None,
            timestamp,
            capture_supported: false,
            primary_button: true,
            handled: false,
        }
    }

    /// A pointer event with the given pointer id. Pointer events support
    /// capture.
    pub fn pointer(
        phase: PointerPhase,
        pointer_id: u64,
        x: f64,
        y: f64,
        timestamp: Instant,
    ) -> Self {
        Self {
            pointer_id: Some(pointer_id),
            capture_supported: true,
            ..Self::new(InputSource::Pointer, phase, x, y, timestamp)
        }
    }

    /// A legacy mouse event.
    pub fn mouse(phase: PointerPhase, x: f64, y: f64, timestamp: Instant) -> Self {
        Self::new(InputSource::Mouse, phase, x, y, timestamp)
    }

    /// A legacy touch event for the first changed touch.
    pub fn touch(phase: PointerPhase, identifier: u64, x: f64, y: f64, timestamp: Instant) -> Self {
        Self {
            pointer_id: Some(identifier),
            ..Self::new(InputSource::Touch, phase, x, y, timestamp)
        }
    }

    /// Whether a listener already consumed the event.
    pub fn is_handled(&self) -> bool {
        self.handled
    }

    /// Marks the event as consumed.
    pub fn mark_handled(&mut self) {
        self.handled = true;
    }

    /// The global event kind for move and release events.
    pub fn kind(&self) -> Option<GlobalEventKind> {
        use GlobalEventKind as K;
        Some(match (self.source, self.phase) {
            (_, PointerPhase::Down) => return None,
            (InputSource::Pointer, PointerPhase::Move) => K::PointerMove,
            (InputSource::Pointer, PointerPhase::Up) => K::PointerUp,
            (InputSource::Mouse, PointerPhase::Move) => K::MouseMove,
            (InputSource::Mouse, PointerPhase::Up) => K::MouseUp,
            (InputSource::Touch, PointerPhase::Move) => K::TouchMove,
            (InputSource::Touch, PointerPhase::Up) => K::TouchEnd,
        })
    }
}

/// The track's bounding rectangle in the same coordinate space as
/// [`InputEvent`].
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TrackRect {
    /// Left edge.
    pub left: f64,
    /// Top edge.
    pub top: f64,
    /// Width.
    pub width: f64,
    /// Height.
    pub height: f64,
}

impl TrackRect {
    /// Creates a rectangle.
    pub fn new(left: f64, top: f64, width: f64, height: f64) -> Self {
        Self {
            left,
            top,
            width,
            height,
        }
    }
}

type Handler = dyn Fn(&mut InputEvent) + Send + Sync;

struct ListenerEntry {
    kind: GlobalEventKind,
    seq: u64,
    handler: Slot<Handler>,
}

#[derive(Default)]
struct Listeners {
    entries: SlotMap<ListenerKey, ListenerEntry>,
    next_seq: u64,
}

/// A document-like dispatcher for global events.
#[derive(Default)]
pub struct EventTarget {
    listeners: RwLock<Listeners>,
}

impl EventTarget {
    /// Creates an empty target.
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    /// Registers a listener and returns its key.
    pub fn add_listener<F>(&self, kind: GlobalEventKind, handler: F) -> ListenerKey
    where
        F: Fn(&mut InputEvent) + Send + Sync + 'static,
    {
        let mut listeners = self.listeners.write();
        let seq = listeners.next_seq;
        listeners.next_seq += 1;
        listeners.entries.insert(ListenerEntry {
            kind,
            seq,
            handler: Slot::from_shared(Arc::new(handler)),
        })
    }

    /// Removes a listener. Returns `false` for unknown or stale keys.
    pub fn remove_listener(&self, key: ListenerKey) -> bool {
        self.listeners.write().entries.remove(key).is_some()
    }

    /// Number of registered listeners.
    pub fn listener_count(&self) -> usize {
        self.listeners.read().entries.len()
    }

    /// Delivers an event to every listener of its kind, in registration
    /// order. Returns how many listeners ran.
    ///
    /// Handlers are snapshotted first, so they may add or remove listeners
    /// while the event is being delivered.
    pub fn dispatch(&self, event: &mut InputEvent) -> usize {
        let Some(kind) = event.kind() else {
            return 0;
        };
        let mut handlers: SmallVec<[(u64, Slot<Handler>); 8]> = self
            .listeners
            .read()
            .entries
            .values()
            .filter(|entry| entry.kind == kind)
            .map(|entry| (entry.seq, entry.handler.clone()))
            .collect();
        handlers.sort_by_key(|(seq, _)| *seq);
        for (_, handler) in &handlers {
            (handler.get())(event);
        }
        handlers.len()
    }
}

/// The global listeners owned by one slider.
///
/// Removing the registration, explicitly or on drop, removes exactly the
/// listeners it recorded.
pub struct ListenerRegistration {
    target: Weak<EventTarget>,
    keys: SmallVec<[ListenerKey; 6]>,
}

impl ListenerRegistration {
    pub(crate) fn new(target: &Arc<EventTarget>) -> Self {
        Self {
            target: Arc::downgrade(target),
            keys: SmallVec::new(),
        }
    }

    pub(crate) fn push(&mut self, key: ListenerKey) {
        self.keys.push(key);
    }

    /// Removes every recorded listener. Idempotent.
    pub fn release(&mut self) {
        if self.keys.is_empty() {
            return;
        }
        let Some(target) = self.target.upgrade() else {
            self.keys.clear();
            return;
        };
        let removed = self
            .keys
            .drain(..)
            .filter(|key| target.remove_listener(*key))
            .count();
        debug!(removed, "released global slider listeners");
    }
}

impl Drop for ListenerRegistration {
    fn drop(&mut self) {
        self.release();
    }
}
