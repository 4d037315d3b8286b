//! View state derivation and frame coalescing.
//!
//! The engine never draws. Every commit marks the slider dirty; the first
//! dirty mark of a batch asks the host's [`FrameScheduler`] for a frame, and
//! the frame callback builds one [`ViewState`] from the current state and
//! hands it to the host's [`ViewSink`].

use std::{sync::Arc, time::Duration};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::{
    Instant,
    config::{
        MarkLabelDisplay, Orientation, SliderConfig, SliderData, TrackDisplay, ValueLabelDisplay,
    },
    marks::{MarkSet, is_mark_active},
    slider::SliderId,
    state::{SliderState, SliderValue, ThumbIndex},
    value_model::{ValueModel, format_number},
};

/// Extra time past the transition length before an animated frame is
/// considered finished.
pub const ANIMATION_GRACE: Duration = Duration::from_millis(50);

/// Host hook that schedules a frame callback, such as
/// `requestAnimationFrame` or a winit redraw request.
pub trait FrameScheduler: Send + Sync {
    /// Requests one call of [`crate::Slider::run_frame`] for `slider`.
    fn request_frame(&self, slider: SliderId);
}

/// Host renderer receiving view states.
pub trait ViewSink: Send + Sync {
    /// Whether the rendered elements still exist. Frames for an unmounted
    /// sink are dropped.
    fn is_mounted(&self) -> bool {
        true
    }

    /// Applies a view state.
    fn apply(&self, view: &ViewState);
}

/// How position changes should be transitioned.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Transition {
    /// Leave the renderer's default transition in place.
    #[default]
    Default,
    /// Jump without a transition.
    Suppressed,
    /// Ease over the given duration.
    Animated(Duration),
}

/// Tooltip of one thumb.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct TooltipView {
    /// Formatted display value.
    pub text: String,
    /// Whether the tooltip is shown.
    pub visible: bool,
}

/// Render data of one thumb.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ThumbView {
    /// Which thumb.
    pub index: ThumbIndex,
    /// Position along the track in `[0, 100]`.
    pub percent: f64,
    /// Raw value (`aria-valuenow`).
    pub value_now: f64,
    /// `aria-valuemin`.
    pub value_min: f64,
    /// `aria-valuemax`.
    pub value_max: f64,
    /// `aria-valuetext`.
    pub value_text: String,
    /// `aria-label`.
    pub aria_label: Option<String>,
    /// Tooltip, absent when the tooltip policy is off.
    pub tooltip: Option<TooltipView>,
    /// Being dragged.
    pub active: bool,
    /// Under the pointer.
    pub hovered: bool,
    /// Has keyboard focus.
    pub focused: bool,
    /// `tabindex`: -1 while disabled.
    pub tab_index: i32,
}

/// The filled part of the track, in percent.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct FillSegment {
    /// Offset from the track start.
    pub start: f64,
    /// Length.
    pub size: f64,
}

/// Render data of one mark.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct MarkView {
    /// Mark value.
    pub value: f64,
    /// Position along the track.
    pub percent: f64,
    /// Label, if labels are shown.
    pub label: Option<String>,
    /// Covered by the current value.
    pub active: bool,
}

/// Availability of the increment and decrement buttons.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct StepperView {
    /// The decrement button can act.
    pub can_decrease: bool,
    /// The increment button can act.
    pub can_increase: bool,
}

/// Everything a renderer needs to draw one slider.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ViewState {
    /// Slider the view belongs to.
    pub slider: SliderId,
    /// Committed value.
    pub value: SliderValue,
    /// Track axis.
    pub orientation: Orientation,
    /// Interaction disabled.
    pub disabled: bool,
    /// A drag is in progress.
    pub dragging: bool,
    /// Numeric step, `None` in marks-only mode.
    pub step: Option<f64>,
    /// One entry per thumb, in index order.
    pub thumbs: SmallVec<[ThumbView; 2]>,
    /// Filled segment, `None` when the track fill is hidden.
    pub fill: Option<FillSegment>,
    /// Marks in ascending order.
    pub marks: Vec<MarkView>,
    /// Transition for this frame.
    pub transition: Transition,
    /// Pointer the host should capture.
    pub pointer_capture: Option<u64>,
    /// Direction title.
    pub title: Option<String>,
    /// Stepper buttons, when shown.
    pub steppers: Option<StepperView>,
}

/// Borrowed slider parts a view is derived from.
pub(crate) struct ViewInputs<'a> {
    pub(crate) id: SliderId,
    pub(crate) config: &'a SliderConfig,
    pub(crate) data: &'a SliderData,
    pub(crate) model: &'a ValueModel,
    pub(crate) marks: &'a MarkSet,
    pub(crate) state: &'a SliderState,
}

impl ViewInputs<'_> {
    fn formatted(&self, raw: f64) -> String {
        let display = self.model.display_value(raw);
        match &self.config.value_label_format {
            Some(format) => format.call(display),
            None => format_number(display),
        }
    }

    fn value_text(&self, raw: f64, thumb: ThumbIndex) -> String {
        match &self.data.aria_value_text {
            Some(text) => text.call((raw, thumb)),
            None => self.formatted(raw),
        }
    }

    fn aria_label(&self, thumb: ThumbIndex) -> Option<String> {
        if let Some(label) = &self.data.aria_label {
            return Some(label.call(thumb));
        }
        let label = self.data.label.as_ref()?;
        if !self.state.value.is_range() {
            return Some(label.clone());
        }
        Some(match thumb {
            ThumbIndex::Start => format!("{label} minimum"),
            ThumbIndex::End => format!("{label} maximum"),
        })
    }

    fn thumb(&self, thumb: ThumbIndex, raw: f64) -> ThumbView {
        let state = self.state;
        let dragged = state.drag.active_thumb() == Some(thumb);
        let hovered = state.hovered_thumb == Some(thumb);
        let tooltip = match self.config.value_label_display {
            ValueLabelDisplay::Off => None,
            policy => Some(TooltipView {
                text: self.formatted(raw),
                visible: policy == ValueLabelDisplay::On || dragged || hovered,
            }),
        };
        ThumbView {
            index: thumb,
            percent: self.model.value_to_percent(raw),
            value_now: raw,
            value_min: self.model.min(),
            value_max: self.model.max(),
            value_text: self.value_text(raw, thumb),
            aria_label: self.aria_label(thumb),
            tooltip,
            active: dragged,
            hovered,
            focused: state.focused_thumb == Some(thumb),
            tab_index: if state.disabled { -1 } else { 0 },
        }
    }

    fn fill(&self) -> Option<FillSegment> {
        let percent = |raw| self.model.value_to_percent(raw);
        match (self.config.track, self.state.value) {
            (TrackDisplay::Hidden, _) => None,
            (_, SliderValue::Range(lower, upper)) => {
                let start = percent(lower);
                Some(FillSegment {
                    start,
                    size: percent(upper) - start,
                })
            }
            (TrackDisplay::Normal, SliderValue::Single(value)) => Some(FillSegment {
                start: 0.0,
                size: percent(value),
            }),
            (TrackDisplay::Inverted, SliderValue::Single(value)) => {
                let start = percent(value);
                Some(FillSegment {
                    start,
                    size: 100.0 - start,
                })
            }
        }
    }

    fn steppers(&self) -> Option<StepperView> {
        if !self.config.show_steppers {
            return None;
        }
        let current = self.state.value.get(self.state.target_thumb());
        let enabled = !self.state.disabled;
        Some(StepperView {
            can_decrease: enabled && current > self.model.min(),
            can_increase: enabled && current < self.model.max(),
        })
    }
}

/// Derives the view of one slider.
pub(crate) fn build_view(inputs: &ViewInputs<'_>, transition: Transition) -> ViewState {
    let state = inputs.state;
    let show_labels = inputs.config.mark_label_display == MarkLabelDisplay::On;
    let marks = inputs
        .marks
        .iter()
        .map(|mark| MarkView {
            value: mark.value,
            percent: inputs.model.value_to_percent(mark.value),
            label: mark.label.clone().filter(|_| show_labels),
            active: is_mark_active(mark.value, state.value),
        })
        .collect();

    ViewState {
        slider: inputs.id,
        value: state.value,
        orientation: inputs.config.orientation,
        disabled: state.disabled,
        dragging: state.is_dragging(),
        step: inputs.model.step(),
        thumbs: state
            .value
            .thumbs()
            .into_iter()
            .map(|(thumb, raw)| inputs.thumb(thumb, raw))
            .collect(),
        fill: inputs.fill(),
        marks,
        transition,
        pointer_capture: state.drag.captured_pointer(),
        title: inputs.config.resolved_title(),
        steppers: inputs.steppers(),
    }
}

/// Kind of the frame waiting to run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum PendingFrame {
    Animated,
    Immediate,
    /// State-only change (hover, focus, drag flags); keeps the current
    /// transition.
    Redraw,
    Settle,
}

/// Per-slider frame coalescing and animation bookkeeping.
///
/// Nothing is marked pending while no scheduler is attached; attaching
/// always starts a fresh batch.
#[derive(Default)]
pub(crate) struct RenderSync {
    scheduler: Option<Arc<dyn FrameScheduler>>,
    sink: Option<Arc<dyn ViewSink>>,
    pending: Option<PendingFrame>,
    current: Transition,
    settle_at: Option<Instant>,
}

impl RenderSync {
    /// Connects a renderer and queues the initial frame. Returns the
    /// scheduler to notify.
    pub(crate) fn attach(
        &mut self,
        scheduler: Arc<dyn FrameScheduler>,
        sink: Arc<dyn ViewSink>,
    ) -> Option<Arc<dyn FrameScheduler>> {
        self.scheduler = Some(scheduler);
        self.sink = Some(sink);
        self.pending = None;
        self.current = Transition::Default;
        self.settle_at = None;
        self.schedule(PendingFrame::Redraw)
    }

    pub(crate) fn detach(&mut self) {
        self.scheduler = None;
        self.sink = None;
        self.pending = None;
        self.settle_at = None;
    }

    pub(crate) fn has_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// Marks the slider dirty after a commit. Returns the scheduler to
    /// notify when this is the first request of a batch.
    ///
    /// Within a batch the latest commit decides whether the frame animates.
    pub(crate) fn request(&mut self, animated: bool) -> Option<Arc<dyn FrameScheduler>> {
        self.schedule(if animated {
            PendingFrame::Animated
        } else {
            PendingFrame::Immediate
        })
    }

    /// Marks the slider dirty for a change that moves no thumb. A pending
    /// commit frame is left as is.
    pub(crate) fn request_redraw(&mut self) -> Option<Arc<dyn FrameScheduler>> {
        if self.pending.is_some() {
            return None;
        }
        self.schedule(PendingFrame::Redraw)
    }

    fn schedule(&mut self, frame: PendingFrame) -> Option<Arc<dyn FrameScheduler>> {
        let scheduler = self.scheduler.clone()?;
        let first = self.pending.replace(frame).is_none();
        first.then_some(scheduler)
    }

    /// Takes the pending frame and returns its transition together with the
    /// attached sink. Whether the sink is mounted is left to the caller.
    pub(crate) fn begin_frame(
        &mut self,
        now: Instant,
        duration: Duration,
    ) -> Option<(Transition, Option<Arc<dyn ViewSink>>)> {
        let transition = match self.pending.take()? {
            PendingFrame::Animated => {
                self.settle_at = Some(now + duration + ANIMATION_GRACE);
                Transition::Animated(duration)
            }
            PendingFrame::Immediate => {
                self.settle_at = None;
                Transition::Suppressed
            }
            PendingFrame::Redraw => self.current,
            PendingFrame::Settle => Transition::Default,
        };
        self.current = transition;
        Some((transition, self.sink.clone()))
    }

    /// Queues a settle frame once a running transition has timed out.
    pub(crate) fn settle_due(&mut self, now: Instant) -> Option<Arc<dyn FrameScheduler>> {
        let deadline = self.settle_at?;
        if now < deadline {
            return None;
        }
        self.settle_at = None;
        match self.pending {
            None => self.schedule(PendingFrame::Settle),
            Some(PendingFrame::Redraw) => {
                self.pending = Some(PendingFrame::Settle);
                None
            }
            Some(_) => None,
        }
    }

    pub(crate) fn is_animating(&self) -> bool {
        self.settle_at.is_some()
    }
}
