//! The slider handle and its commit path.
//!
//! ## Usage
//!
//! ```
//! use slidekit::{EventTarget, Slider, SliderChange, SliderConfig, SliderData, SliderValue};
//!
//! let document = EventTarget::new();
//! let slider = Slider::new(SliderConfig::default(), SliderData::default().value(20.0), &document)
//!     .expect("valid configuration");
//! slider.on_change(|change: SliderChange| println!("{:?}", change.value));
//! slider.set_value(40.0, false);
//! assert_eq!(slider.get_value(), SliderValue::Single(40.0));
//! ```
//!
//! Every input path (drag, track click, keyboard, wheel, steppers,
//! accessibility actions, programmatic and linked updates) ends in one
//! commit: clamp, solve range constraints, write state, propagate to linked
//! sliders, request a frame, notify listeners.

use std::sync::{
    Arc, Weak,
    atomic::{AtomicBool, AtomicU64, Ordering},
};

use accesskit::{Action, ActionData};
use closure::closure;
use parking_lot::RwLock;
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
use tracing::{debug, trace, warn};

use crate::{
    Instant,
    accessibility::AccessibilityRequest,
    config::{SliderConfig, SliderData},
    drag::track_percent,
    error::SliderError,
    event_target::{
        EventTarget, GlobalEventKind, InputEvent, ListenerRegistration, PointerPhase, TrackRect,
    },
    keyboard::{KeyInput, KeyboardController},
    linked::{self, LinkedSlider, linked_value},
    marks::MarkSet,
    prop::CallbackWith,
    range::RangeConstraints,
    render_sync::{
        FrameScheduler, RenderSync, Transition, ViewInputs, ViewSink, ViewState, build_view,
    },
    state::{SliderState, SliderValue, ThumbIndex},
    value_model::ValueModel,
};

static NEXT_SLIDER_ID: AtomicU64 = AtomicU64::new(1);

/// Process-unique identity of a slider instance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct SliderId(u64);

impl SliderId {
    fn next() -> Self {
        Self(NEXT_SLIDER_ID.fetch_add(1, Ordering::Relaxed))
    }

    /// The raw id.
    pub fn get(self) -> u64 {
        self.0
    }

    #[cfg(test)]
    pub(crate) fn from_raw(raw: u64) -> Self {
        Self(raw)
    }
}

/// What caused a commit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChangeSource {
    /// Thumb drag.
    Drag,
    /// Press on the track.
    TrackClick,
    /// Key press on a thumb.
    Keyboard,
    /// Wheel over a focused thumb.
    Wheel,
    /// Increment or decrement button.
    Stepper,
    /// Assistive technology request.
    Accessibility,
    /// [`Slider::set_value`].
    Programmatic,
    /// A linked slider's commit.
    Linked,
}

/// Payload delivered to change listeners.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SliderChange {
    /// The fully resolved value.
    pub value: SliderValue,
    /// Thumb that received the commit.
    pub thumb: ThumbIndex,
    /// What caused it.
    pub source: ChangeSource,
}

struct Inner {
    config: SliderConfig,
    data: SliderData,
    model: ValueModel,
    marks: MarkSet,
    constraints: RangeConstraints,
    keyboard: KeyboardController,
    state: SliderState,
    track: Option<TrackRect>,
    listeners: Vec<CallbackWith<SliderChange>>,
    render: RenderSync,
    registration: ListenerRegistration,
}

impl Inner {
    /// Maps a requested thumb onto the thumbs this slider has.
    fn thumb(&self, thumb: ThumbIndex) -> ThumbIndex {
        if self.state.value.is_range() {
            thumb
        } else {
            ThumbIndex::Start
        }
    }

    fn resolve(&self, candidate: f64, thumb: ThumbIndex) -> (SliderValue, ThumbIndex) {
        match self.state.value {
            SliderValue::Single(_) => (
                SliderValue::Single(self.model.clamp(candidate)),
                ThumbIndex::Start,
            ),
            SliderValue::Range(lower, upper) => {
                let resolution = self.constraints.resolve(candidate, thumb, (lower, upper));
                let (lower, upper) = resolution.value;
                (SliderValue::Range(lower, upper), resolution.active)
            }
        }
    }

    fn position_value(&self, event: &InputEvent) -> Option<f64> {
        let track = self.track.as_ref()?;
        let percent = track_percent(track, event.x, event.y, self.config.orientation)?;
        Some(self.model.percent_to_value(percent, &self.marks))
    }

    fn view_inputs(&self, id: SliderId) -> ViewInputs<'_> {
        ViewInputs {
            id,
            config: &self.config,
            data: &self.data,
            model: &self.model,
            marks: &self.marks,
            state: &self.state,
        }
    }
}

pub(crate) struct SliderShared {
    id: SliderId,
    propagating: AtomicBool,
    inner: RwLock<Inner>,
}

/// A slider instance.
///
/// `Slider` is a cheap handle; clones refer to the same instance. The
/// instance, and with it its global listeners, goes away when the last handle
/// is dropped or [`Slider::destroy`] is called.
#[derive(Clone)]
pub struct Slider {
    shared: Arc<SliderShared>,
}

impl std::fmt::Debug for Slider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Slider")
            .field("id", &self.shared.id)
            .field("value", &self.get_value())
            .finish_non_exhaustive()
    }
}

impl PartialEq for Slider {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.shared, &other.shared)
    }
}

impl Slider {
    /// Validates `config` and creates a slider whose global move and release
    /// listeners live on `event_target`.
    pub fn new(
        config: SliderConfig,
        data: SliderData,
        event_target: &Arc<EventTarget>,
    ) -> Result<Self, SliderError> {
        config.validate()?;

        let constraints = RangeConstraints::new(&config);
        let value = match data.initial_value(&config) {
            SliderValue::Range(first, second) => {
                let (lower, upper) = constraints.normalize(first, second);
                SliderValue::Range(lower, upper)
            }
            single => single,
        };
        let model = ValueModel::new(&config);
        let marks = MarkSet::resolve(&config.marks, config.min, config.max, config.step);
        let keyboard = KeyboardController::new(&config);
        let state = SliderState::new(value, config.disabled);
        let id = SliderId::next();

        let shared = Arc::new_cyclic(|weak: &Weak<SliderShared>| {
            let mut registration = ListenerRegistration::new(event_target);
            for kind in GlobalEventKind::ALL {
                let key = event_target.add_listener(
                    kind,
                    closure!(clone weak, |event: &mut InputEvent| {
                        if let Some(shared) = weak.upgrade() {
                            Slider::from_shared(shared).route_global(event);
                        }
                    }),
                );
                registration.push(key);
            }
            SliderShared {
                id,
                propagating: AtomicBool::new(false),
                inner: RwLock::new(Inner {
                    config,
                    data,
                    model,
                    marks,
                    constraints,
                    keyboard,
                    state,
                    track: None,
                    listeners: Vec::new(),
                    render: RenderSync::default(),
                    registration,
                }),
            }
        });
        debug!(slider = ?id, ?value, "slider created");
        Ok(Self { shared })
    }

    pub(crate) fn from_shared(shared: Arc<SliderShared>) -> Self {
        Self { shared }
    }

    pub(crate) fn downgrade(&self) -> Weak<SliderShared> {
        Arc::downgrade(&self.shared)
    }

    /// Instance identity.
    pub fn id(&self) -> SliderId {
        self.shared.id
    }

    /// Current value.
    pub fn get_value(&self) -> SliderValue {
        self.shared.inner.read().state.value
    }

    /// Configured `(min, max)`.
    pub fn bounds(&self) -> (f64, f64) {
        let inner = self.shared.inner.read();
        (inner.model.min(), inner.model.max())
    }

    /// Whether a drag is in progress.
    pub fn is_dragging(&self) -> bool {
        self.shared.inner.read().state.is_dragging()
    }

    /// Whether a throttled drag move is waiting for [`Slider::tick`] or the
    /// release.
    pub fn has_pending_move(&self) -> bool {
        self.shared.inner.read().state.has_pending_update()
    }

    /// Whether [`Slider::destroy`] has run.
    pub fn is_destroyed(&self) -> bool {
        self.shared.inner.read().state.destroyed
    }

    /// Whether an animated frame's transition is still considered running.
    pub fn is_animating(&self) -> bool {
        self.shared.inner.read().render.is_animating()
    }

    /// Whether a frame has been requested and not run yet.
    pub fn has_pending_frame(&self) -> bool {
        self.shared.inner.read().render.has_pending()
    }

    /// Sets the value programmatically.
    ///
    /// A tuple on a range slider replaces both ends. A value of the other
    /// mode is accepted with a warning: a single value moves the lower thumb
    /// of a range slider, and a range on a single slider uses its lower end.
    pub fn set_value(&self, value: impl Into<SliderValue>, animate: bool) {
        let value = value.into();
        let is_range = self.shared.inner.read().state.value.is_range();
        match (is_range, value) {
            (false, SliderValue::Single(value)) => {
                self.update_value(value, ThumbIndex::Start, animate, ChangeSource::Programmatic);
            }
            (true, SliderValue::Range(first, second)) => {
                if first.is_nan() || second.is_nan() {
                    trace!(slider = ?self.id(), "ignoring NaN range");
                    return;
                }
                self.commit(animate, ChangeSource::Programmatic, |inner| {
                    let (lower, upper) = inner.constraints.normalize(first, second);
                    Some((SliderValue::Range(lower, upper), inner.state.active_thumb))
                });
            }
            (true, SliderValue::Single(value)) => {
                warn!(
                    slider = ?self.id(),
                    value,
                    "single value set on a range slider; moving the lower thumb"
                );
                self.update_value(value, ThumbIndex::Start, animate, ChangeSource::Programmatic);
            }
            (false, SliderValue::Range(lower, upper)) => {
                warn!(
                    slider = ?self.id(),
                    lower,
                    upper,
                    "range set on a single slider; using the lower end"
                );
                self.update_value(lower, ThumbIndex::Start, animate, ChangeSource::Programmatic);
            }
        }
    }

    /// Enables or disables interaction. Disabling ends a drag in progress.
    pub fn set_disabled(&self, disabled: bool) {
        let (pending, scheduler) = {
            let mut inner = self.shared.inner.write();
            if inner.state.destroyed {
                warn!(slider = ?self.id(), "set_disabled on a destroyed slider");
                return;
            }
            inner.state.disabled = disabled;
            inner.config.disabled = disabled;
            let thumb = inner.state.drag.active_thumb();
            let pending = if disabled {
                inner.state.hovered_thumb = None;
                inner.state.drag.end().zip(thumb)
            } else {
                None
            };
            (pending, inner.render.request_redraw())
        };
        self.notify_scheduler(scheduler);
        if let Some((value, thumb)) = pending {
            self.update_value(value, thumb, false, ChangeSource::Drag);
        }
    }

    /// Registers a change listener. The returned handle identifies this
    /// registration for [`Slider::remove_on_change`].
    pub fn on_change(
        &self,
        listener: impl Into<CallbackWith<SliderChange>>,
    ) -> CallbackWith<SliderChange> {
        let listener = listener.into();
        let mut inner = self.shared.inner.write();
        if inner.state.destroyed {
            warn!(slider = ?self.id(), "on_change on a destroyed slider");
        } else {
            inner.listeners.push(listener.clone());
        }
        listener
    }

    /// Removes one registration of `listener`. Other listeners, including
    /// ones wrapping an identical closure, are kept.
    pub fn remove_on_change(&self, listener: &CallbackWith<SliderChange>) -> bool {
        let mut inner = self.shared.inner.write();
        match inner.listeners.iter().position(|registered| registered == listener) {
            Some(index) => {
                inner.listeners.remove(index);
                true
            }
            None => false,
        }
    }

    /// Adds a link to another slider after construction, which is how two
    /// sliders can drive each other.
    pub fn link(&self, link: LinkedSlider) {
        let mut inner = self.shared.inner.write();
        if inner.state.destroyed {
            warn!(slider = ?self.id(), "link on a destroyed slider");
            return;
        }
        inner.config.linked_sliders.push(link);
    }

    /// Tears the slider down: ends any drag, removes its global listeners and
    /// change listeners and detaches the renderer. Idempotent.
    pub fn destroy(&self) {
        let mut inner = self.shared.inner.write();
        if inner.state.destroyed {
            return;
        }
        inner.state.destroyed = true;
        inner.state.drag.end();
        inner.registration.release();
        inner.listeners.clear();
        inner.config.linked_sliders.clear();
        inner.render.detach();
        debug!(slider = ?self.id(), "slider destroyed");
    }

    /// Sets the track rectangle used to map pointer coordinates.
    pub fn set_track_rect(&self, rect: TrackRect) {
        self.shared.inner.write().track = Some(rect);
    }

    /// Connects a renderer and schedules the initial frame.
    pub fn attach_renderer(&self, scheduler: Arc<dyn FrameScheduler>, sink: Arc<dyn ViewSink>) {
        let scheduler = {
            let mut inner = self.shared.inner.write();
            if inner.state.destroyed {
                warn!(slider = ?self.id(), "attach_renderer on a destroyed slider");
                return;
            }
            inner.render.attach(scheduler, sink)
        };
        self.notify_scheduler(scheduler);
    }

    /// Disconnects the renderer. Later frames are no-ops.
    pub fn detach_renderer(&self) {
        self.shared.inner.write().render.detach();
    }

    /// Starts dragging `thumb` from a press at `event`.
    ///
    /// Returns `false` when the press is ignored: the slider is disabled or
    /// destroyed, a drag is already running, the event was handled by
    /// another input family or is not a primary button press.
    pub fn pointer_down_on_thumb(&self, thumb: ThumbIndex, event: &mut InputEvent) -> bool {
        let (commit, scheduler) = {
            let mut inner = self.shared.inner.write();
            if inner.state.destroyed || inner.state.disabled {
                return false;
            }
            if event.is_handled() || !event.primary_button || inner.state.is_dragging() {
                trace!(slider = ?self.id(), source = ?event.source, "press ignored");
                return false;
            }
            event.mark_handled();
            let thumb = inner.thumb(thumb);
            inner.state.drag.start(thumb, event);
            inner.state.active_thumb = thumb;
            inner.state.focused_thumb = Some(thumb);
            debug!(slider = ?self.id(), ?thumb, source = ?event.source, "drag started");
            let commit = inner
                .position_value(event)
                .and_then(|value| inner.state.drag.gate(value, event.timestamp));
            let scheduler = if commit.is_none() {
                inner.render.request_redraw()
            } else {
                None
            };
            (commit.map(|value| (value, thumb)), scheduler)
        };
        self.notify_scheduler(scheduler);
        if let Some((value, thumb)) = commit {
            self.update_value(value, thumb, false, ChangeSource::Drag);
        }
        true
    }

    /// Handles a press on the track outside the thumbs.
    ///
    /// The value under the pointer is committed with animation. On a range
    /// slider the closer thumb moves; see [`RangeConstraints::pick_track_thumb`].
    pub fn click_track(&self, event: &mut InputEvent) -> bool {
        let target = {
            let inner = self.shared.inner.read();
            if inner.state.destroyed || inner.state.disabled || inner.state.is_dragging() {
                return false;
            }
            if event.is_handled() || !event.primary_button {
                return false;
            }
            let Some(value) = inner.position_value(event) else {
                return false;
            };
            let thumb = match inner.state.value {
                SliderValue::Single(_) => ThumbIndex::Start,
                SliderValue::Range(lower, upper) => {
                    inner.constraints.pick_track_thumb(value, (lower, upper))
                }
            };
            (value, thumb)
        };
        event.mark_handled();
        self.update_value(target.0, target.1, true, ChangeSource::TrackClick)
    }

    /// Handles a key press on `thumb`. Returns whether the value changed.
    pub fn key_down(&self, thumb: ThumbIndex, input: KeyInput) -> bool {
        let target = {
            let inner = self.shared.inner.read();
            if inner.state.destroyed || inner.state.disabled {
                return false;
            }
            let thumb = inner.thumb(thumb);
            let current = inner.state.value.get(thumb);
            match inner.keyboard.target(input, current, &inner.marks) {
                Some(value) => (value, thumb),
                None => {
                    trace!(slider = ?self.id(), key = ?input.key, "key ignored");
                    return false;
                }
            }
        };
        self.update_value(target.0, target.1, true, ChangeSource::Keyboard)
    }

    /// Handles a wheel over `thumb`. Only a focused thumb reacts; scrolling
    /// down (`delta_y > 0`) decreases the value by one step.
    pub fn wheel(&self, thumb: ThumbIndex, delta_y: f64) -> bool {
        let steps = match delta_y {
            delta if delta > 0.0 => -1,
            delta if delta < 0.0 => 1,
            _ => return false,
        };
        let target = {
            let inner = self.shared.inner.read();
            if inner.state.destroyed || inner.state.disabled {
                return false;
            }
            let thumb = inner.thumb(thumb);
            if inner.state.focused_thumb != Some(thumb) {
                return false;
            }
            let current = inner.state.value.get(thumb);
            match inner.keyboard.step_from(current, steps, &inner.marks) {
                Some(value) => (value, thumb),
                None => return false,
            }
        };
        self.update_value(target.0, target.1, false, ChangeSource::Wheel)
    }

    /// Stepper button press: moves the focused thumb, else the last active
    /// one, by `steps` steps.
    pub fn step_by(&self, steps: i32) -> bool {
        let target = {
            let inner = self.shared.inner.read();
            if inner.state.destroyed || inner.state.disabled {
                return false;
            }
            let thumb = inner.state.target_thumb();
            let current = inner.state.value.get(thumb);
            match inner.keyboard.step_from(current, steps, &inner.marks) {
                Some(value) => (value, thumb),
                None => return false,
            }
        };
        self.update_value(target.0, target.1, false, ChangeSource::Stepper)
    }

    /// Applies an AccessKit action aimed at `thumb`.
    pub fn accessibility_action(
        &self,
        thumb: ThumbIndex,
        action: Action,
        data: Option<&ActionData>,
    ) -> bool {
        let Some(request) = AccessibilityRequest::from_action(action, data) else {
            return false;
        };
        let target = {
            let inner = self.shared.inner.read();
            if inner.state.destroyed || inner.state.disabled {
                return false;
            }
            let thumb = inner.thumb(thumb);
            let value = match request {
                AccessibilityRequest::Step(steps) => {
                    let current = inner.state.value.get(thumb);
                    match inner.keyboard.step_from(current, steps, &inner.marks) {
                        Some(value) => value,
                        None => return false,
                    }
                }
                AccessibilityRequest::SetValue(value) => value,
            };
            (value, thumb)
        };
        self.update_value(target.0, target.1, true, ChangeSource::Accessibility)
    }

    /// Sets or clears the hovered thumb. Ignored while dragging.
    pub fn set_hovered_thumb(&self, thumb: Option<ThumbIndex>) {
        let scheduler = {
            let mut inner = self.shared.inner.write();
            if inner.state.destroyed || inner.state.is_dragging() {
                return;
            }
            let thumb = thumb.map(|thumb| inner.thumb(thumb));
            if inner.state.hovered_thumb == thumb {
                return;
            }
            inner.state.hovered_thumb = thumb;
            inner.render.request_redraw()
        };
        self.notify_scheduler(scheduler);
    }

    /// Sets or clears the focused thumb.
    pub fn set_focused_thumb(&self, thumb: Option<ThumbIndex>) {
        let scheduler = {
            let mut inner = self.shared.inner.write();
            if inner.state.destroyed {
                return;
            }
            let thumb = thumb.map(|thumb| inner.thumb(thumb));
            if inner.state.focused_thumb == thumb {
                return;
            }
            inner.state.focused_thumb = thumb;
            inner.render.request_redraw()
        };
        self.notify_scheduler(scheduler);
    }

    /// Timer callback: flushes a throttled drag move once its window has
    /// passed and schedules the settle frame after an animation times out.
    pub fn tick(&self, now: Instant) {
        self.flush_due_move(now);
        let scheduler = {
            let mut inner = self.shared.inner.write();
            if inner.state.destroyed {
                return;
            }
            inner.render.settle_due(now)
        };
        self.notify_scheduler(scheduler);
    }

    /// Frame callback: builds the view and hands it to the renderer.
    ///
    /// A throttled drag move whose window has passed is committed first, and
    /// one still inside its window asks for the next frame, so a host that
    /// only drives frames never strands a move.
    ///
    /// Returns `true` when a view was delivered. Without a pending frame, or
    /// when the renderer is missing or unmounted, this is a no-op.
    #[tracing::instrument(level = "trace", skip(self), fields(slider = self.shared.id.0))]
    pub fn run_frame(&self, now: Instant) -> bool {
        self.flush_due_move(now);
        let (view, sink, scheduler) = {
            let mut inner = self.shared.inner.write();
            if inner.state.destroyed {
                return false;
            }
            let duration = inner.config.animation_duration;
            let Some((transition, sink)) = inner.render.begin_frame(now, duration) else {
                return false;
            };
            let scheduler = if inner.state.drag.has_pending() {
                inner.render.request_redraw()
            } else {
                None
            };
            let view = build_view(&inner.view_inputs(self.id()), transition);
            (view, sink, scheduler)
        };
        self.notify_scheduler(scheduler);
        let Some(sink) = sink.filter(|sink| sink.is_mounted()) else {
            trace!("renderer unavailable, frame dropped");
            return false;
        };
        sink.apply(&view);
        true
    }

    /// The current view, without consuming a pending frame.
    pub fn view_state(&self) -> ViewState {
        let inner = self.shared.inner.read();
        build_view(&inner.view_inputs(self.id()), Transition::Default)
    }

    /// Commits `candidate` for `thumb`. Returns `false` when nothing was
    /// committed (destroyed slider or NaN candidate).
    pub(crate) fn update_value(
        &self,
        candidate: f64,
        thumb: ThumbIndex,
        animate: bool,
        source: ChangeSource,
    ) -> bool {
        if candidate.is_nan() {
            trace!(slider = ?self.id(), "ignoring NaN candidate");
            return false;
        }
        self.commit(animate, source, |inner| Some(inner.resolve(candidate, inner.thumb(thumb))))
    }

    pub(crate) fn receive_linked(
        &self,
        primary: f64,
        ratio: f64,
        invert: bool,
        animate: bool,
    ) -> Result<(), SliderError> {
        if self.shared.propagating.load(Ordering::SeqCst) {
            trace!(slider = ?self.id(), "link cycle reached a propagating slider");
            return Ok(());
        }
        let (min, max) = {
            let inner = self.shared.inner.read();
            if inner.state.destroyed {
                return Err(SliderError::Destroyed);
            }
            (inner.model.min(), inner.model.max())
        };
        let value = linked_value(primary, ratio, invert, min, max);
        self.update_value(value, ThumbIndex::Start, animate, ChangeSource::Linked);
        Ok(())
    }

    #[tracing::instrument(level = "trace", skip(self, resolve), fields(slider = self.shared.id.0))]
    fn commit<F>(&self, animate: bool, source: ChangeSource, resolve: F) -> bool
    where
        F: FnOnce(&Inner) -> Option<(SliderValue, ThumbIndex)>,
    {
        let id = self.id();
        let (change, animated, links, scheduler, listeners) = {
            let mut inner = self.shared.inner.write();
            if inner.state.destroyed {
                warn!(slider = ?id, ?source, "ignoring commit on a destroyed slider");
                return false;
            }
            let Some((value, thumb)) = resolve(&*inner) else {
                return false;
            };
            inner.state.value = value;
            inner.state.active_thumb = thumb;
            let animated = animate && inner.config.animate_on_set && !inner.state.is_dragging();
            let scheduler = inner.render.request(animated);
            let change = SliderChange { value, thumb, source };
            (
                change,
                animated,
                inner.config.linked_sliders.clone(),
                scheduler,
                inner.listeners.clone(),
            )
        };

        if !links.is_empty() && !self.shared.propagating.swap(true, Ordering::SeqCst) {
            linked::propagate(id, &links, change.value.primary(), animated);
            self.shared.propagating.store(false, Ordering::SeqCst);
        }
        self.notify_scheduler(scheduler);
        for listener in &listeners {
            listener.call(change);
        }
        true
    }

    /// Single routing point for global move and release events.
    fn route_global(&self, event: &mut InputEvent) {
        let id = self.id();
        let (commit, scheduler) = {
            let mut inner = self.shared.inner.write();
            if inner.state.destroyed || !inner.state.drag.accepts(event) {
                return;
            }
            let Some(thumb) = inner.state.drag.active_thumb() else {
                return;
            };
            event.mark_handled();
            match event.phase {
                PointerPhase::Down => (None, None),
                PointerPhase::Move => {
                    let value = inner.position_value(event);
                    let gated =
                        value.and_then(|value| inner.state.drag.gate(value, event.timestamp));
                    match gated {
                        Some(value) => (Some((value, thumb)), None),
                        None => {
                            trace!(slider = ?id, "drag move throttled");
                            (None, inner.render.request_redraw())
                        }
                    }
                }
                PointerPhase::Up => {
                    debug!(slider = ?id, ?thumb, "drag ended");
                    match inner.state.drag.end() {
                        Some(value) => (Some((value, thumb)), None),
                        // Nothing left to commit; redraw to drop the drag flags.
                        None => (None, inner.render.request_redraw()),
                    }
                }
            }
        };
        self.notify_scheduler(scheduler);
        if let Some((value, thumb)) = commit {
            self.update_value(value, thumb, false, ChangeSource::Drag);
        }
    }

    fn flush_due_move(&self, now: Instant) {
        let flush = {
            let mut inner = self.shared.inner.write();
            if inner.state.destroyed {
                return;
            }
            let thumb = inner.state.drag.active_thumb();
            inner.state.drag.flush_due(now).zip(thumb)
        };
        if let Some((value, thumb)) = flush {
            trace!(slider = ?self.id(), value, "flushing throttled move");
            self.update_value(value, thumb, false, ChangeSource::Drag);
        }
    }

    fn notify_scheduler(&self, scheduler: Option<Arc<dyn FrameScheduler>>) {
        if let Some(scheduler) = scheduler {
            scheduler.request_frame(self.id());
        }
    }
}
