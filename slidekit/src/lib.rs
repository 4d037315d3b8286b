//! A headless slider interaction engine.
//!
//! `slidekit` owns the behaviour of single value and range sliders (value
//! mapping, stepping, marks, drag and keyboard control, linked sliders and
//! accessibility) and leaves drawing to the host. The host feeds input in
//! track coordinates and receives a [`ViewState`] per coalesced frame.
//!
//! # Usage
//!
//! ```
//! use slidekit::{
//!     EventTarget, InputEvent, PointerPhase, Slider, SliderConfig, SliderData, SliderValue,
//!     ThumbIndex, TrackRect,
//! };
//!
//! let document = EventTarget::new();
//! let slider = Slider::new(
//!     SliderConfig::default().min_distance(10.0),
//!     SliderData::default().value((20.0, 80.0)).label("Price"),
//!     &document,
//! )
//! .expect("valid configuration");
//! slider.set_track_rect(TrackRect::new(0.0, 0.0, 200.0, 24.0));
//!
//! let now = slidekit::Instant::now();
//! let mut press = InputEvent::pointer(PointerPhase::Down, 1, 40.0, 12.0, now);
//! slider.pointer_down_on_thumb(ThumbIndex::Start, &mut press);
//! document.dispatch(&mut InputEvent::pointer(PointerPhase::Up, 1, 40.0, 12.0, now));
//!
//! assert_eq!(slider.get_value(), SliderValue::Range(20.0, 80.0));
//! assert_eq!(slider.view_state().thumbs[0].aria_label.as_deref(), Some("Price minimum"));
//! ```
//!
//! # Rendering
//!
//! Attach a [`FrameScheduler`] and a [`ViewSink`] with
//! [`Slider::attach_renderer`]. Commits only mark the slider dirty; the first
//! one of a batch asks the scheduler for a frame and [`Slider::run_frame`]
//! delivers a single view for the whole batch.
#![deny(missing_docs, clippy::unwrap_used)]

pub mod accessibility;
pub mod config;
pub mod drag;
pub mod error;
pub mod event_target;
pub mod keyboard;
pub mod linked;
pub mod marks;
pub mod prop;
pub mod range;
pub mod render_sync;
pub mod slider;
pub mod state;
pub mod value_model;

pub use accesskit;
#[cfg(not(target_family = "wasm"))]
pub use std::time::Instant;
#[cfg(target_family = "wasm")]
pub use web_time::Instant;
pub use winit;

pub use crate::{
    accessibility::{AccessibilityRequest, thumb_node},
    config::{
        MarkLabelDisplay, Orientation, SliderConfig, SliderData, SliderDirection, TrackDisplay,
        ValueLabelDisplay,
    },
    error::{ConfigError, SliderError},
    event_target::{EventTarget, InputEvent, InputSource, ListenerKey, PointerPhase, TrackRect},
    keyboard::{KeyInput, SliderKey},
    linked::LinkedSlider,
    marks::{Mark, Marks},
    prop::CallbackWith,
    render_sync::{FrameScheduler, Transition, ViewSink, ViewState},
    slider::{ChangeSource, Slider, SliderChange, SliderId},
    state::{SliderValue, ThumbIndex},
};
