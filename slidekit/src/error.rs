//! Error types for slider construction and cross-slider propagation.

use thiserror::Error;

/// A slider configuration rejected by [`crate::SliderConfig::validate`].
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    /// `min` or `max` is NaN or infinite.
    #[error("slider bounds must be finite (min = {min}, max = {max})")]
    NonFiniteBound {
        /// Configured lower bound.
        min: f64,
        /// Configured upper bound.
        max: f64,
    },
    /// `min` is greater than `max`.
    #[error("slider min {min} exceeds max {max}")]
    MinExceedsMax {
        /// Configured lower bound.
        min: f64,
        /// Configured upper bound.
        max: f64,
    },
    /// `step` is zero, negative or not finite.
    #[error("step must be a positive finite number, got {0}")]
    InvalidStep(f64),
    /// `shift_step` is zero, negative or not finite.
    #[error("shift step must be a positive finite number, got {0}")]
    InvalidShiftStep(f64),
    /// `min_distance` is negative or not finite.
    #[error("minimum distance must be a non-negative finite number, got {0}")]
    InvalidMinDistance(f64),
    /// `min_distance` cannot be satisfied inside `[min, max]`.
    #[error("minimum distance {min_distance} exceeds the slider span {span}")]
    MinDistanceExceedsSpan {
        /// Configured minimum distance.
        min_distance: f64,
        /// `max - min`.
        span: f64,
    },
    /// An explicit mark lies outside `[min, max]`.
    #[error("mark {value} lies outside [{min}, {max}]")]
    MarkOutOfRange {
        /// The offending mark value.
        value: f64,
        /// Configured lower bound.
        min: f64,
        /// Configured upper bound.
        max: f64,
    },
}

/// Errors produced by the slider engine.
///
/// Only construction surfaces these to callers. Input and mutation entry
/// points clamp or log instead of failing.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SliderError {
    /// The configuration failed validation.
    #[error("invalid slider configuration: {0}")]
    Config(#[from] ConfigError),
    /// The slider was torn down with [`crate::Slider::destroy`].
    #[error("slider has been destroyed")]
    Destroyed,
    /// A linked slider's weak reference no longer points at a live slider.
    #[error("linked slider is no longer alive")]
    LinkTargetGone,
}
