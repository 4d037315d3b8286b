//! Value and percent conversion, clamping, stepping and display scaling.
//!
//! Positions are always linear over the raw value. The optional scale
//! function only changes the number shown in labels and value text; it never
//! feeds back into position mapping.

use crate::{config::SliderConfig, marks::MarkSet, prop::CallbackWith};

/// Values are rounded to this many parts per unit after stepping.
const PRECISION: f64 = 1000.0;

/// Rounds to three decimal places to absorb floating point drift.
pub fn round_precision(value: f64) -> f64 {
    (value * PRECISION).round() / PRECISION
}

/// Formats a number the way the default value text shows it: integers
/// without a fractional part, other values in shortest form.
pub fn format_number(value: f64) -> String {
    if value == 0.0 {
        // Avoid rendering negative zero as "-0".
        return "0".to_string();
    }
    format!("{value}")
}

/// Pure conversions between values and track percentages.
#[derive(Debug, Clone)]
pub struct ValueModel {
    min: f64,
    max: f64,
    step: Option<f64>,
    scale: Option<CallbackWith<f64, f64>>,
}

impl ValueModel {
    /// Builds the model for a validated configuration.
    pub fn new(config: &SliderConfig) -> Self {
        Self {
            min: config.min,
            max: config.max,
            step: config.step,
            scale: config.scale.clone(),
        }
    }

    /// Lower bound.
    pub fn min(&self) -> f64 {
        self.min
    }

    /// Upper bound.
    pub fn max(&self) -> f64 {
        self.max
    }

    /// Step size, `None` in marks-only mode.
    pub fn step(&self) -> Option<f64> {
        self.step
    }

    fn span(&self) -> f64 {
        self.max - self.min
    }

    /// Clamps a value into `[min, max]`.
    pub fn clamp(&self, value: f64) -> f64 {
        value.clamp(self.min, self.max)
    }

    /// Maps a value to its track position in `[0, 100]`.
    ///
    /// A zero-width span maps every value to 0.
    pub fn value_to_percent(&self, value: f64) -> f64 {
        let span = self.span();
        if span <= 0.0 {
            return 0.0;
        }
        ((value - self.min) / span * 100.0).clamp(0.0, 100.0)
    }

    /// Maps a track position back to a value.
    ///
    /// With a numeric step the result is the nearest multiple of `step`
    /// counted from `min`; in marks-only mode it is the nearest mark. The
    /// result is always inside `[min, max]`.
    pub fn percent_to_value(&self, percent: f64, marks: &MarkSet) -> f64 {
        let percent = if percent.is_nan() {
            0.0
        } else {
            percent.clamp(0.0, 100.0)
        };
        let raw = percent / 100.0 * self.span() + self.min;
        let value = match self.step {
            None => marks.snap_to_nearest(raw),
            Some(step) => self.snap_to_step(raw, step),
        };
        self.clamp(value)
    }

    /// Rounds to the nearest multiple of `step` from `min`.
    pub fn snap_to_step(&self, value: f64, step: f64) -> f64 {
        let steps = ((value - self.min) / step).round();
        round_precision(self.min + steps * step)
    }

    /// The number shown to users for a raw value.
    pub fn display_value(&self, value: f64) -> f64 {
        match &self.scale {
            Some(scale) => scale.call(value),
            None => value,
        }
    }
}
