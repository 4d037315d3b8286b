//! Slider configuration and per-instance data.
//!
//! ## Usage
//!
//! Build a [`SliderConfig`] with its setters, then hand it to
//! [`crate::Slider::new`] together with a [`SliderData`]. The configuration is
//! validated once at construction and treated as immutable afterwards.

use std::time::Duration;

use derive_setters::Setters;
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::{
    error::ConfigError,
    linked::LinkedSlider,
    marks::{Mark, Marks},
    prop::CallbackWith,
    state::{SliderValue, ThumbIndex},
};

const DEFAULT_MIN: f64 = 0.0;
const DEFAULT_MAX: f64 = 100.0;
const DEFAULT_STEP: f64 = 1.0;
const DEFAULT_SHIFT_STEP: f64 = 10.0;
const DEFAULT_ANIMATION: Duration = Duration::from_millis(300);

/// Track axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Orientation {
    /// Values grow to the right.
    #[default]
    Horizontal,
    /// Values grow upwards.
    Vertical,
}

/// When the value tooltip above a thumb is shown.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum ValueLabelDisplay {
    /// Never.
    Off,
    /// While that thumb is dragged or hovered.
    #[default]
    Auto,
    /// Always.
    On,
}

/// How the filled part of the track is drawn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum TrackDisplay {
    /// Filled from the start of the track up to the value.
    #[default]
    Normal,
    /// Filled from the value to the end of the track.
    Inverted,
    /// No fill.
    Hidden,
}

/// Whether mark labels are shown.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum MarkLabelDisplay {
    /// Labels are shown.
    #[default]
    On,
    /// Labels are hidden.
    Off,
}

/// Reading direction used to title the slider.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum SliderDirection {
    /// Left to right.
    Ltr,
    /// Right to left.
    Rtl,
    /// Top to down.
    Ttd,
    /// Down to top.
    Dtt,
}

/// Configuration of one slider, already merged by the host framework.
#[derive(Clone, Setters)]
pub struct SliderConfig {
    /// Lower bound.
    pub min: f64,
    /// Upper bound.
    pub max: f64,
    /// Step size. `None` restricts values to the marks.
    pub step: Option<f64>,
    /// Step used while Shift is held. Falls back to `step`, then 10.
    #[setters(strip_option)]
    pub shift_step: Option<f64>,
    /// Disable interaction.
    pub disabled: bool,
    /// Track axis.
    pub orientation: Orientation,
    /// Tooltip policy.
    pub value_label_display: ValueLabelDisplay,
    /// Mark source.
    pub marks: Marks,
    /// Mark label policy.
    pub mark_label_display: MarkLabelDisplay,
    /// Fill policy.
    pub track: TrackDisplay,
    /// Minimum gap between the two thumbs of a range slider.
    #[setters(strip_option)]
    pub min_distance: Option<f64>,
    /// Keep the closest-thumb assignment on track clicks instead of handing
    /// the click to the thumb on the clicked side.
    pub disable_swap: bool,
    /// Display-only scale applied to label values.
    #[setters(skip)]
    pub scale: Option<CallbackWith<f64, f64>>,
    /// Tooltip and value text formatter.
    #[setters(skip)]
    pub value_label_format: Option<CallbackWith<f64, String>>,
    /// Animate programmatic and click commits.
    pub animate_on_set: bool,
    /// Transition length for animated commits.
    pub animation_duration: Duration,
    /// Show increment and decrement buttons.
    pub show_steppers: bool,
    /// Show a direction title.
    pub show_title: bool,
    /// Title text; generated from orientation and direction when absent.
    #[setters(strip_option, into)]
    pub title: Option<String>,
    /// Direction the generated title describes.
    #[setters(strip_option)]
    pub direction: Option<SliderDirection>,
    /// Sliders driven by this slider's committed value.
    #[setters(skip)]
    pub linked_sliders: Vec<LinkedSlider>,
}

impl SliderConfig {
    /// Sets the display scale.
    pub fn scale<F>(mut self, scale: F) -> Self
    where
        F: Fn(f64) -> f64 + Send + Sync + 'static,
    {
        self.scale = Some(CallbackWith::new(scale));
        self
    }

    /// Sets the tooltip and value text formatter.
    pub fn value_label_format<F>(mut self, format: F) -> Self
    where
        F: Fn(f64) -> String + Send + Sync + 'static,
    {
        self.value_label_format = Some(CallbackWith::new(format));
        self
    }

    /// Restricts values to explicit marks.
    pub fn marks_only(mut self, marks: Vec<Mark>) -> Self {
        self.step = None;
        self.marks = Marks::Custom(marks);
        self
    }

    /// Adds a linked slider.
    pub fn linked_slider(mut self, link: LinkedSlider) -> Self {
        self.linked_sliders.push(link);
        self
    }

    /// Step used with Shift held.
    pub fn effective_shift_step(&self) -> f64 {
        self.shift_step.or(self.step).unwrap_or(DEFAULT_SHIFT_STEP)
    }

    /// Checks the configuration.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let (min, max) = (self.min, self.max);
        if !min.is_finite() || !max.is_finite() {
            return Err(ConfigError::NonFiniteBound { min, max });
        }
        if min > max {
            return Err(ConfigError::MinExceedsMax { min, max });
        }
        if let Some(step) = self.step
            && !(step.is_finite() && step > 0.0)
        {
            return Err(ConfigError::InvalidStep(step));
        }
        if let Some(shift_step) = self.shift_step
            && !(shift_step.is_finite() && shift_step > 0.0)
        {
            return Err(ConfigError::InvalidShiftStep(shift_step));
        }
        if let Some(min_distance) = self.min_distance {
            if !(min_distance.is_finite() && min_distance >= 0.0) {
                return Err(ConfigError::InvalidMinDistance(min_distance));
            }
            if min_distance > max - min {
                return Err(ConfigError::MinDistanceExceedsSpan {
                    min_distance,
                    span: max - min,
                });
            }
        }
        if let Marks::Custom(marks) = &self.marks
            && let Some(mark) = marks
                .iter()
                .find(|mark| !(mark.value >= min && mark.value <= max))
        {
            return Err(ConfigError::MarkOutOfRange {
                value: mark.value,
                min,
                max,
            });
        }
        Ok(())
    }

    /// Title shown when `show_title` is set.
    pub fn resolved_title(&self) -> Option<String> {
        if !self.show_title {
            return None;
        }
        if let Some(title) = &self.title {
            return Some(title.clone());
        }
        let generated = match (self.orientation, self.direction) {
            (Orientation::Vertical, Some(SliderDirection::Dtt)) => "Down",
            (Orientation::Vertical, _) => "Up",
            (Orientation::Horizontal, Some(SliderDirection::Rtl)) => "Right",
            (Orientation::Horizontal, _) => "Left",
        };
        Some(generated.to_string())
    }
}

impl Default for SliderConfig {
    fn default() -> Self {
        Self {
            min: DEFAULT_MIN,
            max: DEFAULT_MAX,
            step: Some(DEFAULT_STEP),
            shift_step: None,
            disabled: false,
            orientation: Orientation::default(),
            value_label_display: ValueLabelDisplay::default(),
            marks: Marks::default(),
            mark_label_display: MarkLabelDisplay::default(),
            track: TrackDisplay::default(),
            min_distance: None,
            disable_swap: false,
            scale: None,
            value_label_format: None,
            animate_on_set: true,
            animation_duration: DEFAULT_ANIMATION,
            show_steppers: false,
            show_title: false,
            title: None,
            direction: None,
            linked_sliders: Vec::new(),
        }
    }
}

/// Per-instance data: the initial value and accessible naming.
#[derive(Clone, Default, Setters)]
pub struct SliderData {
    /// Initial value. Defaults to `min`, or `(min, max)` when the config
    /// asks for a range through `min_distance`.
    #[setters(strip_option, into)]
    pub value: Option<SliderValue>,
    /// Visible label, also used to derive accessible names.
    #[setters(strip_option, into)]
    pub label: Option<String>,
    /// Accessible name per thumb.
    #[setters(skip)]
    pub aria_label: Option<CallbackWith<ThumbIndex, String>>,
    /// Accessible value text per thumb value.
    #[setters(skip)]
    pub aria_value_text: Option<CallbackWith<(f64, ThumbIndex), String>>,
}

impl SliderData {
    /// Sets the accessible name provider.
    pub fn aria_label<F>(mut self, label: F) -> Self
    where
        F: Fn(ThumbIndex) -> String + Send + Sync + 'static,
    {
        self.aria_label = Some(CallbackWith::new(label));
        self
    }

    /// Sets the accessible value text provider.
    pub fn aria_value_text<F>(mut self, text: F) -> Self
    where
        F: Fn((f64, ThumbIndex)) -> String + Send + Sync + 'static,
    {
        self.aria_value_text = Some(CallbackWith::new(text));
        self
    }

    /// The starting value for `config`, clamped into its bounds.
    pub(crate) fn initial_value(&self, config: &SliderConfig) -> SliderValue {
        match self.value {
            Some(SliderValue::Single(value)) => {
                SliderValue::Single(value.clamp(config.min, config.max))
            }
            Some(range @ SliderValue::Range(..)) => range,
            None if config.min_distance.is_some() => SliderValue::Range(config.min, config.max),
            None => SliderValue::Single(config.min),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_component_defaults() {
        let config = SliderConfig::default();
        assert_eq!(config.min, 0.0);
        assert_eq!(config.max, 100.0);
        assert_eq!(config.step, Some(1.0));
        assert_eq!(config.value_label_display, ValueLabelDisplay::Auto);
        assert_eq!(config.animation_duration, Duration::from_millis(300));
        assert!(config.animate_on_set);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn shift_step_falls_back_to_step() {
        assert_eq!(SliderConfig::default().effective_shift_step(), 1.0);
        assert_eq!(SliderConfig::default().step(None).effective_shift_step(), 10.0);
        assert_eq!(SliderConfig::default().shift_step(5.0).effective_shift_step(), 5.0);
    }

    #[test]
    fn rejects_inverted_bounds() {
        let err = SliderConfig::default().min(10.0).max(5.0).validate();
        assert_eq!(err, Err(ConfigError::MinExceedsMax { min: 10.0, max: 5.0 }));
    }

    #[test]
    fn rejects_non_finite_bounds() {
        let err = SliderConfig::default().max(f64::INFINITY).validate();
        assert!(matches!(err, Err(ConfigError::NonFiniteBound { .. })));
    }

    #[test]
    fn rejects_bad_steps() {
        assert_eq!(
            SliderConfig::default().step(Some(0.0)).validate(),
            Err(ConfigError::InvalidStep(0.0))
        );
        assert_eq!(
            SliderConfig::default().shift_step(-1.0).validate(),
            Err(ConfigError::InvalidShiftStep(-1.0))
        );
    }

    #[test]
    fn rejects_unreachable_min_distance() {
        let err = SliderConfig::default().max(10.0).min_distance(20.0).validate();
        assert_eq!(
            err,
            Err(ConfigError::MinDistanceExceedsSpan {
                min_distance: 20.0,
                span: 10.0
            })
        );
    }

    #[test]
    fn rejects_marks_outside_bounds() {
        let config = SliderConfig::default().marks_only(vec![Mark::new(0.0), Mark::new(120.0)]);
        assert_eq!(
            config.validate(),
            Err(ConfigError::MarkOutOfRange {
                value: 120.0,
                min: 0.0,
                max: 100.0
            })
        );
    }

    #[test]
    fn generated_titles() {
        let config = SliderConfig::default().show_title(true);
        assert_eq!(config.resolved_title().as_deref(), Some("Left"));
        let config = config.orientation(Orientation::Vertical).direction(SliderDirection::Dtt);
        assert_eq!(config.resolved_title().as_deref(), Some("Down"));
        let config = config.title("Volume");
        assert_eq!(config.resolved_title().as_deref(), Some("Volume"));
        assert_eq!(SliderConfig::default().title("x").resolved_title(), None);
    }

    #[test]
    fn initial_value_defaults() {
        let config = SliderConfig::default().min(5.0);
        assert_eq!(SliderData::default().initial_value(&config), SliderValue::Single(5.0));
        let range = config.clone().min_distance(10.0);
        assert_eq!(
            SliderData::default().initial_value(&range),
            SliderValue::Range(5.0, 100.0)
        );
        let data = SliderData::default().value(250.0);
        assert_eq!(data.initial_value(&config), SliderValue::Single(100.0));
    }
}
