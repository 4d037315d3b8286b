//! Discrete marks: generation, nearest-mark snapping and activity.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::{state::SliderValue, value_model::round_precision};

/// Tolerance used when comparing a value against mark positions.
const MARK_EPSILON: f64 = 1e-9;

/// A discrete, optionally labelled position on the track.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Mark {
    /// Value the mark sits at. Always within `[min, max]`.
    pub value: f64,
    /// Optional text shown next to the mark.
    pub label: Option<String>,
}

impl Mark {
    /// An unlabelled mark.
    pub fn new(value: f64) -> Self {
        Self { value, label: None }
    }

    /// A labelled mark.
    pub fn labeled(value: f64, label: impl Into<String>) -> Self {
        Self {
            value,
            label: Some(label.into()),
        }
    }
}

/// How a slider obtains its marks.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum Marks {
    /// No marks.
    #[default]
    None,
    /// One mark at every `step` from `min` to `max` inclusive. Yields no
    /// marks when `step` is `None`.
    Auto,
    /// Explicit marks.
    Custom(Vec<Mark>),
}

/// Direction for moving between marks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MarkDirection {
    /// Towards `max`.
    Up,
    /// Towards `min`.
    Down,
}

/// The resolved, ascending list of marks of one slider.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MarkSet {
    marks: Vec<Mark>,
}

impl MarkSet {
    /// Resolves the configured marks. Explicit marks are sorted by value;
    /// marks with equal values keep their configured order.
    pub fn resolve(marks: &Marks, min: f64, max: f64, step: Option<f64>) -> Self {
        let mut marks = match marks {
            Marks::None => Vec::new(),
            Marks::Auto => step.map(|step| auto_marks(min, max, step)).unwrap_or_default(),
            Marks::Custom(marks) => marks.clone(),
        };
        marks.sort_by(|a, b| a.value.total_cmp(&b.value));
        Self { marks }
    }

    /// Number of marks.
    pub fn len(&self) -> usize {
        self.marks.len()
    }

    /// Returns `true` when the slider has no marks.
    pub fn is_empty(&self) -> bool {
        self.marks.is_empty()
    }

    /// Iterates marks in ascending value order.
    pub fn iter(&self) -> impl Iterator<Item = &Mark> {
        self.marks.iter()
    }

    /// Returns the mark value closest to `value`.
    ///
    /// Ties resolve to the first mark in ascending order. Without marks the
    /// input is returned unchanged.
    pub fn snap_to_nearest(&self, value: f64) -> f64 {
        let Some(first) = self.marks.first() else {
            return value;
        };
        let mut nearest = first.value;
        let mut best = (value - nearest).abs();
        for mark in &self.marks[1..] {
            let distance = (value - mark.value).abs();
            if distance < best {
                best = distance;
                nearest = mark.value;
            }
        }
        nearest
    }

    /// The closest mark strictly above or below `value`.
    pub fn adjacent(&self, value: f64, direction: MarkDirection) -> Option<f64> {
        match direction {
            MarkDirection::Up => self
                .marks
                .iter()
                .map(|mark| mark.value)
                .find(|&mark| mark > value + MARK_EPSILON),
            MarkDirection::Down => self
                .marks
                .iter()
                .rev()
                .map(|mark| mark.value)
                .find(|&mark| mark < value - MARK_EPSILON),
        }
    }
}

/// Generates a mark at every `step` from `min` to `max` inclusive.
///
/// Positions are computed from the step index rather than by repeated
/// addition so that long tracks do not accumulate drift.
pub fn auto_marks(min: f64, max: f64, step: f64) -> Vec<Mark> {
    if step <= 0.0 || !step.is_finite() || max < min {
        return Vec::new();
    }
    let count = ((max - min) / step + MARK_EPSILON).floor() as usize;
    (0..=count)
        .map(|index| Mark::new(round_precision(min + index as f64 * step).min(max)))
        .collect()
}

/// Whether a mark is covered by the current value.
///
/// A single value covers every mark at or below it; a range covers the marks
/// inside `[lower, upper]`.
pub fn is_mark_active(mark_value: f64, value: SliderValue) -> bool {
    match value {
        SliderValue::Single(current) => mark_value <= current,
        SliderValue::Range(lower, upper) => mark_value >= lower && mark_value <= upper,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn custom(values: &[f64]) -> MarkSet {
        let marks = values.iter().copied().map(Mark::new).collect();
        MarkSet::resolve(&Marks::Custom(marks), 0.0, 100.0, None)
    }

    #[test]
    fn auto_marks_cover_both_ends() {
        let marks = auto_marks(0.0, 100.0, 25.0);
        let values: Vec<f64> = marks.iter().map(|m| m.value).collect();
        assert_eq!(values, vec![0.0, 25.0, 50.0, 75.0, 100.0]);
    }

    #[test]
    fn auto_marks_do_not_drift() {
        let marks = auto_marks(0.0, 1.0, 0.1);
        assert_eq!(marks.len(), 11);
        assert_eq!(marks[3].value, 0.3);
        assert_eq!(marks[10].value, 1.0);
    }

    #[test]
    fn auto_marks_stop_before_overshoot() {
        let values: Vec<f64> = auto_marks(0.0, 10.0, 3.0).iter().map(|m| m.value).collect();
        assert_eq!(values, vec![0.0, 3.0, 6.0, 9.0]);
    }

    #[test]
    fn auto_requires_numeric_step() {
        let set = MarkSet::resolve(&Marks::Auto, 0.0, 100.0, None);
        assert!(set.is_empty());
        let set = MarkSet::resolve(&Marks::Auto, 0.0, 100.0, Some(10.0));
        assert_eq!(set.len(), 11);
    }

    #[test]
    fn snaps_to_nearest_mark() {
        let set = custom(&[0.0, 25.0, 50.0, 75.0, 100.0]);
        assert_eq!(set.snap_to_nearest(62.0), 50.0);
        assert_eq!(set.snap_to_nearest(63.0), 75.0);
        assert_eq!(set.snap_to_nearest(-5.0), 0.0);
    }

    #[test]
    fn ties_resolve_to_lower_mark() {
        let set = custom(&[75.0, 25.0]);
        assert_eq!(set.snap_to_nearest(50.0), 25.0);
    }

    #[test]
    fn snap_without_marks_is_identity() {
        let set = MarkSet::default();
        assert_eq!(set.snap_to_nearest(42.5), 42.5);
    }

    #[test]
    fn mark_activity() {
        assert!(is_mark_active(20.0, SliderValue::Single(20.0)));
        assert!(!is_mark_active(21.0, SliderValue::Single(20.0)));
        assert!(is_mark_active(30.0, SliderValue::Range(30.0, 70.0)));
        assert!(is_mark_active(70.0, SliderValue::Range(30.0, 70.0)));
        assert!(!is_mark_active(10.0, SliderValue::Range(30.0, 70.0)));
    }

    #[test]
    fn adjacent_marks() {
        let set = custom(&[0.0, 25.0, 50.0]);
        assert_eq!(set.adjacent(25.0, MarkDirection::Up), Some(50.0));
        assert_eq!(set.adjacent(25.0, MarkDirection::Down), Some(0.0));
        assert_eq!(set.adjacent(30.0, MarkDirection::Down), Some(25.0));
        assert_eq!(set.adjacent(50.0, MarkDirection::Up), None);
    }
}
