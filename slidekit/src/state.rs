//! Slider value and per-instance interaction state.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
use smallvec::{SmallVec, smallvec};

use crate::drag::DragController;

/// Identifies one thumb of a slider.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum ThumbIndex {
    /// Index 0: the only thumb of a single slider, or the lower thumb of a
    /// range slider.
    #[default]
    Start,
    /// Index 1: the upper thumb of a range slider.
    End,
}

impl ThumbIndex {
    /// Numeric index of the thumb (0 or 1).
    pub fn index(self) -> usize {
        match self {
            Self::Start => 0,
            Self::End => 1,
        }
    }

    /// The opposite thumb.
    pub fn other(self) -> Self {
        match self {
            Self::Start => Self::End,
            Self::End => Self::Start,
        }
    }

    /// Converts a numeric index back into a thumb.
    pub fn from_index(index: usize) -> Option<Self> {
        match index {
            0 => Some(Self::Start),
            1 => Some(Self::End),
            _ => None,
        }
    }
}

/// The committed value of a slider.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum SliderValue {
    /// A single-thumb value.
    Single(f64),
    /// A two-thumb value `(lower, upper)`; `lower <= upper` after every
    /// commit.
    Range(f64, f64),
}

impl SliderValue {
    /// Returns `true` for two-thumb values.
    pub fn is_range(&self) -> bool {
        matches!(self, Self::Range(..))
    }

    /// The value that drives linked sliders: the single value, or the lower
    /// end of a range.
    pub fn primary(&self) -> f64 {
        match *self {
            Self::Single(value) => value,
            Self::Range(lower, _) => lower,
        }
    }

    /// The value of one thumb. A single value answers for both thumbs.
    pub fn get(&self, thumb: ThumbIndex) -> f64 {
        match (*self, thumb) {
            (Self::Single(value), _) => value,
            (Self::Range(lower, _), ThumbIndex::Start) => lower,
            (Self::Range(_, upper), ThumbIndex::End) => upper,
        }
    }

    /// The thumbs present in this value, in index order.
    pub fn thumbs(&self) -> SmallVec<[(ThumbIndex, f64); 2]> {
        match *self {
            Self::Single(value) => smallvec![(ThumbIndex::Start, value)],
            Self::Range(lower, upper) => {
                smallvec![(ThumbIndex::Start, lower), (ThumbIndex::End, upper)]
            }
        }
    }
}

impl From<f64> for SliderValue {
    fn from(value: f64) -> Self {
        Self::Single(value)
    }
}

impl From<(f64, f64)> for SliderValue {
    fn from((lower, upper): (f64, f64)) -> Self {
        Self::Range(lower, upper)
    }
}

impl From<[f64; 2]> for SliderValue {
    fn from([lower, upper]: [f64; 2]) -> Self {
        Self::Range(lower, upper)
    }
}

/// Mutable interaction state owned by exactly one slider instance.
#[derive(Debug)]
pub(crate) struct SliderState {
    pub(crate) value: SliderValue,
    /// Thumb that received the last commit; drives steppers and drag flags.
    pub(crate) active_thumb: ThumbIndex,
    pub(crate) hovered_thumb: Option<ThumbIndex>,
    pub(crate) focused_thumb: Option<ThumbIndex>,
    pub(crate) drag: DragController,
    pub(crate) disabled: bool,
    pub(crate) destroyed: bool,
}

impl SliderState {
    pub(crate) fn new(value: SliderValue, disabled: bool) -> Self {
        Self {
            value,
            active_thumb: ThumbIndex::Start,
            hovered_thumb: None,
            focused_thumb: None,
            drag: DragController::default(),
            disabled,
            destroyed: false,
        }
    }

    pub(crate) fn is_dragging(&self) -> bool {
        self.drag.is_dragging()
    }

    pub(crate) fn has_pending_update(&self) -> bool {
        self.drag.has_pending()
    }

    /// Thumb targeted by steppers and by inputs that do not name a thumb.
    pub(crate) fn target_thumb(&self) -> ThumbIndex {
        if !self.value.is_range() {
            return ThumbIndex::Start;
        }
        self.focused_thumb.unwrap_or(self.active_thumb)
    }
}
