//! Keyboard stepping.
//!
//! Keys are mapped to a move (a number of steps, or a jump to a bound) and the
//! move is resolved against the focused thumb's current value. Horizontal
//! sliders ignore the vertical arrows and vice versa.

use winit::keyboard::{Key, ModifiersState, NamedKey};

use crate::{
    config::{Orientation, SliderConfig},
    marks::{MarkDirection, MarkSet},
    value_model::round_precision,
};

/// Steps moved by PageUp and PageDown.
const PAGE_STEPS: i32 = 10;

/// Keys the slider reacts to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SliderKey {
    /// `ArrowLeft`
    ArrowLeft,
    /// `ArrowRight`
    ArrowRight,
    /// `ArrowUp`
    ArrowUp,
    /// `ArrowDown`
    ArrowDown,
    /// `PageUp`
    PageUp,
    /// `PageDown`
    PageDown,
    /// `Home`
    Home,
    /// `End`
    End,
}

impl SliderKey {
    /// Maps a winit logical key.
    pub fn from_winit(key: &Key) -> Option<Self> {
        let Key::Named(named) = key else {
            return None;
        };
        Some(match named {
            NamedKey::ArrowLeft => Self::ArrowLeft,
            NamedKey::ArrowRight => Self::ArrowRight,
            NamedKey::ArrowUp => Self::ArrowUp,
            NamedKey::ArrowDown => Self::ArrowDown,
            NamedKey::PageUp => Self::PageUp,
            NamedKey::PageDown => Self::PageDown,
            NamedKey::Home => Self::Home,
            NamedKey::End => Self::End,
            _ => return None,
        })
    }

    /// Maps a DOM style key name such as `"ArrowLeft"`.
    pub fn from_name(name: &str) -> Option<Self> {
        Some(match name {
            "ArrowLeft" => Self::ArrowLeft,
            "ArrowRight" => Self::ArrowRight,
            "ArrowUp" => Self::ArrowUp,
            "ArrowDown" => Self::ArrowDown,
            "PageUp" => Self::PageUp,
            "PageDown" => Self::PageDown,
            "Home" => Self::Home,
            "End" => Self::End,
            _ => return None,
        })
    }
}

/// A key press with the modifier state the slider cares about.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyInput {
    /// The key.
    pub key: SliderKey,
    /// Whether Shift was held.
    pub shift: bool,
}

impl KeyInput {
    /// A press without modifiers.
    pub fn new(key: SliderKey) -> Self {
        Self { key, shift: false }
    }

    /// A press with Shift held.
    pub fn shifted(key: SliderKey) -> Self {
        Self { key, shift: true }
    }

    /// Maps a winit key and modifier state. Unknown keys yield `None`.
    pub fn from_winit(key: &Key, modifiers: ModifiersState) -> Option<Self> {
        SliderKey::from_winit(key).map(|key| Self {
            key,
            shift: modifiers.shift_key(),
        })
    }
}

/// What a key asks the slider to do.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyMove {
    /// Move by this many steps.
    Steps(i32),
    /// Jump to `min`.
    ToMin,
    /// Jump to `max`.
    ToMax,
}

/// Maps a key to a move for the given orientation. Arrows across the axis
/// yield `None`.
pub fn key_move(key: SliderKey, orientation: Orientation) -> Option<KeyMove> {
    use SliderKey as K;
    match (key, orientation) {
        (K::ArrowRight, Orientation::Horizontal) | (K::ArrowUp, Orientation::Vertical) => {
            Some(KeyMove::Steps(1))
        }
        (K::ArrowLeft, Orientation::Horizontal) | (K::ArrowDown, Orientation::Vertical) => {
            Some(KeyMove::Steps(-1))
        }
        (K::ArrowRight | K::ArrowLeft, Orientation::Vertical)
        | (K::ArrowUp | K::ArrowDown, Orientation::Horizontal) => None,
        (K::PageUp, _) => Some(KeyMove::Steps(PAGE_STEPS)),
        (K::PageDown, _) => Some(KeyMove::Steps(-PAGE_STEPS)),
        (K::Home, _) => Some(KeyMove::ToMin),
        (K::End, _) => Some(KeyMove::ToMax),
    }
}

/// Resolves key presses into target values.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct KeyboardController {
    orientation: Orientation,
    min: f64,
    max: f64,
    step: Option<f64>,
    shift_step: f64,
}

impl KeyboardController {
    /// Builds the controller for a validated configuration.
    pub fn new(config: &SliderConfig) -> Self {
        Self {
            orientation: config.orientation,
            min: config.min,
            max: config.max,
            step: config.step,
            shift_step: config.effective_shift_step(),
        }
    }

    /// Value `input` moves `current` to, or `None` when the key is ignored or
    /// the move would not change the value.
    ///
    /// In marks-only mode the steps walk from mark to mark; without marks
    /// they fall back to a step of 1.
    pub fn target(&self, input: KeyInput, current: f64, marks: &MarkSet) -> Option<f64> {
        let target = match key_move(input.key, self.orientation)? {
            KeyMove::ToMin => self.min,
            KeyMove::ToMax => self.max,
            KeyMove::Steps(steps) if self.step.is_none() && !marks.is_empty() => {
                self.walk_marks(current, steps, marks)
            }
            KeyMove::Steps(steps) => {
                let size = if input.shift {
                    self.shift_step
                } else {
                    self.step.unwrap_or(1.0)
                };
                round_precision(current + f64::from(steps) * size)
            }
        };
        let target = target.clamp(self.min, self.max);
        (target != current).then_some(target)
    }

    /// Applies a number of steps the way arrow keys do, for steppers, wheel
    /// and accessibility actions.
    pub fn step_from(&self, current: f64, steps: i32, marks: &MarkSet) -> Option<f64> {
        let target = if self.step.is_none() && !marks.is_empty() {
            self.walk_marks(current, steps, marks)
        } else {
            round_precision(current + f64::from(steps) * self.step.unwrap_or(1.0))
        };
        let target = target.clamp(self.min, self.max);
        (target != current).then_some(target)
    }

    fn walk_marks(&self, current: f64, steps: i32, marks: &MarkSet) -> f64 {
        let direction = if steps >= 0 {
            MarkDirection::Up
        } else {
            MarkDirection::Down
        };
        let mut value = current;
        for _ in 0..steps.unsigned_abs() {
            match marks.adjacent(value, direction) {
                Some(next) => value = next,
                None => break,
            }
        }
        value
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::marks::{Mark, Marks};

    fn controller(config: SliderConfig) -> KeyboardController {
        KeyboardController::new(&config)
    }

    #[test]
    fn horizontal_arrows() {
        let keys = controller(SliderConfig::default());
        let marks = MarkSet::default();
        assert_eq!(keys.target(KeyInput::new(SliderKey::ArrowRight), 50.0, &marks), Some(51.0));
        assert_eq!(keys.target(KeyInput::new(SliderKey::ArrowLeft), 50.0, &marks), Some(49.0));
        assert_eq!(keys.target(KeyInput::new(SliderKey::ArrowUp), 50.0, &marks), None);
        assert_eq!(keys.target(KeyInput::new(SliderKey::ArrowDown), 50.0, &marks), None);
    }

    #[test]
    fn vertical_arrows() {
        let keys = controller(SliderConfig::default().orientation(Orientation::Vertical));
        let marks = MarkSet::default();
        assert_eq!(keys.target(KeyInput::new(SliderKey::ArrowUp), 50.0, &marks), Some(51.0));
        assert_eq!(keys.target(KeyInput::new(SliderKey::ArrowDown), 50.0, &marks), Some(49.0));
        assert_eq!(keys.target(KeyInput::new(SliderKey::ArrowRight), 50.0, &marks), None);
    }

    #[test]
    fn pages_and_shift() {
        let keys = controller(SliderConfig::default().step(Some(2.0)).shift_step(5.0));
        let marks = MarkSet::default();
        assert_eq!(keys.target(KeyInput::new(SliderKey::PageUp), 10.0, &marks), Some(30.0));
        assert_eq!(keys.target(KeyInput::shifted(SliderKey::PageDown), 80.0, &marks), Some(30.0));
        assert_eq!(keys.target(KeyInput::shifted(SliderKey::ArrowRight), 10.0, &marks), Some(15.0));
    }

    #[test]
    fn home_and_end_reach_bounds() {
        let keys = controller(SliderConfig::default().min(-10.0).max(10.0));
        let marks = MarkSet::default();
        assert_eq!(keys.target(KeyInput::new(SliderKey::Home), 3.0, &marks), Some(-10.0));
        assert_eq!(keys.target(KeyInput::new(SliderKey::End), 3.0, &marks), Some(10.0));
        assert_eq!(keys.target(KeyInput::new(SliderKey::End), 10.0, &marks), None);
    }

    #[test]
    fn steps_clamp_to_bounds() {
        let keys = controller(SliderConfig::default());
        let marks = MarkSet::default();
        assert_eq!(keys.target(KeyInput::new(SliderKey::PageUp), 95.0, &marks), Some(100.0));
        assert_eq!(keys.target(KeyInput::new(SliderKey::ArrowLeft), 0.0, &marks), None);
    }

    #[test]
    fn fractional_steps_do_not_drift() {
        let keys = controller(SliderConfig::default().max(1.0).step(Some(0.1)));
        let marks = MarkSet::default();
        let mut value = 0.0;
        for _ in 0..3 {
            value = keys
                .target(KeyInput::new(SliderKey::ArrowRight), value, &marks)
                .unwrap_or(value);
        }
        assert_eq!(value, 0.3);
    }

    #[test]
    fn marks_only_walks_marks() {
        let config = SliderConfig::default().marks_only(vec![
            Mark::new(0.0),
            Mark::new(25.0),
            Mark::new(50.0),
            Mark::new(100.0),
        ]);
        let marks = MarkSet::resolve(&config.marks, config.min, config.max, config.step);
        let keys = controller(config);
        assert_eq!(keys.target(KeyInput::new(SliderKey::ArrowRight), 25.0, &marks), Some(50.0));
        assert_eq!(keys.target(KeyInput::new(SliderKey::ArrowLeft), 30.0, &marks), Some(25.0));
        assert_eq!(keys.target(KeyInput::new(SliderKey::PageUp), 0.0, &marks), Some(100.0));
        assert_eq!(keys.step_from(50.0, -1, &marks), Some(25.0));
    }

    #[test]
    fn marks_only_without_marks_uses_unit_step() {
        let keys = controller(SliderConfig::default().step(None).marks(Marks::None));
        assert_eq!(
            keys.target(KeyInput::new(SliderKey::ArrowRight), 4.0, &MarkSet::default()),
            Some(5.0)
        );
    }

    #[test]
    fn maps_winit_keys() {
        let shift = ModifiersState::SHIFT;
        let input = KeyInput::from_winit(&Key::Named(NamedKey::PageUp), shift);
        assert_eq!(input, Some(KeyInput::shifted(SliderKey::PageUp)));
        assert_eq!(
            KeyInput::from_winit(&Key::Named(NamedKey::Enter), ModifiersState::empty()),
            None
        );
        assert_eq!(SliderKey::from_name("Home"), Some(SliderKey::Home));
        assert_eq!(SliderKey::from_name("a"), None);
    }
}
