//! Two-thumb constraint solving: ordering, minimum distance and the thumb
//! assignment policy for track clicks.

use crate::{config::SliderConfig, state::ThumbIndex};

/// Constraints applied to every range commit.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RangeConstraints {
    min: f64,
    max: f64,
    min_distance: f64,
    disable_swap: bool,
}

/// Outcome of resolving a thumb update.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Resolution {
    /// The ordered `(lower, upper)` tuple.
    pub value: (f64, f64),
    /// Thumb to treat as active after the update.
    pub active: ThumbIndex,
}

impl RangeConstraints {
    /// Builds the constraints of a validated configuration.
    pub fn new(config: &SliderConfig) -> Self {
        Self {
            min: config.min,
            max: config.max,
            min_distance: config.min_distance.unwrap_or(0.0),
            disable_swap: config.disable_swap,
        }
    }

    /// Resolves a candidate value for one thumb against the current tuple.
    ///
    /// The moving thumb cannot pass the other thumb and is held
    /// `min_distance` away from it. Only when holding it would leave
    /// `[min, max]` does the other thumb get pushed by the shortfall.
    pub fn resolve(&self, candidate: f64, thumb: ThumbIndex, current: (f64, f64)) -> Resolution {
        let candidate = candidate.clamp(self.min, self.max);
        let distance = self.min_distance;
        let (mut lower, mut upper) = current;

        match thumb {
            ThumbIndex::Start => {
                lower = candidate.min(upper);
                if distance > 0.0 && upper - lower < distance {
                    lower = upper - distance;
                    if lower < self.min {
                        lower = self.min;
                        upper = (lower + distance).min(self.max);
                    }
                }
            }
            ThumbIndex::End => {
                upper = candidate.max(lower);
                if distance > 0.0 && upper - lower < distance {
                    upper = lower + distance;
                    if upper > self.max {
                        upper = self.max;
                        lower = (upper - distance).max(self.min);
                    }
                }
            }
        }

        Resolution {
            value: (lower, upper),
            active: thumb,
        }
    }

    /// Chooses the thumb a track click at `target` moves.
    ///
    /// The closer thumb wins. Unless swapping is disabled, a target on the far
    /// side of the other thumb is handed to that thumb instead, so the click
    /// lands where the user pointed without breaking the ordering.
    pub fn pick_track_thumb(&self, target: f64, current: (f64, f64)) -> ThumbIndex {
        let (lower, upper) = current;
        let closer = if (target - lower).abs() < (target - upper).abs() {
            ThumbIndex::Start
        } else {
            ThumbIndex::End
        };
        if self.disable_swap {
            return closer;
        }
        match closer {
            ThumbIndex::Start if target > upper => ThumbIndex::End,
            ThumbIndex::End if target < lower => ThumbIndex::Start,
            other => other,
        }
    }

    /// Orders and constrains a whole tuple, as supplied by a programmatic
    /// `set_value` or by the initial data.
    pub fn normalize(&self, first: f64, second: f64) -> (f64, f64) {
        let first = first.clamp(self.min, self.max);
        let second = second.clamp(self.min, self.max);
        let (lower, mut upper) = if first <= second {
            (first, second)
        } else {
            (second, first)
        };
        let mut lower = lower;
        let distance = self.min_distance;
        if distance > 0.0 && upper - lower < distance {
            upper = lower + distance;
            if upper > self.max {
                upper = self.max;
                lower = (upper - distance).max(self.min);
            }
        }
        (lower, upper)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn constraints(min_distance: Option<f64>, disable_swap: bool) -> RangeConstraints {
        let mut config = SliderConfig::default().disable_swap(disable_swap);
        config.min_distance = min_distance;
        RangeConstraints::new(&config)
    }

    #[test]
    fn lower_thumb_cannot_pass_upper() {
        let solver = constraints(None, false);
        let resolved = solver.resolve(80.0, ThumbIndex::Start, (30.0, 70.0));
        assert_eq!(resolved.value, (70.0, 70.0));
        assert_eq!(resolved.active, ThumbIndex::Start);
    }

    #[test]
    fn upper_thumb_cannot_pass_lower() {
        let solver = constraints(None, false);
        let resolved = solver.resolve(10.0, ThumbIndex::End, (30.0, 70.0));
        assert_eq!(resolved.value, (30.0, 30.0));
    }

    #[test]
    fn min_distance_holds_dragged_thumb() {
        let solver = constraints(Some(20.0), false);
        let resolved = solver.resolve(65.0, ThumbIndex::Start, (30.0, 70.0));
        assert_eq!(resolved.value, (50.0, 70.0));

        let resolved = solver.resolve(35.0, ThumbIndex::End, (30.0, 70.0));
        assert_eq!(resolved.value, (30.0, 50.0));
    }

    #[test]
    fn min_distance_pushes_other_thumb_at_bounds() {
        let solver = constraints(Some(20.0), false);
        // The pair starts too close together near the lower bound.
        let resolved = solver.resolve(0.0, ThumbIndex::Start, (5.0, 10.0));
        assert_eq!(resolved.value, (0.0, 20.0));

        let resolved = solver.resolve(100.0, ThumbIndex::End, (95.0, 98.0));
        assert_eq!(resolved.value, (80.0, 100.0));
    }

    #[test]
    fn ordering_and_distance_hold_over_sequences() {
        let solver = constraints(Some(7.5), false);
        let mut value = (10.0, 90.0);
        let moves = [
            (ThumbIndex::Start, 95.0),
            (ThumbIndex::End, -3.0),
            (ThumbIndex::Start, 42.0),
            (ThumbIndex::End, 44.0),
            (ThumbIndex::End, 100.0),
            (ThumbIndex::Start, 99.0),
            (ThumbIndex::End, 0.0),
        ];
        for (thumb, candidate) in moves {
            value = solver.resolve(candidate, thumb, value).value;
            assert!(value.0 <= value.1, "{value:?}");
            assert!(value.1 - value.0 >= 7.5 - 1e-9, "{value:?}");
            assert!(value.0 >= 0.0 && value.1 <= 100.0, "{value:?}");
        }
    }

    #[test]
    fn track_click_picks_closer_thumb() {
        let solver = constraints(None, false);
        assert_eq!(solver.pick_track_thumb(35.0, (30.0, 70.0)), ThumbIndex::Start);
        assert_eq!(solver.pick_track_thumb(60.0, (30.0, 70.0)), ThumbIndex::End);
    }

    #[test]
    fn track_click_swaps_on_collapsed_range() {
        let solver = constraints(None, false);
        // Equal distances favour the upper thumb, which cannot move below.
        assert_eq!(solver.pick_track_thumb(20.0, (50.0, 50.0)), ThumbIndex::Start);
        assert_eq!(solver.pick_track_thumb(80.0, (50.0, 50.0)), ThumbIndex::End);
    }

    #[test]
    fn disabled_swap_keeps_closest_assignment() {
        let solver = constraints(None, true);
        assert_eq!(solver.pick_track_thumb(20.0, (50.0, 50.0)), ThumbIndex::End);
    }

    #[test]
    fn normalize_orders_and_spaces() {
        let solver = constraints(Some(10.0), false);
        assert_eq!(solver.normalize(60.0, 20.0), (20.0, 60.0));
        assert_eq!(solver.normalize(50.0, 52.0), (50.0, 60.0));
        assert_eq!(solver.normalize(98.0, 99.0), (90.0, 100.0));
        assert_eq!(solver.normalize(-20.0, 150.0), (0.0, 100.0));
    }
}
