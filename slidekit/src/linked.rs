//! Propagation of committed values to linked sliders.
//!
//! A link holds only a weak reference to its target. The derived value is
//! written through the target's own commit path, so the target's clamping
//! and range constraints always apply.

use std::sync::Weak;

use tracing::warn;

use crate::{
    error::SliderError,
    slider::{Slider, SliderId, SliderShared},
};

/// A one-way link from a driving slider to a target slider.
#[derive(Clone)]
pub struct LinkedSlider {
    target: Weak<SliderShared>,
    ratio: f64,
    invert: bool,
}

impl LinkedSlider {
    /// Links to `target` with a ratio of 1.
    pub fn new(target: &Slider) -> Self {
        Self {
            target: target.downgrade(),
            ratio: 1.0,
            invert: false,
        }
    }

    /// Multiplier applied to the driving value.
    pub fn ratio(mut self, ratio: f64) -> Self {
        self.ratio = ratio;
        self
    }

    /// Reflect the scaled value through the target's bounds.
    pub fn inverted(mut self, invert: bool) -> Self {
        self.invert = invert;
        self
    }

    fn apply(&self, source: SliderId, primary: f64, animate: bool) -> Result<(), SliderError> {
        let target = self
            .target
            .upgrade()
            .map(Slider::from_shared)
            .ok_or(SliderError::LinkTargetGone)?;
        if target.id() == source {
            warn!(slider = ?source, "ignoring link from a slider to itself");
            return Ok(());
        }
        target.receive_linked(primary, self.ratio, self.invert, animate)
    }
}

impl std::fmt::Debug for LinkedSlider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LinkedSlider")
            .field("alive", &(self.target.strong_count() > 0))
            .field("ratio", &self.ratio)
            .field("invert", &self.invert)
            .finish()
    }
}

/// The value a link derives for its target.
///
/// `invert` reflects through the target's own bounds: `max - (scaled - min)`.
pub fn linked_value(primary: f64, ratio: f64, invert: bool, min: f64, max: f64) -> f64 {
    let scaled = primary * ratio;
    if invert { max - (scaled - min) } else { scaled }
}

/// Pushes `primary` to every link. Failures are logged and skipped so the
/// driving commit always completes.
pub(crate) fn propagate(source: SliderId, links: &[LinkedSlider], primary: f64, animate: bool) {
    for link in links {
        if let Err(error) = link.apply(source, primary, animate) {
            warn!(slider = ?source, %error, "linked slider propagation failed");
        }
    }
}
