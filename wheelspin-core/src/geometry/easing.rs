//! Easing curves for spin deceleration
//!
//! Every curve maps `[0, 1]` onto `[0, 1]`, is monotonic, and pins both
//! endpoints. Inputs outside the unit interval are clamped first.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Reparametrization of normalized run progress
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum Easing {
    /// `1 - (1 - t)^3`, strong deceleration toward the end
    #[default]
    EaseOutCubic,
    /// `1 - (1 - t)^2`, gentler deceleration
    EaseOutQuad,
    /// Constant speed
    Linear,
}

impl Easing {
    /// Apply the curve to normalized progress `t`
    pub fn apply(self, t: f64) -> f64 {
        let t = if t.is_nan() { 0.0 } else { t.clamp(0.0, 1.0) };
        match self {
            Easing::EaseOutCubic => ease_out_cubic(t),
            Easing::EaseOutQuad => {
                let inv = 1.0 - t;
                1.0 - inv * inv
            }
            Easing::Linear => t,
        }
    }
}

/// Cubic ease-out: `1 - (1 - t)^3`
pub fn ease_out_cubic(t: f64) -> f64 {
    let inv = 1.0 - t;
    1.0 - inv * inv * inv
}
