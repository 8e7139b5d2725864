//! Named easing curves.
//!
//! Standard Penner curves over normalized time. Every curve maps 0 to 0 and
//! 1 to 1; back and elastic variants overshoot in between.

use std::f64::consts::PI;

use indexmap::IndexMap;
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

use crate::error::MotionError;
use crate::Result;

const BACK_C1: f64 = 1.70158;
const BACK_C2: f64 = BACK_C1 * 1.525;
const BACK_C3: f64 = BACK_C1 + 1.0;
const ELASTIC_C4: f64 = (2.0 * PI) / 3.0;
const ELASTIC_C5: f64 = (2.0 * PI) / 4.5;
const BOUNCE_N1: f64 = 7.5625;
const BOUNCE_D1: f64 = 2.75;

/// Perspective distance used by the 3D page presets.
pub const PERSPECTIVE: &str = "1000px";

/// CSS length used for `perspective(...)` in page transforms.
#[inline]
pub fn perspective() -> &'static str {
    PERSPECTIVE
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Easing {
    Linear,
    EaseInSine,
    EaseOutSine,
    EaseInOutSine,
    EaseInQuad,
    EaseOutQuad,
    EaseInOutQuad,
    EaseInCubic,
    EaseOutCubic,
    EaseInOutCubic,
    EaseInQuart,
    EaseOutQuart,
    EaseInOutQuart,
    EaseInQuint,
    EaseOutQuint,
    EaseInOutQuint,
    EaseInExpo,
    EaseOutExpo,
    EaseInOutExpo,
    EaseInCirc,
    EaseOutCirc,
    EaseInOutCirc,
    EaseInBack,
    EaseOutBack,
    EaseInOutBack,
    EaseInElastic,
    EaseOutElastic,
    EaseInOutElastic,
    EaseInBounce,
    EaseOutBounce,
    EaseInOutBounce,
}

impl Easing {
    pub const ALL: [Easing; 31] = [
        Easing::Linear,
        Easing::EaseInSine,
        Easing::EaseOutSine,
        Easing::EaseInOutSine,
        Easing::EaseInQuad,
        Easing::EaseOutQuad,
        Easing::EaseInOutQuad,
        Easing::EaseInCubic,
        Easing::EaseOutCubic,
        Easing::EaseInOutCubic,
        Easing::EaseInQuart,
        Easing::EaseOutQuart,
        Easing::EaseInOutQuart,
        Easing::EaseInQuint,
        Easing::EaseOutQuint,
        Easing::EaseInOutQuint,
        Easing::EaseInExpo,
        Easing::EaseOutExpo,
        Easing::EaseInOutExpo,
        Easing::EaseInCirc,
        Easing::EaseOutCirc,
        Easing::EaseInOutCirc,
        Easing::EaseInBack,
        Easing::EaseOutBack,
        Easing::EaseInOutBack,
        Easing::EaseInElastic,
        Easing::EaseOutElastic,
        Easing::EaseInOutElastic,
        Easing::EaseInBounce,
        Easing::EaseOutBounce,
        Easing::EaseInOutBounce,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Easing::Linear => "linear",
            Easing::EaseInSine => "easeInSine",
            Easing::EaseOutSine => "easeOutSine",
            Easing::EaseInOutSine => "easeInOutSine",
            Easing::EaseInQuad => "easeInQuad",
            Easing::EaseOutQuad => "easeOutQuad",
            Easing::EaseInOutQuad => "easeInOutQuad",
            Easing::EaseInCubic => "easeInCubic",
            Easing::EaseOutCubic => "easeOutCubic",
            Easing::EaseInOutCubic => "easeInOutCubic",
            Easing::EaseInQuart => "easeInQuart",
            Easing::EaseOutQuart => "easeOutQuart",
            Easing::EaseInOutQuart => "easeInOutQuart",
            Easing::EaseInQuint => "easeInQuint",
            Easing::EaseOutQuint => "easeOutQuint",
            Easing::EaseInOutQuint => "easeInOutQuint",
            Easing::EaseInExpo => "easeInExpo",
            Easing::EaseOutExpo => "easeOutExpo",
            Easing::EaseInOutExpo => "easeInOutExpo",
            Easing::EaseInCirc => "easeInCirc",
            Easing::EaseOutCirc => "easeOutCirc",
            Easing::EaseInOutCirc => "easeInOutCirc",
            Easing::EaseInBack => "easeInBack",
            Easing::EaseOutBack => "easeOutBack",
            Easing::EaseInOutBack => "easeInOutBack",
            Easing::EaseInElastic => "easeInElastic",
            Easing::EaseOutElastic => "easeOutElastic",
            Easing::EaseInOutElastic => "easeInOutElastic",
            Easing::EaseInBounce => "easeInBounce",
            Easing::EaseOutBounce => "easeOutBounce",
            Easing::EaseInOutBounce => "easeInOutBounce",
        }
    }

    /// Look up a curve by its camelCase name (`"easeInOutCubic"`).
    pub fn from_name(name: &str) -> Result<Easing> {
        EASING_NAMES
            .get(name)
            .copied()
            .ok_or_else(|| MotionError::UnknownEasing {
                name: name.to_string(),
            })
    }

    /// Evaluate at normalized time; `t` is clamped to [0,1].
    pub fn apply(&self, t: f64) -> f64 {
        let t = if t.is_nan() { 0.0 } else { t.clamp(0.0, 1.0) };
        match self {
            Easing::Linear => t,
            Easing::EaseInSine => 1.0 - (t * PI / 2.0).cos(),
            Easing::EaseOutSine => (t * PI / 2.0).sin(),
            Easing::EaseInOutSine => -((PI * t).cos() - 1.0) / 2.0,
            Easing::EaseInQuad => t * t,
            Easing::EaseOutQuad => 1.0 - (1.0 - t) * (1.0 - t),
            Easing::EaseInOutQuad => in_out_pow(t, 2),
            Easing::EaseInCubic => t.powi(3),
            Easing::EaseOutCubic => 1.0 - (1.0 - t).powi(3),
            Easing::EaseInOutCubic => in_out_pow(t, 3),
            Easing::EaseInQuart => t.powi(4),
            Easing::EaseOutQuart => 1.0 - (1.0 - t).powi(4),
            Easing::EaseInOutQuart => in_out_pow(t, 4),
            Easing::EaseInQuint => t.powi(5),
            Easing::EaseOutQuint => 1.0 - (1.0 - t).powi(5),
            Easing::EaseInOutQuint => in_out_pow(t, 5),
            Easing::EaseInExpo => {
                if t == 0.0 {
                    0.0
                } else {
                    2f64.powf(10.0 * t - 10.0)
                }
            }
            Easing::EaseOutExpo => {
                if t == 1.0 {
                    1.0
                } else {
                    1.0 - 2f64.powf(-10.0 * t)
                }
            }
            Easing::EaseInOutExpo => {
                if t == 0.0 || t == 1.0 {
                    t
                } else if t < 0.5 {
                    2f64.powf(20.0 * t - 10.0) / 2.0
                } else {
                    (2.0 - 2f64.powf(-20.0 * t + 10.0)) / 2.0
                }
            }
            Easing::EaseInCirc => 1.0 - (1.0 - t * t).sqrt(),
            Easing::EaseOutCirc => (1.0 - (t - 1.0) * (t - 1.0)).sqrt(),
            Easing::EaseInOutCirc => {
                if t < 0.5 {
                    (1.0 - (1.0 - (2.0 * t).powi(2)).sqrt()) / 2.0
                } else {
                    ((1.0 - (-2.0 * t + 2.0).powi(2)).sqrt() + 1.0) / 2.0
                }
            }
            Easing::EaseInBack => BACK_C3 * t.powi(3) - BACK_C1 * t * t,
            Easing::EaseOutBack => {
                1.0 + BACK_C3 * (t - 1.0).powi(3) + BACK_C1 * (t - 1.0).powi(2)
            }
            Easing::EaseInOutBack => {
                if t < 0.5 {
                    ((2.0 * t).powi(2) * ((BACK_C2 + 1.0) * 2.0 * t - BACK_C2)) / 2.0
                } else {
                    ((2.0 * t - 2.0).powi(2) * ((BACK_C2 + 1.0) * (t * 2.0 - 2.0) + BACK_C2)
                        + 2.0)
                        / 2.0
                }
            }
            Easing::EaseInElastic => {
                if t == 0.0 || t == 1.0 {
                    t
                } else {
                    -(2f64.powf(10.0 * t - 10.0)) * ((t * 10.0 - 10.75) * ELASTIC_C4).sin()
                }
            }
            Easing::EaseOutElastic => {
                if t == 0.0 || t == 1.0 {
                    t
                } else {
                    2f64.powf(-10.0 * t) * ((t * 10.0 - 0.75) * ELASTIC_C4).sin() + 1.0
                }
            }
            Easing::EaseInOutElastic => {
                if t == 0.0 || t == 1.0 {
                    t
                } else if t < 0.5 {
                    -(2f64.powf(20.0 * t - 10.0) * ((20.0 * t - 11.125) * ELASTIC_C5).sin()) / 2.0
                } else {
                    (2f64.powf(-20.0 * t + 10.0) * ((20.0 * t - 11.125) * ELASTIC_C5).sin()) / 2.0
                        + 1.0
                }
            }
            Easing::EaseInBounce => 1.0 - bounce_out(1.0 - t),
            Easing::EaseOutBounce => bounce_out(t),
            Easing::EaseInOutBounce => {
                if t < 0.5 {
                    (1.0 - bounce_out(1.0 - 2.0 * t)) / 2.0
                } else {
                    (1.0 + bounce_out(2.0 * t - 1.0)) / 2.0
                }
            }
        }
    }

    /// Closest CSS timing function, if the curve has a cubic-bezier form.
    pub fn css(&self) -> Option<&'static str> {
        Some(match self {
            Easing::Linear => "linear",
            Easing::EaseInSine => "cubic-bezier(0.12, 0, 0.39, 0)",
            Easing::EaseOutSine => "cubic-bezier(0.61, 1, 0.88, 1)",
            Easing::EaseInOutSine => "cubic-bezier(0.37, 0, 0.63, 1)",
            Easing::EaseInQuad => "cubic-bezier(0.11, 0, 0.5, 0)",
            Easing::EaseOutQuad => "cubic-bezier(0.5, 1, 0.89, 1)",
            Easing::EaseInOutQuad => "cubic-bezier(0.45, 0, 0.55, 1)",
            Easing::EaseInCubic => "cubic-bezier(0.32, 0, 0.67, 0)",
            Easing::EaseOutCubic => "cubic-bezier(0.33, 1, 0.68, 1)",
            Easing::EaseInOutCubic => "cubic-bezier(0.65, 0, 0.35, 1)",
            Easing::EaseInQuart => "cubic-bezier(0.5, 0, 0.75, 0)",
            Easing::EaseOutQuart => "cubic-bezier(0.25, 1, 0.5, 1)",
            Easing::EaseInOutQuart => "cubic-bezier(0.76, 0, 0.24, 1)",
            Easing::EaseInQuint => "cubic-bezier(0.64, 0, 0.78, 0)",
            Easing::EaseOutQuint => "cubic-bezier(0.22, 1, 0.36, 1)",
            Easing::EaseInOutQuint => "cubic-bezier(0.83, 0, 0.17, 1)",
            Easing::EaseInExpo => "cubic-bezier(0.7, 0, 0.84, 0)",
            Easing::EaseOutExpo => "cubic-bezier(0.16, 1, 0.3, 1)",
            Easing::EaseInOutExpo => "cubic-bezier(0.87, 0, 0.13, 1)",
            Easing::EaseInCirc => "cubic-bezier(0.55, 0, 1, 0.45)",
            Easing::EaseOutCirc => "cubic-bezier(0, 0.55, 0.45, 1)",
            Easing::EaseInOutCirc => "cubic-bezier(0.85, 0, 0.15, 1)",
            Easing::EaseInBack => "cubic-bezier(0.36, 0, 0.66, -0.56)",
            Easing::EaseOutBack => "cubic-bezier(0.34, 1.56, 0.64, 1)",
            Easing::EaseInOutBack => "cubic-bezier(0.68, -0.6, 0.32, 1.6)",
            Easing::EaseInElastic
            | Easing::EaseOutElastic
            | Easing::EaseInOutElastic
            | Easing::EaseInBounce
            | Easing::EaseOutBounce
            | Easing::EaseInOutBounce => return None,
        })
    }
}

/// Name → curve table, built once.
pub static EASING_NAMES: Lazy<IndexMap<&'static str, Easing>> =
    Lazy::new(|| Easing::ALL.iter().map(|e| (e.name(), *e)).collect());

#[inline]
fn in_out_pow(t: f64, p: i32) -> f64 {
    if t < 0.5 {
        2f64.powi(p - 1) * t.powi(p)
    } else {
        1.0 - (-2.0 * t + 2.0).powi(p) / 2.0
    }
}

fn bounce_out(t: f64) -> f64 {
    if t < 1.0 / BOUNCE_D1 {
        BOUNCE_N1 * t * t
    } else if t < 2.0 / BOUNCE_D1 {
        let t = t - 1.5 / BOUNCE_D1;
        BOUNCE_N1 * t * t + 0.75
    } else if t < 2.5 / BOUNCE_D1 {
        let t = t - 2.25 / BOUNCE_D1;
        BOUNCE_N1 * t * t + 0.9375
    } else {
        let t = t - 2.625 / BOUNCE_D1;
        BOUNCE_N1 * t * t + 0.984375
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn every_curve_hits_its_endpoints() {
        for easing in Easing::ALL {
            assert_abs_diff_eq!(easing.apply(0.0), 0.0, epsilon = 1e-9);
            assert_abs_diff_eq!(easing.apply(1.0), 1.0, epsilon = 1e-9);
        }
    }

    #[test]
    fn in_out_curves_are_symmetric_at_half() {
        for easing in [
            Easing::EaseInOutQuad,
            Easing::EaseInOutCubic,
            Easing::EaseInOutSine,
            Easing::EaseInOutCirc,
            Easing::EaseInOutExpo,
        ] {
            assert_abs_diff_eq!(easing.apply(0.5), 0.5, epsilon = 1e-9);
        }
    }

    #[test]
    fn known_values() {
        assert_abs_diff_eq!(Easing::EaseInOutCubic.apply(0.25), 0.0625, epsilon = 1e-12);
        assert_abs_diff_eq!(Easing::EaseOutQuad.apply(0.5), 0.75, epsilon = 1e-12);
        assert!(Easing::EaseInBack.apply(0.2) < 0.0);
        assert!(Easing::EaseOutBack.apply(0.8) > 1.0);
    }

    #[test]
    fn names_round_trip_through_the_table() {
        for easing in Easing::ALL {
            assert_eq!(Easing::from_name(easing.name()).unwrap(), easing);
        }
        assert!(Easing::from_name("wobble").is_err());
        assert_eq!(EASING_NAMES.len(), Easing::ALL.len());
    }

    #[test]
    fn css_equivalents() {
        assert_eq!(Easing::Linear.css(), Some("linear"));
        assert!(Easing::EaseOutBounce.css().is_none());
        assert_eq!(perspective(), "1000px");
    }
}
