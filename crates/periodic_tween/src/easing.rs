//! Easing curves applied to time progress before value interpolation.
//!
//! Transitions use `ExponentialInOut`: a slow start, a sharp middle and a
//! soft landing. The other curves exist for config overrides.

use serde::{Deserialize, Serialize};

/// Easing function type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Easing {
    /// Linear interpolation.
    Linear,
    /// Exponential ease-out (sharp snap to target).
    ExponentialOut,
    /// Exponential ease-in (accelerating).
    ExponentialIn,
    /// Exponential ease-in-out.
    #[default]
    ExponentialInOut,
}

impl Easing {
    /// Applies the easing function to a t value (0-1).
    ///
    /// Every curve is monotonic and maps 0 to 0 and 1 to 1.
    #[must_use]
    pub fn apply(self, t: f32) -> f32 {
        let t = t.clamp(0.0, 1.0);

        match self {
            Self::Linear => t,
            Self::ExponentialOut => {
                // 1 - 2^(-10t)
                if t >= 1.0 {
                    1.0
                } else {
                    1.0 - 2.0_f32.powf(-10.0 * t)
                }
            }
            Self::ExponentialIn => {
                // 2^(10(t-1))
                if t <= 0.0 {
                    0.0
                } else {
                    2.0_f32.powf(10.0 * (t - 1.0))
                }
            }
            Self::ExponentialInOut => {
                if t <= 0.0 {
                    0.0
                } else if t >= 1.0 {
                    1.0
                } else if t < 0.5 {
                    2.0_f32.powf(20.0 * t - 10.0) / 2.0
                } else {
                    (2.0 - 2.0_f32.powf(-20.0 * t + 10.0)) / 2.0
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_curve_pins_endpoints() {
        for easing in [Easing::Linear, Easing::ExponentialIn, Easing::ExponentialOut, Easing::ExponentialInOut] {
            assert_eq!(easing.apply(0.0), 0.0, "{easing:?}");
            assert_eq!(easing.apply(1.0), 1.0, "{easing:?}");
        }
    }

    #[test]
    fn test_in_out_is_symmetric_and_monotonic() {
        let easing = Easing::ExponentialInOut;
        assert!((easing.apply(0.5) - 0.5).abs() < 1e-6);

        let mut previous = 0.0;
        for step in 1..=100 {
            let value = easing.apply(step as f32 / 100.0);
            assert!(value >= previous, "not monotonic at step {step}");
            previous = value;
        }

        // Slow start, slow finish.
        assert!(easing.apply(0.1) < 0.01);
        assert!(easing.apply(0.9) > 0.99);
    }

    #[test]
    fn test_exponential_out_is_sharp() {
        let value = Easing::ExponentialOut.apply(0.3);
        assert!(value > 0.8, "Exponential out should snap quickly: {value}");
    }

    #[test]
    fn test_out_of_range_is_clamped() {
        assert_eq!(Easing::ExponentialInOut.apply(-3.0), 0.0);
        assert_eq!(Easing::ExponentialInOut.apply(7.0), 1.0);
    }
}
