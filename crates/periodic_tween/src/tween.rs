//! A single interpolation task: start value, end value, start time,
//! duration and easing.

use periodic_shared::{EulerAngles, Vec3};

use crate::easing::Easing;

/// Values a [`Tween`] can interpolate.
pub trait Lerp: Copy {
    /// Linear interpolation, `t` in `[0, 1]`.
    #[must_use]
    fn lerp(self, other: Self, t: f32) -> Self;
}

impl Lerp for Vec3 {
    fn lerp(self, other: Self, t: f32) -> Self {
        Vec3::lerp(self, other, t)
    }
}

impl Lerp for EulerAngles {
    fn lerp(self, other: Self, t: f32) -> Self {
        EulerAngles::lerp(self, other, t)
    }
}

/// Value-less tween, used by the render driver.
impl Lerp for () {
    fn lerp(self, _other: Self, _t: f32) -> Self {}
}

/// Result of sampling a tween at a point in time.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TweenSample<T> {
    /// Interpolated value.
    pub value: T,
    /// Linear time progress (0-1).
    pub progress: f64,
    /// True once progress reached 1.0; `value` is then exactly the end value.
    pub complete: bool,
}

/// Time-based interpolation between two values.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Tween<T> {
    from: T,
    to: T,
    start_ms: f64,
    duration_ms: f64,
    easing: Easing,
}

impl<T: Lerp> Tween<T> {
    /// Creates a tween starting at `start_ms`.
    #[must_use]
    pub const fn new(from: T, to: T, start_ms: f64, duration_ms: f64, easing: Easing) -> Self {
        Self {
            from,
            to,
            start_ms,
            duration_ms,
            easing,
        }
    }

    /// Time at which the tween completes.
    #[must_use]
    pub fn end_ms(&self) -> f64 {
        self.start_ms + self.duration_ms.max(0.0)
    }

    /// Samples the tween at `now_ms`.
    ///
    /// Returns `None` before the start time. Zero-length tweens complete
    /// on their first sample.
    #[must_use]
    pub fn sample(&self, now_ms: f64) -> Option<TweenSample<T>> {
        if now_ms < self.start_ms {
            return None;
        }

        let progress = if self.duration_ms > 0.0 {
            ((now_ms - self.start_ms) / self.duration_ms).min(1.0)
        } else {
            1.0
        };
        let complete = progress >= 1.0;

        let value = if complete {
            self.to
        } else {
            let eased = self.easing.apply(progress as f32);
            self.from.lerp(self.to, eased)
        };

        Some(TweenSample {
            value,
            progress,
            complete,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_linear_midpoint() {
        let tween = Tween::new(Vec3::ZERO, Vec3::new(10.0, 0.0, 0.0), 100.0, 100.0, Easing::Linear);
        let sample = tween.sample(150.0).unwrap();
        assert!((sample.value.x - 5.0).abs() < 1e-4);
        assert_eq!(sample.progress, 0.5);
        assert!(!sample.complete);
    }

    #[test]
    fn test_before_start_is_none() {
        let tween = Tween::new(Vec3::ZERO, Vec3::X, 100.0, 50.0, Easing::Linear);
        assert!(tween.sample(99.0).is_none());
    }

    #[test]
    fn test_completion_snaps_to_target() {
        let target = Vec3::new(1.0 / 3.0, -7.25, 1e6);
        let tween = Tween::new(Vec3::ZERO, target, 0.0, 10.0, Easing::ExponentialInOut);
        let sample = tween.sample(25.0).unwrap();
        assert!(sample.complete);
        assert_eq!(sample.progress, 1.0);
        assert_eq!(sample.value, target);
        assert_eq!(tween.end_ms(), 10.0);
    }

    #[test]
    fn test_zero_duration_completes_immediately() {
        let tween = Tween::new(Vec3::ZERO, Vec3::Y, 40.0, 0.0, Easing::Linear);
        let sample = tween.sample(40.0).unwrap();
        assert!(sample.complete);
        assert_eq!(sample.value, Vec3::Y);
    }
}
