//! Render sink for headless runs: logs frame summaries instead of drawing.

use periodic_shared::{Transform, Vec3};
use periodic_tween::{RenderFrame, RenderSink, Viewport};

/// Axis-aligned box around a set of positions.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Bounds {
    /// Smallest coordinate on every axis.
    pub min: Vec3,
    /// Largest coordinate on every axis.
    pub max: Vec3,
}

impl Bounds {
    /// Box around every transform's position, `None` for an empty slice.
    #[must_use]
    pub fn of(transforms: &[Transform]) -> Option<Self> {
        let (first, rest) = transforms.split_first()?;
        let start = Self {
            min: first.position,
            max: first.position,
        };
        Some(rest.iter().fold(start, |bounds, transform| {
            let p = transform.position;
            Self {
                min: Vec3::new(bounds.min.x.min(p.x), bounds.min.y.min(p.y), bounds.min.z.min(p.z)),
                max: Vec3::new(bounds.max.x.max(p.x), bounds.max.y.max(p.y), bounds.max.z.max(p.z)),
            }
        }))
    }

    /// Edge lengths.
    #[must_use]
    pub fn size(&self) -> Vec3 {
        self.max - self.min
    }
}

/// Logs every frame at `trace` and keeps the latest bounds.
#[derive(Clone, Debug, Default)]
pub struct TraceSink {
    frames: u64,
    viewport: Option<Viewport>,
    last_bounds: Option<Bounds>,
}

impl TraceSink {
    /// Creates a sink.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Frames rendered so far.
    #[must_use]
    pub fn frames(&self) -> u64 {
        self.frames
    }

    /// Last viewport received.
    #[must_use]
    pub fn viewport(&self) -> Option<Viewport> {
        self.viewport
    }

    /// Bounds of the last rendered frame.
    #[must_use]
    pub fn last_bounds(&self) -> Option<Bounds> {
        self.last_bounds
    }
}

impl RenderSink for TraceSink {
    fn render(&mut self, frame: &RenderFrame<'_>) {
        self.frames += 1;
        self.last_bounds = Bounds::of(frame.transforms());
        if let Some(bounds) = self.last_bounds {
            let size = bounds.size();
            tracing::trace!(
                now_ms = frame.now_ms(),
                cards = frame.transforms().len(),
                width = size.x,
                height = size.y,
                depth = size.z,
                "frame"
            );
        }
    }

    fn resize(&mut self, viewport: Viewport) {
        tracing::debug!(width = viewport.width, height = viewport.height, aspect = viewport.aspect(), "resize");
        self.viewport = Some(viewport);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bounds() {
        let transforms = [
            Transform::at(Vec3::new(-1.0, 2.0, 0.0)),
            Transform::at(Vec3::new(3.0, -4.0, 5.0)),
            Transform::at(Vec3::new(0.0, 0.0, -5.0)),
        ];
        let bounds = Bounds::of(&transforms).unwrap();
        assert_eq!(bounds.min, Vec3::new(-1.0, -4.0, -5.0));
        assert_eq!(bounds.max, Vec3::new(3.0, 2.0, 5.0));
        assert_eq!(bounds.size(), Vec3::new(4.0, 6.0, 10.0));
    }

    #[test]
    fn test_empty_bounds() {
        assert_eq!(Bounds::of(&[]), None);
    }

    #[test]
    fn test_resize_recorded() {
        let mut sink = TraceSink::new();
        sink.resize(Viewport::new(800, 600));
        assert_eq!(sink.viewport(), Some(Viewport::new(800, 600)));
        assert_eq!(sink.frames(), 0);
    }
}
