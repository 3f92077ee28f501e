//! Output side of the transition engine.
//!
//! The render layer owns the mapping from transforms to on-screen
//! primitives. The manager only tells it when to draw and what the current
//! transforms are.

use periodic_shared::Transform;

use crate::request::{TransitionRequest, TransitionRequests};

/// Drawable area, in physical pixels.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Viewport {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
}

impl Viewport {
    /// Creates a viewport.
    #[must_use]
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// Width over height. Zero-height viewports report 1.0.
    #[must_use]
    pub fn aspect(self) -> f32 {
        if self.height == 0 {
            1.0
        } else {
            self.width as f32 / self.height as f32
        }
    }
}

/// What a render sink sees on each driven frame.
pub struct RenderFrame<'a> {
    now_ms: f64,
    transforms: &'a [Transform],
    requests: &'a TransitionRequests,
}

impl<'a> RenderFrame<'a> {
    pub(crate) fn new(now_ms: f64, transforms: &'a [Transform], requests: &'a TransitionRequests) -> Self {
        Self {
            now_ms,
            transforms,
            requests,
        }
    }

    /// Time of the tick that produced this frame.
    #[must_use]
    pub fn now_ms(&self) -> f64 {
        self.now_ms
    }

    /// Current transform of every entity, by index.
    #[must_use]
    pub fn transforms(&self) -> &'a [Transform] {
        self.transforms
    }

    /// Requests a new transition once this tick completes.
    pub fn request(&self, request: TransitionRequest) -> bool {
        self.requests.submit(request)
    }
}

/// Receives draw calls from the transition manager.
pub trait RenderSink {
    /// Draws the current transforms.
    fn render(&mut self, frame: &RenderFrame<'_>);

    /// Informs the sink that the drawable area changed.
    fn resize(&mut self, viewport: Viewport) {
        let _ = viewport;
    }
}

impl<F> RenderSink for F
where
    F: FnMut(&RenderFrame<'_>),
{
    fn render(&mut self, frame: &RenderFrame<'_>) {
        self(frame);
    }
}

/// Sink that draws nothing.
#[derive(Clone, Copy, Debug, Default)]
pub struct NullSink;

impl RenderSink for NullSink {
    fn render(&mut self, _frame: &RenderFrame<'_>) {}
}
