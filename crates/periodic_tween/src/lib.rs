//! # PERIODIC Transitions
//!
//! Moves every card from wherever it is towards a newly selected layout,
//! with staggered per-card timing and a render driver that keeps the
//! screen redrawing until the slowest card can have landed.
//!
//! ## Architecture
//!
//! ```text
//! ┌────────────────────────────────────────────────────────────────┐
//! │                      TRANSITION PIPELINE                        │
//! ├────────────────────────────────────────────────────────────────┤
//! │ transform_to(targets) → ActiveTransitionSet → tick(now) → sink │
//! │        ↓                       ↓                  ↓            │
//! │  jittered durations     position/orientation   eased lerp      │
//! │  (RandomSource)         tasks + render driver  + retire        │
//! └────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Single-threaded and cooperative: the frame driver calls `tick`, nothing
//! here blocks or spawns.

#![deny(unsafe_code)]
#![warn(missing_docs)]

pub mod easing;
pub mod error;
pub mod manager;
pub mod random;
pub mod render;
pub mod request;
pub mod tween;

pub use easing::Easing;
pub use error::{TweenError, TweenResult};
pub use manager::{ActiveTransitionSet, TickReport, TransitionManager, TransitionPlan};
pub use random::{FixedSequence, RandomSource, RngSource};
pub use render::{NullSink, RenderFrame, RenderSink, Viewport};
pub use request::{TransitionRequest, TransitionRequests};
pub use tween::{Lerp, Tween, TweenSample};
