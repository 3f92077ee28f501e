//! # PERIODIC Shared
//!
//! Math types and constants used by both the layout generator and the
//! transition scheduler.
//!
//! ## CRITICAL RULE
//!
//! This crate must NEVER depend on:
//! - a render back-end
//! - a random number generator
//! - anything with side effects
//!
//! Layout math built on these types has to stay bit-for-bit reproducible.

#![deny(unsafe_code)]
#![warn(missing_docs)]

pub mod constants;
pub mod math;

pub use constants::{
    DEFAULT_BASE_DURATION_MS, FRAME_INTERVAL_MS, GRID_CAPACITY, SCATTER_EXTENT,
};
pub use math::{EulerAngles, Quaternion, RotationBasis, Transform, Vec3};
