//! # PERIODIC Layouts
//!
//! Pure, deterministic target generation for the four card arrangements.
//!
//! ## Architecture
//!
//! ```text
//! entity count N ──> LayoutGenerator ──> LayoutSet (cached, immutable)
//!                     table  / sphere        │
//!                     helix  / grid          └──> Arc<[Transform]> per LayoutName
//! ```
//!
//! Nothing in this crate allocates after [`LayoutSet::generate`] returns,
//! and nothing in it can observe time or randomness.

#![deny(unsafe_code)]
#![warn(missing_docs)]

pub mod error;
pub mod generator;
pub mod name;
pub mod set;

pub use error::{LayoutError, LayoutResult};
pub use generator::{validate_count, LayoutGenerator};
pub use name::LayoutName;
pub use set::{helix_steps, LayoutSet};
