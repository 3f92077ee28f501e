//! # Layout Error Types
//!
//! All errors that can occur while generating or selecting layouts.

use thiserror::Error;

/// Errors that can occur in the layout system.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LayoutError {
    /// An entity count below zero was supplied.
    #[error("entity count must not be negative, got {0}")]
    NegativeCount(i64),

    /// An entity count that does not fit the platform's index type.
    #[error("entity count {0} exceeds the addressable range")]
    CountOverflow(i64),

    /// A layout name that is not one of `table`, `sphere`, `helix`, `grid`.
    #[error("unknown layout: {0}")]
    UnknownLayout(String),
}

/// Result type for layout operations.
pub type LayoutResult<T> = Result<T, LayoutError>;
