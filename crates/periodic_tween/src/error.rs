//! # Transition Error Types

use thiserror::Error;

/// Errors that can occur when scheduling a transition.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum TweenError {
    /// Base duration was negative, NaN or infinite.
    #[error("base duration must be a finite, non-negative number of milliseconds, got {0}")]
    InvalidDuration(f64),
}

/// Result type for transition operations.
pub type TweenResult<T> = Result<T, TweenError>;
