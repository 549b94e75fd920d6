//! State store error types.

use thiserror::Error;

/// State store errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StateError {
    /// Keys must be non-empty
    #[error("Invalid state key: {0:?}")]
    InvalidKey(String),

    /// Write attempted against a read-only view
    #[error("State view is read-only, cannot write key {0}")]
    ReadOnly(String),

    /// Backing store failure
    #[error("State backend error: {0}")]
    Backend(String),
}

/// Result type for state store operations
pub type StateResult<T> = Result<T, StateError>;
