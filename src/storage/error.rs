//! Store error types
//!
//! Every store operation either succeeds or fails with exactly one of these,
//! leaving the store unchanged.

use thiserror::Error;

/// Errors returned by the post store
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    /// A post with this ID already exists
    #[error("A post with ID {0} already exists")]
    Conflict(String),

    /// No post with this ID
    #[error("A post with ID {0} cannot be found")]
    NotFound(String),
}

/// Result type alias for store operations
pub type StoreResult<T> = Result<T, StoreError>;
