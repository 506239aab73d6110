//! Service error types
//!
//! Separates errors caused by bad user input from runtime errors, so the
//! transport can answer 4xx or 5xx accordingly.

use crate::service::{MAX_AUTHOR_LENGTH, MAX_EMAIL_LENGTH, MAX_MESSAGE_LENGTH};
use crate::storage::StoreError;
use thiserror::Error;

/// Errors returned by [`PostService`](crate::service::PostService)
#[derive(Error, Debug)]
pub enum ServiceError {
    #[error("Invalid ID (should not be empty)")]
    InvalidId,

    #[error("Invalid author (should not be empty or longer than {} characters)", MAX_AUTHOR_LENGTH)]
    InvalidAuthor,

    #[error("Invalid email (should not be empty or longer than {} characters)", MAX_EMAIL_LENGTH)]
    InvalidEmail,

    #[error("Invalid message (should not be longer than {} characters)", MAX_MESSAGE_LENGTH)]
    InvalidMessage,

    #[error("Invalid cursor")]
    InvalidCursor(#[source] crate::service::cursor::CursorError),

    #[error("Invalid page size (should not be larger than {max})")]
    InvalidPageSize { max: usize },

    /// Error from the store
    #[error(transparent)]
    Store(#[from] StoreError),

    /// A cursor handed out by the store couldn't be encoded
    #[error("Error while encoding next cursor: {0}")]
    CursorEncoding(#[source] crate::service::cursor::CursorError),
}

impl ServiceError {
    /// Check if the error was caused by malformed user input, as opposed to
    /// a runtime error
    pub fn is_user_error(&self) -> bool {
        match self {
            ServiceError::InvalidId
            | ServiceError::InvalidAuthor
            | ServiceError::InvalidEmail
            | ServiceError::InvalidMessage
            | ServiceError::InvalidCursor(_)
            | ServiceError::InvalidPageSize { .. } => true,
            ServiceError::Store(StoreError::NotFound(_)) => true,
            // IDs are generated by the service, a conflict is our fault
            ServiceError::Store(StoreError::Conflict(_)) => false,
            ServiceError::CursorEncoding(_) => false,
        }
    }

    /// Check if the error means the requested post doesn't exist
    pub fn is_not_found(&self) -> bool {
        matches!(self, ServiceError::Store(StoreError::NotFound(_)))
    }
}

/// Result type alias for service operations
pub type ServiceResult<T> = Result<T, ServiceError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_errors() {
        assert!(ServiceError::InvalidAuthor.is_user_error());
        assert!(ServiceError::InvalidPageSize { max: 100 }.is_user_error());
        assert!(ServiceError::Store(StoreError::NotFound("x".into())).is_user_error());
        assert!(!ServiceError::Store(StoreError::Conflict("x".into())).is_user_error());
    }

    #[test]
    fn test_error_display() {
        assert_eq!(
            ServiceError::InvalidAuthor.to_string(),
            "Invalid author (should not be empty or longer than 256 characters)"
        );
        assert_eq!(
            ServiceError::InvalidPageSize { max: 100 }.to_string(),
            "Invalid page size (should not be larger than 100)"
        );
        assert_eq!(
            ServiceError::Store(StoreError::NotFound("x".into())).to_string(),
            "A post with ID x cannot be found"
        );
    }
}
