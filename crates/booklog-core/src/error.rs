//! Domain error types.

use thiserror::Error;

/// Rejection reasons for a book candidate. Raised before anything is
/// persisted.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// A required field is empty or absent.
    #[error("missing required field: {0}")]
    MissingField(&'static str),

    /// The page count is not a positive integer.
    #[error("invalid page count {0:?}: expected a positive integer")]
    InvalidPages(String),

    /// The genre is not part of the canonical genre set.
    #[error("unknown genre {0:?}")]
    UnknownGenre(String),
}

/// Top-level domain error type.
#[derive(Debug, Error)]
pub enum DomainError {
    /// The book candidate failed validation.
    #[error("validation error: {0}")]
    Validation(#[from] ValidationError),

    /// The key-value store failed to read or write.
    #[error("storage error: {0}")]
    Storage(String),

    /// A persisted entry could not be decoded.
    #[error("corrupt entry {key:?}: {reason}")]
    CorruptEntry {
        /// The store key holding the unreadable value.
        key: String,
        /// Why decoding failed.
        reason: String,
    },
}
