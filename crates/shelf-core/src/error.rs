//! Error types for Shelf core operations.
//!
//! Every failure the circulation engine can report is a variant here. None of
//! them terminate the process; the CLI layer maps them to user-facing messages
//! and returns to its menu.

use thiserror::Error;

use crate::storage::EntityKind;

/// Result type alias for Shelf operations.
pub type Result<T> = std::result::Result<T, ShelfError>;

/// Core error type for Shelf operations.
#[derive(Debug, Error)]
pub enum ShelfError {
    /// A record with the same unique key already exists
    #[error("{entity} {key} already exists")]
    DuplicateKey { entity: EntityKind, key: String },

    /// No book with the given ISBN
    #[error("Book not found: {0}")]
    BookNotFound(String),

    /// No member with the given ID
    #[error("Member not found: {0}")]
    MemberNotFound(String),

    /// No unreturned loan for the (ISBN, member) pair
    #[error("Active loan not found for ISBN {isbn} and member {member_id}")]
    ActiveLoanNotFound { isbn: String, member_id: String },

    /// Every copy of the book is on loan
    #[error("No copies available for ISBN {0}")]
    NoCopiesAvailable(String),

    /// A consistency rule between books and loans was broken
    #[error("Invariant violation: {0}")]
    InvariantViolation(String),

    /// Malformed caller input
    #[error("Validation error: {0}")]
    Validation(String),

    /// The principal's role does not permit the operation
    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    /// Credentials did not match
    #[error("Authentication failed")]
    AuthFailed,

    /// The password hasher itself failed
    #[error("Credential error: {0}")]
    Credential(String),

    /// Backing store error
    #[error("Storage error: {0}")]
    Storage(String),
}

impl From<std::io::Error> for ShelfError {
    fn from(err: std::io::Error) -> Self {
        ShelfError::Storage(err.to_string())
    }
}

impl From<csv::Error> for ShelfError {
    fn from(err: csv::Error) -> Self {
        ShelfError::Storage(format!("CSV error: {}", err))
    }
}

impl From<argon2::password_hash::Error> for ShelfError {
    fn from(err: argon2::password_hash::Error) -> Self {
        ShelfError::Credential(format!("Password hashing failed: {}", err))
    }
}
