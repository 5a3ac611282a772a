//! Errors raised by document store backends.

use thiserror::Error;

/// Errors that can occur when talking to the document store.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The MongoDB driver reported a failure (connectivity, auth, command error).
    #[error("Database error: {0}")]
    Database(#[from] mongodb::error::Error),

    /// A document with the same `_id` already exists in the collection.
    #[error("Duplicate key: {0}")]
    DuplicateKey(String),
}

/// Result type for document store operations.
pub type Result<T> = std::result::Result<T, StoreError>;
