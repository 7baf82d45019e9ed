//! # Store Errors
//!
//! Persistence failures. These never reach the UI: the engine boundary
//! catches them, logs, and carries on with the in-memory state.

use thiserror::Error;

/// Errors from the persistence layer.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Underlying file I/O failed.
    #[error("storage I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A persisted payload could not be (de)serialized.
    #[error("storage serialization error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Convenience type alias for Results with StoreError.
pub type StoreResult<T> = Result<T, StoreError>;
