//! Error types for store operations.

use thiserror::Error;

/// Errors that can occur while talking to a backing store.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The container path is not well formed.
    #[error("invalid container path {path:?}: {reason}")]
    InvalidPath { path: String, reason: String },

    /// The value name is not acceptable to the store.
    #[error("invalid value name {name:?}: {reason}")]
    InvalidValueName { name: String, reason: String },

    /// The handle was never issued by this store, or has been closed.
    #[error("invalid or closed handle: {0}")]
    InvalidHandle(u64),

    /// The persisted store could not be encoded or decoded.
    #[error("serialization error: {0}")]
    Serialization(String),

    /// I/O error from a file-backed store.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result alias for store operations.
pub type StoreResult<T> = Result<T, StoreError>;
