use std::path::PathBuf;

use thiserror::Error;

/// Errors surfaced by the typed store.
///
/// Scalar reads never return these; they fall back to the caller's default.
/// Only lifecycle operations and record reads do.
#[derive(Debug, Error)]
pub enum TypedError {
    /// No container is open.
    #[error("no container is open")]
    NotOpen,

    /// The value does not exist in the open container.
    #[error("value not found: {name}")]
    NotFound { name: String },

    /// A stored record decodes to the wrong number of bytes.
    #[error("record size mismatch for {name}: expected {expected} bytes, decoded {actual}")]
    SizeMismatch {
        name: String,
        expected: usize,
        actual: usize,
    },

    /// The backing store failed.
    #[error("store error: {0}")]
    Store(#[from] regkit_store::StoreError),

    /// The configuration could not be loaded.
    #[error("config error: {0}")]
    Config(#[from] ConfigError),
}

/// Errors loading a [`TypedStoreConfig`](crate::TypedStoreConfig).
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("cannot read {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("invalid config: {0}")]
    Parse(#[from] toml::de::Error),
}

pub type TypedResult<T> = Result<T, TypedError>;
