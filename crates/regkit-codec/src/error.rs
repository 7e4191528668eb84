//! Error types for the codecs that can fail.
//!
//! Base64 and numeric decoding never fail (they truncate or fall back), so
//! only pointer tokens and records have error types.

use thiserror::Error;

/// Reasons a pointer token cannot be resolved to an address.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PointerError {
    /// The token is not `<hex>_<decimal>`.
    #[error("malformed pointer token {token:?}: {reason}")]
    Malformed { token: String, reason: &'static str },

    /// The token was written by a different process.
    #[error("pointer token belongs to process {stored}, current process is {current}")]
    CrossProcess { stored: u32, current: u32 },
}

/// Reasons an encoded record cannot be decoded.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RecordError {
    /// There was no encoded text to decode.
    #[error("encoded record is empty")]
    Empty,

    /// The decoded byte count does not match the target record size.
    #[error("record size mismatch: expected {expected} bytes, decoded {actual}")]
    SizeMismatch { expected: usize, actual: usize },
}
