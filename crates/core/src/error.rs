//! Error types for the core crate
//!
//! Two families live here:
//! - [`StoreError`]: anything the ledger interface reports
//! - [`CodecError`]: product encode/decode failures
//!
//! We use `thiserror` for automatic `Display` and `Error` trait implementations.

use thiserror::Error;

/// Result type alias for ledger operations
pub type StoreResult<T> = std::result::Result<T, StoreError>;

/// Errors reported by a ledger implementation
///
/// The message of `Backend` is surfaced to callers verbatim.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum StoreError {
    /// Simple key rejected by the ledger
    #[error("invalid key {key:?}: {reason}")]
    InvalidKey {
        /// Offending key
        key: String,
        /// Why it was rejected
        reason: String,
    },

    /// Composite key could not be built or split
    #[error("invalid composite key: {reason}")]
    InvalidCompositeKey {
        /// Why it was rejected
        reason: String,
    },

    /// Failure inside the storage backend
    #[error("{0}")]
    Backend(String),
}

impl StoreError {
    /// Build an `InvalidKey` error
    pub fn invalid_key(key: impl Into<String>, reason: impl Into<String>) -> Self {
        StoreError::InvalidKey {
            key: key.into(),
            reason: reason.into(),
        }
    }

    /// Build an `InvalidCompositeKey` error
    pub fn invalid_composite(reason: impl Into<String>) -> Self {
        StoreError::InvalidCompositeKey {
            reason: reason.into(),
        }
    }
}

/// Product serialization errors
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum CodecError {
    /// Product could not be encoded
    #[error("encode error: {0}")]
    Encode(String),

    /// Stored bytes are not a valid product
    #[error("decode error: {0}")]
    Decode(String),
}
