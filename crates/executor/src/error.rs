//! Error types for command execution.
//!
//! All errors from command execution are represented by the [`Error`] enum.
//! These errors are:
//! - **Structured**: Each variant has typed fields for error details
//! - **Serializable**: Can be converted to/from JSON
//! - **Caller-facing**: The `Display` text is the message of an error [`Response`](crate::Response)

use serde::{Deserialize, Serialize};
use waybill_core::{CodecError, ProductStatus, StoreError};

/// Command execution errors.
///
/// # Categories
///
/// | Category | Variants | Description |
/// |----------|----------|-------------|
/// | Dispatch | `UnknownCommand`, `Arity` | Bad function name or argument count |
/// | Validation | `InvalidArgument`, `InvalidTransition`, `TerminalStatus` | Bad input or lifecycle move |
/// | Not Found / State | `ProductNotFound`, `ProductExists` | Entity existence |
/// | Encoding | `Encode`, `Decode` | Stored JSON could not be written or read |
/// | System | `Store`, `Config` | Ledger or configuration failures |
///
/// # Example
///
/// ```ignore
/// use waybill_executor::{Command, Error};
///
/// match executor.execute(cmd) {
///     Ok(output) => { /* handle success */ }
///     Err(Error::ProductNotFound { key }) => {
///         println!("no product at '{}'", key);
///     }
///     Err(e) => {
///         println!("Error: {}", e);
///     }
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, thiserror::Error)]
pub enum Error {
    // ==================== Dispatch ====================
    /// Function name is not one of the known commands
    #[error("Invalid function name: {name}")]
    UnknownCommand { name: String },

    /// Wrong number of arguments for the command
    #[error("Incorrect number of arguments. Expecting {expected}")]
    Arity { expected: usize, actual: usize },

    // ==================== Validation ====================
    /// An argument is malformed
    #[error("invalid argument: {reason}")]
    InvalidArgument { reason: String },

    /// The requested status change is not on the lifecycle path
    #[error("invalid transition for {key}: {from} -> {to}")]
    InvalidTransition {
        key: String,
        from: ProductStatus,
        to: ProductStatus,
    },

    /// The product has no further status to move to
    #[error("product {key} is {status}, which has no next status")]
    TerminalStatus { key: String, status: ProductStatus },

    // ==================== Not Found / State ====================
    /// No product is stored at the key
    #[error("product not found: {key}")]
    ProductNotFound { key: String },

    /// A product is already stored at the key
    #[error("product already exists: {key}")]
    ProductExists { key: String },

    // ==================== Encoding ====================
    /// A product could not be serialized
    #[error("encode error: {reason}")]
    Encode { reason: String },

    /// A stored record could not be parsed
    #[error("decode error: {reason}")]
    Decode { reason: String },

    // ==================== System ====================
    /// The ledger reported a failure; its message is passed through unchanged
    #[error("{reason}")]
    Store { reason: String },

    /// Configuration could not be read or is invalid
    #[error("config error: {reason}")]
    Config { reason: String },
}

impl From<StoreError> for Error {
    fn from(err: StoreError) -> Self {
        Error::Store {
            reason: err.to_string(),
        }
    }
}

impl From<CodecError> for Error {
    fn from(err: CodecError) -> Self {
        match err {
            CodecError::Encode(reason) => Error::Encode { reason },
            CodecError::Decode(reason) => Error::Decode { reason },
        }
    }
}
