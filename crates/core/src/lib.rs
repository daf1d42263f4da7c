//! Core types and traits for Waybill
//!
//! This crate defines the foundational types used throughout the system:
//! - Product: the tracked good and its JSON encoding
//! - ProductStatus: lifecycle states and the allowed transitions
//! - Timestamp: microsecond-precision UTC instants rendered as RFC 3339
//! - Composite keys: `create_composite_key` / `split_composite_key`
//! - Scan: scoped iteration handle with guaranteed release
//! - Traits: `WorldState` and `Ledger`, the narrow store interface
//! - Errors: `StoreError` and `CodecError`

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod error;
pub mod key;
pub mod product;
pub mod scan;
pub mod timestamp;
pub mod traits;

pub use error::{CodecError, StoreError, StoreResult};
pub use key::{
    create_composite_key, partial_composite_range, split_composite_key, validate_simple_key,
    COMPOSITE_KEY_NAMESPACE, MAX_UNICODE_RUNE,
};
pub use product::{Product, ProductStatus};
pub use scan::Scan;
pub use timestamp::Timestamp;
pub use traits::{KeyModification, KeyValue, Ledger, WorldState};
