//! Storage layer for Waybill
//!
//! This crate implements the in-memory reference ledger:
//! - MemoryLedger: BTreeMap of per-key revision chains behind a `parking_lot::RwLock`
//! - MemoryTxn: buffered write set with read-your-writes, applied at commit
//! - Revision: one committed value or tombstone
//!
//! It is the store the executor is exercised against. It keeps every
//! revision in memory and makes no durability promises.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod ledger;
pub mod revision;

pub use ledger::{MemoryLedger, MemoryTxn};
pub use revision::Revision;
