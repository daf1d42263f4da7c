//! Ledger Tests
//!
//! Tests for the in-memory reference ledger and how the contract behaves on
//! top of it:
//! - transaction atomicity and rollback
//! - composite keys and range isolation
//! - index entries whose primary record is gone
//! - concurrent invocations

mod atomicity;
mod concurrency;
mod index_consistency;
