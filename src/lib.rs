//! Waybill - supply-chain product tracking over a versioned key-value ledger
//!
//! A product moves `Produced → InTransit → Delivered`. Every transition is
//! validated, written atomically together with its `status~key` index
//! entry, and remains visible in the key's revision history.
//!
//! # Quick Start
//!
//! ```
//! use waybill::{Executor, MemoryLedger};
//!
//! let executor = Executor::new(MemoryLedger::new());
//! executor.invoke("createProduct", &["PRODUCT1", "p-1", "Widget", "tools", "Acme"]);
//! executor.invoke("changeProductStatus", &["PRODUCT1", "FastFreight", ""]);
//!
//! let history = executor.invoke("getHistoryForProduct", &["PRODUCT1"]);
//! assert_eq!(history.payload_json().unwrap().as_array().unwrap().len(), 2);
//! ```
//!
//! # Architecture
//!
//! All invocations go through the [`Executor`], which parses a function name
//! and its arguments into a [`Command`] and runs it in one transaction on a
//! [`Ledger`]. [`MemoryLedger`] is the in-memory reference ledger; any other
//! store plugs in by implementing [`Ledger`] and [`WorldState`].

// Re-export the public API from waybill-executor
pub use waybill_executor::*;

// Model and store interface from waybill-core
pub use waybill_core::{
    create_composite_key, split_composite_key, KeyModification, KeyValue, Ledger, Product,
    ProductStatus, Scan, StoreError, StoreResult, Timestamp, WorldState,
};

// Reference ledger from waybill-storage
pub use waybill_storage::{MemoryLedger, MemoryTxn, Revision};
