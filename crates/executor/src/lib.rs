//! # Waybill Executor
//!
//! The contract layer of Waybill: product lifecycle commands over any
//! [`Ledger`](waybill_core::Ledger).
//!
//! It provides:
//! - [`Executor`] - Parses invocations, runs each in one ledger transaction
//! - [`Command`]/[`Output`] - Typed command interface
//! - [`Response`] - Status, payload and message of an invocation
//! - [`StatusIndex`] - The `status~key` secondary index
//! - [`ContractConfig`] - `waybill.toml` settings
//!
//! ## Quick Start
//!
//! ```text
//! use waybill_executor::Executor;
//! use waybill_storage::MemoryLedger;
//!
//! let executor = Executor::new(MemoryLedger::new());
//! executor.invoke("createProduct", &["PRODUCT1", "p-1", "Widget", "tools", "Acme"]);
//! executor.invoke("changeProductStatus", &["PRODUCT1", "FastFreight", ""]);
//!
//! let in_transit = executor.invoke("queryProductByStatus", &["InTransit"]);
//! ```
//!
//! ## Commands
//!
//! | Function | Arguments | Payload |
//! |----------|-----------|---------|
//! | `queryProduct` | key | product |
//! | `createProduct` | key, productid, name, class, producer | product |
//! | `queryAllProduct` | | `[{"Key", "Record"}]` |
//! | `changeProductStatus` | key, transporter, status | product |
//! | `getHistoryForProduct` | key | `[{"TxId", "Value", "Timestamp", "IsDelete"}]` |
//! | `queryProductByStatus` | status | `[product]` |

#![warn(missing_docs)]

mod command;
mod config;
mod error;
mod executor;
mod index;
mod output;
mod response;

// Handler modules
pub mod handlers;


// =============================================================================
// Public API
// =============================================================================

pub use command::{Command, CommandKind};
pub use config::{ContractConfig, CONFIG_FILE_NAME};
pub use error::Error;
pub use executor::Executor;
pub use index::{StatusIndex, INDEX_MARKER, INDEX_NAME};
pub use output::{HistoryEntry, KeyedRecord, Output};
pub use response::{Response, ResponseStatus};

/// Result type for executor operations
pub type Result<T> = std::result::Result<T, Error>;
