//! Ledger traits
//!
//! The core never talks to a storage engine directly. It sees one open
//! transaction through [`WorldState`] and asks a [`Ledger`] to begin and
//! commit those transactions. Durability, ordering between concurrent
//! callers and replication all belong to the implementation.
//!
//! Contract every implementation must honour:
//! - Reads inside a transaction see that transaction's own writes
//! - The write set becomes visible atomically at commit
//! - Dropping an uncommitted transaction discards its write set
//! - Scans are point-in-time and ascending by key
//! - History lists committed revisions only, oldest first

use crate::error::StoreResult;
use crate::key::partial_composite_range;
use crate::scan::Scan;
use crate::timestamp::Timestamp;

/// Substitute for an empty range start, so unbounded scans skip composite keys
pub const EMPTY_KEY_SUBSTITUTE: &str = "\u{1}";

/// A key and its current value
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyValue {
    /// Ledger key
    pub key: String,
    /// Stored bytes
    pub value: Vec<u8>,
}

/// One committed revision of a key
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyModification {
    /// Transaction that wrote the revision
    pub tx_id: String,
    /// Value written, `None` for a deletion
    pub value: Option<Vec<u8>>,
    /// Commit time
    pub timestamp: Timestamp,
}

impl KeyModification {
    /// Whether this revision is a tombstone
    pub fn is_delete(&self) -> bool {
        self.value.is_none()
    }
}

/// One open ledger transaction
pub trait WorldState {
    /// Identifier of this transaction
    fn tx_id(&self) -> &str;

    /// Timestamp assigned to this transaction when it began
    fn tx_timestamp(&self) -> Timestamp;

    /// Current value of a key, including this transaction's own writes
    ///
    /// # Errors
    ///
    /// Returns an error if the key is invalid or the backend fails.
    fn get_state(&self, key: &str) -> StoreResult<Option<Vec<u8>>>;

    /// Buffer a write
    ///
    /// # Errors
    ///
    /// Returns an error if the key is invalid or the transaction is closed.
    fn put_state(&mut self, key: &str, value: Vec<u8>) -> StoreResult<()>;

    /// Buffer a deletion
    ///
    /// # Errors
    ///
    /// Returns an error if the key is invalid or the transaction is closed.
    fn delete_state(&mut self, key: &str) -> StoreResult<()>;

    /// Scan raw keys in `[start, end)` in ascending order
    ///
    /// An empty `end` means unbounded. No key validation is applied; callers
    /// use [`WorldState::state_by_range`] or
    /// [`WorldState::state_by_partial_composite_key`].
    ///
    /// # Errors
    ///
    /// Returns an error if the backend cannot open the scan.
    fn scan_range(&self, start: &str, end: &str) -> StoreResult<Scan<'_, KeyValue>>;

    /// Committed revisions of a key, oldest first
    ///
    /// # Errors
    ///
    /// Returns an error if the key is invalid or the backend fails.
    fn history_for_key(&self, key: &str) -> StoreResult<Scan<'_, KeyModification>>;

    /// Scan simple keys in `[start, end)`
    ///
    /// An empty `start` scans from the first simple key; composite keys are
    /// never returned.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend cannot open the scan.
    fn state_by_range(&self, start: &str, end: &str) -> StoreResult<Scan<'_, KeyValue>> {
        let start = if start.is_empty() {
            EMPTY_KEY_SUBSTITUTE
        } else {
            start
        };
        self.scan_range(start, end)
    }

    /// Scan every composite key that begins with `object_type` and `attributes`
    ///
    /// # Errors
    ///
    /// Returns an error if a component is not a valid composite key part.
    fn state_by_partial_composite_key(
        &self,
        object_type: &str,
        attributes: &[&str],
    ) -> StoreResult<Scan<'_, KeyValue>> {
        let (start, end) = partial_composite_range(object_type, attributes)?;
        self.scan_range(&start, &end)
    }
}

/// A store that hands out [`WorldState`] transactions
pub trait Ledger: Send + Sync {
    /// Transaction type
    type Txn: WorldState;

    /// Open a new transaction
    ///
    /// # Errors
    ///
    /// Returns an error if the backend cannot start a transaction.
    fn begin(&self) -> StoreResult<Self::Txn>;

    /// Apply a transaction's write set atomically
    ///
    /// # Errors
    ///
    /// Returns an error if the write set cannot be applied; nothing is
    /// written in that case.
    fn commit(&self, txn: Self::Txn) -> StoreResult<()>;
}
