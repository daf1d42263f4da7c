//! MemoryLedger: in-memory versioned ledger
//!
//! This module implements the `Ledger` and `WorldState` traits using:
//! - `BTreeMap<String, Vec<Revision>>` for ordered keys with full history
//! - `parking_lot::RwLock` for thread-safe access
//! - `AtomicU64` for monotonically increasing commit versions
//!
//! # Design Notes
//!
//! - **Buffered writes**: a `MemoryTxn` records puts and deletes in its own
//!   write set; reads overlay that set on committed state
//! - **Atomic commit**: the whole write set is appended under one write lock,
//!   every key getting the same commit version, transaction id and timestamp
//! - **Read validation**: a `MemoryTxn` remembers the version of every
//!   committed key it reads; commit fails if any of them has moved since
//! - **Rollback**: dropping a transaction without committing discards it
//! - **Point-in-time scans**: a scan copies its range when opened, so later
//!   commits are not observed; open scans are counted until released

use std::collections::BTreeMap;
use std::fmt;
use std::ops::Bound;
use std::sync::atomic::{AtomicU64, AtomicUsize, Ordering};
use std::sync::Arc;

use parking_lot::{Mutex, RwLock};
use tracing::debug;
use uuid::Uuid;

use waybill_core::{
    KeyModification, KeyValue, Ledger, Scan, StoreError, StoreResult, Timestamp, WorldState,
};

use crate::revision::Revision;

#[derive(Debug, Default)]
struct Inner {
    /// Revision chain per key, oldest first
    data: RwLock<BTreeMap<String, Vec<Revision>>>,
    /// Last assigned commit version
    version: AtomicU64,
    /// Scans handed out and not yet released
    open_scans: AtomicUsize,
}

impl Inner {
    fn current(chain: &[Revision]) -> Option<&Vec<u8>> {
        chain.last().and_then(|rev| rev.value.as_ref())
    }

    /// Version of the latest revision, 0 for a key never written
    fn chain_version(chain: Option<&Vec<Revision>>) -> u64 {
        chain.and_then(|c| c.last()).map_or(0, |rev| rev.version)
    }

    fn scan_opened(self: &Arc<Self>) -> impl FnOnce() + 'static {
        self.open_scans.fetch_add(1, Ordering::SeqCst);
        let inner = Arc::clone(self);
        move || {
            inner.open_scans.fetch_sub(1, Ordering::SeqCst);
        }
    }
}

fn validate_key(key: &str) -> StoreResult<()> {
    if key.is_empty() {
        return Err(StoreError::invalid_key(key, "key cannot be empty"));
    }
    Ok(())
}

/// Bounds for `[start, end)`, `None` when the range is empty.
/// An empty `end` means unbounded.
fn range_bounds(start: &str, end: &str) -> Option<(Bound<String>, Bound<String>)> {
    if end.is_empty() {
        return Some((Bound::Included(start.to_string()), Bound::Unbounded));
    }
    if start >= end {
        return None;
    }
    Some((
        Bound::Included(start.to_string()),
        Bound::Excluded(end.to_string()),
    ))
}

/// In-memory ledger with per-key revision history
///
/// Cloning is cheap and clones share state.
///
/// # Example
///
/// ```
/// use waybill_core::{Ledger, WorldState};
/// use waybill_storage::MemoryLedger;
///
/// let ledger = MemoryLedger::new();
/// let mut txn = ledger.begin().unwrap();
/// txn.put_state("PRODUCT1", b"{}".to_vec()).unwrap();
/// ledger.commit(txn).unwrap();
///
/// assert_eq!(ledger.get("PRODUCT1"), Some(b"{}".to_vec()));
/// ```
#[derive(Debug, Clone, Default)]
pub struct MemoryLedger {
    inner: Arc<Inner>,
}

impl MemoryLedger {
    /// Create an empty ledger
    pub fn new() -> Self {
        Self::default()
    }

    /// Highest commit version assigned so far (0 before the first commit)
    pub fn current_version(&self) -> u64 {
        self.inner.version.load(Ordering::SeqCst)
    }

    /// Number of scans that have been opened and not yet released
    pub fn open_scans(&self) -> usize {
        self.inner.open_scans.load(Ordering::SeqCst)
    }

    /// Committed current value of a key
    pub fn get(&self, key: &str) -> Option<Vec<u8>> {
        let data = self.inner.data.read();
        data.get(key).and_then(|chain| Inner::current(chain).cloned())
    }

    /// Every committed revision of a key, oldest first
    pub fn revisions(&self, key: &str) -> Vec<Revision> {
        let data = self.inner.data.read();
        data.get(key).cloned().unwrap_or_default()
    }

    /// Number of keys whose current revision is not a tombstone
    pub fn live_keys(&self) -> usize {
        let data = self.inner.data.read();
        data.values()
            .filter(|chain| Inner::current(chain).is_some())
            .count()
    }

    fn next_version(&self) -> u64 {
        self.inner.version.fetch_add(1, Ordering::SeqCst) + 1
    }
}

impl Ledger for MemoryLedger {
    type Txn = MemoryTxn;

    fn begin(&self) -> StoreResult<MemoryTxn> {
        let txn = MemoryTxn {
            ledger: Arc::clone(&self.inner),
            tx_id: Uuid::new_v4().simple().to_string(),
            timestamp: Timestamp::now(),
            writes: BTreeMap::new(),
            reads: Mutex::new(BTreeMap::new()),
        };
        debug!(target: "waybill::ledger", tx_id = %txn.tx_id, "Transaction started");
        Ok(txn)
    }

    fn commit(&self, mut txn: MemoryTxn) -> StoreResult<()> {
        if !Arc::ptr_eq(&txn.ledger, &self.inner) {
            return Err(StoreError::Backend(format!(
                "transaction {} was not opened by this ledger",
                txn.tx_id
            )));
        }

        let writes = std::mem::take(&mut txn.writes);
        if writes.is_empty() {
            return Ok(());
        }
        let reads = std::mem::take(txn.reads.get_mut());

        // Hold the write lock for the whole set so no reader sees half of it
        let mut data = self.inner.data.write();

        for (key, read_version) in &reads {
            let current = Inner::chain_version(data.get(key));
            if current != *read_version {
                debug!(
                    target: "waybill::ledger",
                    tx_id = %txn.tx_id,
                    key = %key,
                    read_version,
                    current,
                    "Transaction invalidated"
                );
                return Err(StoreError::Backend(format!(
                    "MVCC read conflict on key '{}': read version {}, current version {}",
                    key, read_version, current
                )));
            }
        }

        let mut version = None;
        for (key, value) in writes {
            let chain = data.entry(key).or_default();
            if value.is_none() && Inner::current(chain).is_none() {
                // Deleting an absent key leaves no revision
                continue;
            }
            let version = *version.get_or_insert_with(|| self.next_version());
            chain.push(Revision {
                version,
                tx_id: txn.tx_id.clone(),
                timestamp: txn.timestamp,
                value,
            });
        }
        data.retain(|_, chain| !chain.is_empty());

        match version {
            Some(version) => debug!(
                target: "waybill::ledger",
                tx_id = %txn.tx_id,
                version,
                "Transaction committed"
            ),
            None => debug!(
                target: "waybill::ledger",
                tx_id = %txn.tx_id,
                "Transaction committed with no effect"
            ),
        }
        Ok(())
    }
}

/// An open transaction on a [`MemoryLedger`]
pub struct MemoryTxn {
    ledger: Arc<Inner>,
    tx_id: String,
    timestamp: Timestamp,
    /// Pending writes; `None` marks a deletion
    writes: BTreeMap<String, Option<Vec<u8>>>,
    /// Committed version of each key read, checked again at commit
    reads: Mutex<BTreeMap<String, u64>>,
}

impl MemoryTxn {
    /// Number of buffered writes
    pub fn pending_writes(&self) -> usize {
        self.writes.len()
    }
}

impl fmt::Debug for MemoryTxn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MemoryTxn")
            .field("tx_id", &self.tx_id)
            .field("timestamp", &self.timestamp)
            .field("pending_writes", &self.writes.len())
            .finish()
    }
}

impl Drop for MemoryTxn {
    fn drop(&mut self) {
        if !self.writes.is_empty() {
            debug!(
                target: "waybill::ledger",
                tx_id = %self.tx_id,
                discarded = self.writes.len(),
                "Transaction rolled back"
            );
        }
    }
}

impl WorldState for MemoryTxn {
    fn tx_id(&self) -> &str {
        &self.tx_id
    }

    fn tx_timestamp(&self) -> Timestamp {
        self.timestamp
    }

    fn get_state(&self, key: &str) -> StoreResult<Option<Vec<u8>>> {
        validate_key(key)?;
        if let Some(pending) = self.writes.get(key) {
            return Ok(pending.clone());
        }
        let data = self.ledger.data.read();
        let chain = data.get(key);
        self.reads
            .lock()
            .entry(key.to_string())
            .or_insert_with(|| Inner::chain_version(chain));
        Ok(chain.and_then(|chain| Inner::current(chain).cloned()))
    }

    fn put_state(&mut self, key: &str, value: Vec<u8>) -> StoreResult<()> {
        validate_key(key)?;
        self.writes.insert(key.to_string(), Some(value));
        Ok(())
    }

    fn delete_state(&mut self, key: &str) -> StoreResult<()> {
        validate_key(key)?;
        self.writes.insert(key.to_string(), None);
        Ok(())
    }

    fn scan_range(&self, start: &str, end: &str) -> StoreResult<Scan<'_, KeyValue>> {
        let Some(bounds) = range_bounds(start, end) else {
            return Ok(Scan::from_vec(Vec::new()));
        };

        let mut view: BTreeMap<String, Vec<u8>> = {
            let data = self.ledger.data.read();
            data.range(bounds.clone())
                .filter_map(|(k, chain)| Inner::current(chain).map(|v| (k.clone(), v.clone())))
                .collect()
        };
        for (key, pending) in self.writes.range(bounds) {
            match pending {
                Some(value) => {
                    view.insert(key.clone(), value.clone());
                }
                None => {
                    view.remove(key);
                }
            }
        }

        let items = view
            .into_iter()
            .map(|(key, value)| Ok(KeyValue { key, value }));
        Ok(Scan::with_release(items, self.ledger.scan_opened()))
    }

    fn history_for_key(&self, key: &str) -> StoreResult<Scan<'_, KeyModification>> {
        validate_key(key)?;
        let modifications: Vec<KeyModification> = {
            let data = self.ledger.data.read();
            data.get(key)
                .map(|chain| chain.iter().map(Revision::to_modification).collect())
                .unwrap_or_default()
        };
        Ok(Scan::with_release(
            modifications.into_iter().map(Ok),
            self.ledger.scan_opened(),
        ))
    }
}
