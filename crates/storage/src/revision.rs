//! One committed revision of a key
//!
//! A key's revisions form an append-only chain. The last revision is the
//! current state; a tombstone means the key is currently absent.

use waybill_core::{KeyModification, Timestamp};

/// A committed value (or tombstone) with its transaction metadata
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Revision {
    /// Global commit version, strictly increasing across the ledger
    pub version: u64,
    /// Transaction that wrote the revision
    pub tx_id: String,
    /// Commit timestamp
    pub timestamp: Timestamp,
    /// Value written, `None` for a deletion
    pub value: Option<Vec<u8>>,
}

impl Revision {
    /// Whether this revision deletes the key
    #[inline]
    pub fn is_tombstone(&self) -> bool {
        self.value.is_none()
    }

    /// Contract view handed out by history scans
    pub fn to_modification(&self) -> KeyModification {
        KeyModification {
            tx_id: self.tx_id.clone(),
            value: self.value.clone(),
            timestamp: self.timestamp,
        }
    }
}
