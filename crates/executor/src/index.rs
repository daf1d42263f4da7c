//! Secondary index from status to record key.
//!
//! Each current product has exactly one entry,
//! `compositeKey("status~key", [status, record_key])`, holding a single
//! marker byte. The primary record and its entry are always written in the
//! same transaction, so a committed ledger never shows one without the other
//! unless the primary was removed outside the dispatcher.

use tracing::trace;
use waybill_core::{
    create_composite_key, split_composite_key, ProductStatus, Scan, StoreError, StoreResult,
    WorldState,
};

/// Object type of index entries
pub const INDEX_NAME: &str = "status~key";

/// Value stored at every index entry; never read back
pub const INDEX_MARKER: &[u8] = &[0x00];

/// Status index operations
#[derive(Debug, Clone, Copy, Default)]
pub struct StatusIndex;

impl StatusIndex {
    /// Ledger key of the entry for `(status, key)`
    pub fn entry_key(status: ProductStatus, key: &str) -> StoreResult<String> {
        create_composite_key(INDEX_NAME, &[status.as_str(), key])
    }

    /// Add the entry for a product entering `status`
    pub fn index<S: WorldState + ?Sized>(
        state: &mut S,
        status: ProductStatus,
        key: &str,
    ) -> StoreResult<()> {
        let entry = Self::entry_key(status, key)?;
        state.put_state(&entry, INDEX_MARKER.to_vec())?;
        trace!(target: "waybill::index", key, %status, "Index entry added");
        Ok(())
    }

    /// Move a product's entry from `from` to `to`
    ///
    /// The old entry is deleted before the new one is written, both in the
    /// caller's transaction.
    pub fn reindex<S: WorldState + ?Sized>(
        state: &mut S,
        key: &str,
        from: ProductStatus,
        to: ProductStatus,
    ) -> StoreResult<()> {
        let old_entry = Self::entry_key(from, key)?;
        let new_entry = Self::entry_key(to, key)?;
        state.delete_state(&old_entry)?;
        state.put_state(&new_entry, INDEX_MARKER.to_vec())?;
        trace!(target: "waybill::index", key, %from, %to, "Index entry moved");
        Ok(())
    }

    /// Record keys indexed under `status`, ascending
    pub fn keys_with_status<S: WorldState + ?Sized>(
        state: &S,
        status: ProductStatus,
    ) -> StoreResult<Scan<'_, String>> {
        let scan = state.state_by_partial_composite_key(INDEX_NAME, &[status.as_str()])?;
        Ok(scan.map_items(|item| {
            let entry = item?;
            let (_, attributes) = split_composite_key(&entry.key)?;
            match <[String; 2]>::try_from(attributes) {
                Ok([_, key]) => Ok(key),
                Err(attributes) => Err(StoreError::invalid_composite(format!(
                    "index entry has {} attributes, expected 2",
                    attributes.len()
                ))),
            }
        }))
    }
}
