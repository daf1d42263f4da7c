//! History command handler.

use tracing::debug;
use waybill_core::{validate_simple_key, Product, WorldState};

use crate::output::HistoryEntry;
use crate::{Output, Result};

/// Handle getHistoryForProduct command.
///
/// Lists every committed revision of `key`, oldest first. Tombstones appear
/// with no value and `is_delete` set. An unknown key has an empty history.
pub fn history_for<S: WorldState + ?Sized>(state: &S, key: &str) -> Result<Output> {
    validate_simple_key(key)?;

    let mut entries = Vec::new();
    for item in state.history_for_key(key)? {
        let modification = item?;
        let value = modification
            .value
            .as_deref()
            .map(Product::decode)
            .transpose()?;
        entries.push(HistoryEntry {
            is_delete: modification.is_delete(),
            tx_id: modification.tx_id,
            value,
            timestamp: modification.timestamp,
        });
    }

    debug!(target: "waybill::query", key, count = entries.len(), "History read");
    Ok(Output::History(entries))
}
