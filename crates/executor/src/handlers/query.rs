//! Query command handlers.
//!
//! - queryAllProduct: key-range scan over primary records
//! - queryProductByStatus: status index scan joined to primary records
//!
//! Scans are consumed with `for` loops and `?`, so an early error drops the
//! scan handle and releases it.

use tracing::{debug, warn};
use waybill_core::{Product, ProductStatus, WorldState};

use crate::index::StatusIndex;
use crate::output::KeyedRecord;
use crate::{Output, Result};

/// Handle queryAllProduct command over `[start, end)`.
pub fn query_by_range<S: WorldState + ?Sized>(
    state: &S,
    start: &str,
    end: &str,
) -> Result<Output> {
    let mut records = Vec::new();
    for item in state.state_by_range(start, end)? {
        let entry = item?;
        let record = Product::decode(&entry.value)?;
        records.push(KeyedRecord {
            key: entry.key,
            record,
        });
    }

    debug!(target: "waybill::query", start, end, count = records.len(), "Range query");
    Ok(Output::Records(records))
}

/// Handle queryProductByStatus command.
///
/// Index entries whose primary record is missing, or whose record has since
/// moved to another status, are skipped.
pub fn query_by_status<S: WorldState + ?Sized>(
    state: &S,
    status: ProductStatus,
) -> Result<Output> {
    let mut products = Vec::new();
    for key in StatusIndex::keys_with_status(state, status)? {
        let key = key?;
        let Some(bytes) = state.get_state(&key)? else {
            warn!(
                target: "waybill::query",
                key = %key,
                %status,
                "Index entry without a primary record, skipped"
            );
            continue;
        };

        let product = Product::decode(&bytes)?;
        if product.status != status {
            warn!(
                target: "waybill::query",
                key = %key,
                indexed = %status,
                current = %product.status,
                "Stale index entry, skipped"
            );
            continue;
        }
        products.push(product);
    }

    debug!(target: "waybill::query", %status, count = products.len(), "Status query");
    Ok(Output::Products(products))
}
