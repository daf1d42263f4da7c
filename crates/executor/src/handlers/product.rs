//! Product command handlers.
//!
//! This module implements the single-product commands:
//! - queryProduct: Read the current record
//! - createProduct: Store a new product in `Produced` and index it
//! - changeProductStatus: Advance the lifecycle and move the index entry

use tracing::debug;
use waybill_core::{validate_simple_key, Product, ProductStatus, WorldState};

use crate::index::StatusIndex;
use crate::{Error, Output, Result};

/// Load and decode the product stored at `key`.
pub(crate) fn load<S: WorldState + ?Sized>(state: &S, key: &str) -> Result<Product> {
    validate_simple_key(key)?;
    let bytes = state
        .get_state(key)?
        .ok_or_else(|| Error::ProductNotFound {
            key: key.to_string(),
        })?;
    Ok(Product::decode(&bytes)?)
}

/// Handle queryProduct command.
pub fn query_product<S: WorldState + ?Sized>(state: &S, key: &str) -> Result<Output> {
    load(state, key).map(Output::Product)
}

/// Handle createProduct command.
///
/// Returns the product as stored.
pub fn create_product<S: WorldState + ?Sized>(
    state: &mut S,
    key: &str,
    product_id: String,
    name: String,
    class: String,
    producer: String,
) -> Result<Output> {
    validate_simple_key(key)?;
    if state.get_state(key)?.is_some() {
        return Err(Error::ProductExists {
            key: key.to_string(),
        });
    }

    let product = Product::produced(product_id, name, class, producer, state.tx_timestamp());
    state.put_state(key, product.encode()?)?;
    StatusIndex::index(state, product.status, key)?;

    debug!(target: "waybill::dispatch", key, tx_id = state.tx_id(), "Product created");
    Ok(Output::Product(product))
}

/// Handle changeProductStatus command.
///
/// `target` of `None` moves the product to its next status. Returns the
/// updated product as stored.
pub fn change_product_status<S: WorldState + ?Sized>(
    state: &mut S,
    key: &str,
    transporter: &str,
    target: Option<ProductStatus>,
) -> Result<Output> {
    if transporter.is_empty() {
        return Err(Error::InvalidArgument {
            reason: "transporter cannot be empty".to_string(),
        });
    }

    let mut product = load(state, key)?;
    let target = match target {
        Some(status) => status,
        None => product.status.next().ok_or_else(|| Error::TerminalStatus {
            key: key.to_string(),
            status: product.status,
        })?,
    };

    let from = product
        .advance(target, transporter, state.tx_timestamp())
        .map_err(|(from, to)| Error::InvalidTransition {
            key: key.to_string(),
            from,
            to,
        })?;
    state.put_state(key, product.encode()?)?;
    StatusIndex::reindex(state, key, from, target)?;

    debug!(
        target: "waybill::dispatch",
        key,
        %from,
        to = %target,
        tx_id = state.tx_id(),
        "Product status changed"
    );
    Ok(Output::Product(product))
}
