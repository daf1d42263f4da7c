//! Index entries without a matching primary record

use waybill::{Executor, Ledger, MemoryLedger, ProductStatus, StatusIndex, WorldState};

fn executor_with(keys: &[&str]) -> Executor<MemoryLedger> {
    let executor = Executor::new(MemoryLedger::new());
    for &key in keys {
        let response = executor.invoke("createProduct", &[key, "p", "Widget", "tools", "Acme"]);
        assert!(response.is_ok(), "{}", response.message);
    }
    executor
}

fn listed(executor: &Executor<MemoryLedger>, status: &str) -> usize {
    let response = executor.invoke("queryProductByStatus", &[status]);
    assert!(response.is_ok(), "{}", response.message);
    response.payload_json().unwrap().as_array().unwrap().len()
}

#[test]
fn entry_for_deleted_primary_is_skipped() {
    let executor = executor_with(&["PRODUCT1", "PRODUCT2"]);

    // Remove a primary record behind the contract's back
    let ledger = executor.ledger();
    let mut txn = ledger.begin().unwrap();
    txn.delete_state("PRODUCT1").unwrap();
    ledger.commit(txn).unwrap();

    assert_eq!(listed(&executor, "Produced"), 1);
    assert_eq!(ledger.open_scans(), 0);
}

#[test]
fn deleted_primary_shows_tombstone_in_history() {
    let executor = executor_with(&["PRODUCT1"]);
    let ledger = executor.ledger();
    let mut txn = ledger.begin().unwrap();
    txn.delete_state("PRODUCT1").unwrap();
    ledger.commit(txn).unwrap();

    let response = executor.invoke("getHistoryForProduct", &["PRODUCT1"]);
    let history = response.payload_json().unwrap();
    assert_eq!(history.as_array().unwrap().len(), 2);
    assert_eq!(history[1]["IsDelete"], "true");
    assert!(history[1]["Value"].is_null());
}

#[test]
fn leftover_entry_under_old_status_is_skipped() {
    let executor = executor_with(&["PRODUCT1"]);
    executor.invoke("changeProductStatus", &["PRODUCT1", "FastFreight", ""]);

    // Re-create the entry a non-reindexing writer would have left behind
    let ledger = executor.ledger();
    let mut txn = ledger.begin().unwrap();
    StatusIndex::index(&mut txn, ProductStatus::Produced, "PRODUCT1").unwrap();
    ledger.commit(txn).unwrap();

    assert_eq!(listed(&executor, "Produced"), 0);
    assert_eq!(listed(&executor, "InTransit"), 1);
}

#[test]
fn every_product_has_exactly_one_entry() {
    let executor = executor_with(&["PRODUCT1", "PRODUCT2", "PRODUCT3"]);
    executor.invoke("changeProductStatus", &["PRODUCT2", "FastFreight", ""]);
    executor.invoke("changeProductStatus", &["PRODUCT3", "FastFreight", ""]);
    executor.invoke("changeProductStatus", &["PRODUCT3", "FastFreight", ""]);

    let ledger = executor.ledger();
    for key in ["PRODUCT1", "PRODUCT2", "PRODUCT3"] {
        let live: Vec<ProductStatus> = ProductStatus::ALL
            .into_iter()
            .filter(|status| {
                let entry = StatusIndex::entry_key(*status, key).unwrap();
                ledger.get(&entry).is_some()
            })
            .collect();
        assert_eq!(live.len(), 1, "{} has entries {:?}", key, live);
    }
}
