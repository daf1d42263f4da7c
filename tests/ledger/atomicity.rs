//! Atomicity and rollback tests

use waybill::{
    create_composite_key, Executor, Ledger, MemoryLedger, ProductStatus, StatusIndex, WorldState,
};

#[test]
fn create_writes_record_and_index_in_one_commit() {
    let executor = Executor::new(MemoryLedger::new());
    let response = executor.invoke(
        "createProduct",
        &["PRODUCT1", "p-1", "Widget", "tools", "Acme"],
    );
    assert!(response.is_ok());

    let ledger = executor.ledger();
    let entry = StatusIndex::entry_key(ProductStatus::Produced, "PRODUCT1").unwrap();
    let record = ledger.revisions("PRODUCT1");
    let index = ledger.revisions(&entry);
    assert_eq!(record.len(), 1);
    assert_eq!(index.len(), 1);
    assert_eq!(record[0].version, index[0].version);
    assert_eq!(record[0].tx_id, index[0].tx_id);
}

#[test]
fn status_change_moves_index_in_the_same_commit() {
    let executor = Executor::new(MemoryLedger::new());
    executor.invoke("createProduct", &["PRODUCT1", "p-1", "Widget", "tools", "Acme"]);
    executor.invoke("changeProductStatus", &["PRODUCT1", "FastFreight", ""]);

    let ledger = executor.ledger();
    let old = StatusIndex::entry_key(ProductStatus::Produced, "PRODUCT1").unwrap();
    let new = StatusIndex::entry_key(ProductStatus::InTransit, "PRODUCT1").unwrap();

    let record = ledger.revisions("PRODUCT1");
    let old_revs = ledger.revisions(&old);
    let new_revs = ledger.revisions(&new);

    assert!(old_revs.last().unwrap().is_tombstone());
    assert_eq!(old_revs.last().unwrap().version, record[1].version);
    assert_eq!(new_revs[0].version, record[1].version);
}

#[test]
fn dropped_transaction_leaves_no_trace() {
    let ledger = MemoryLedger::new();
    {
        let mut txn = ledger.begin().unwrap();
        txn.put_state("PRODUCT1", b"{}".to_vec()).unwrap();
        txn.put_state("PRODUCT2", b"{}".to_vec()).unwrap();
        assert_eq!(txn.pending_writes(), 2);
    }
    assert_eq!(ledger.live_keys(), 0);
    assert!(ledger.revisions("PRODUCT1").is_empty());
    assert_eq!(ledger.current_version(), 0);
}

#[test]
fn simple_range_never_sees_composite_keys() {
    let ledger = MemoryLedger::new();
    let mut txn = ledger.begin().unwrap();
    let composite = create_composite_key("status~key", &["Produced", "PRODUCT1"]).unwrap();
    txn.put_state(&composite, vec![0]).unwrap();
    txn.put_state("PRODUCT1", b"{}".to_vec()).unwrap();
    ledger.commit(txn).unwrap();

    let txn = ledger.begin().unwrap();
    let keys: Vec<String> = txn
        .state_by_range("", "")
        .unwrap()
        .map(|kv| kv.unwrap().key)
        .collect();
    assert_eq!(keys, vec!["PRODUCT1"]);

    let composite_keys: Vec<String> = txn
        .state_by_partial_composite_key("status~key", &[])
        .unwrap()
        .map(|kv| kv.unwrap().key)
        .collect();
    assert_eq!(composite_keys, vec![composite]);
}
