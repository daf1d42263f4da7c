//! Concurrent invocation tests

use std::sync::Arc;
use std::thread;

use waybill::handlers::product::change_product_status;
use waybill::{Executor, Ledger, MemoryLedger, Product, ProductStatus, StatusIndex};

const STATUSES: [ProductStatus; 3] = [
    ProductStatus::Produced,
    ProductStatus::InTransit,
    ProductStatus::Delivered,
];

fn live_entries(ledger: &MemoryLedger, key: &str) -> Vec<ProductStatus> {
    STATUSES
        .into_iter()
        .filter(|&status| {
            let entry = StatusIndex::entry_key(status, key).unwrap();
            ledger.get(&entry).is_some()
        })
        .collect()
}

fn stored_status(ledger: &MemoryLedger, key: &str) -> ProductStatus {
    Product::decode(&ledger.get(key).unwrap()).unwrap().status
}

#[test]
fn concurrent_creates_are_all_committed() {
    let executor = Arc::new(Executor::new(MemoryLedger::new()));

    let handles: Vec<_> = (0..4)
        .map(|t| {
            let executor = Arc::clone(&executor);
            thread::spawn(move || {
                for i in 0..25 {
                    let key = format!("PRODUCT{}", t * 100 + i);
                    let response = executor.invoke(
                        "createProduct",
                        &[key.as_str(), "p", "Widget", "tools", "Acme"],
                    );
                    assert!(response.is_ok(), "{}", response.message);
                }
            })
        })
        .collect();
    for handle in handles {
        handle.join().unwrap();
    }

    assert_eq!(executor.ledger().current_version(), 100);
    let response = executor.invoke("queryProductByStatus", &["Produced"]);
    assert_eq!(response.payload_json().unwrap().as_array().unwrap().len(), 100);
}

#[test]
fn concurrent_readers_see_complete_commits() {
    let executor = Arc::new(Executor::new(MemoryLedger::new()));
    for i in 0..20 {
        let key = format!("PRODUCT{}", i);
        executor.invoke("createProduct", &[key.as_str(), "p", "Widget", "tools", "Acme"]);
    }

    let writer = {
        let executor = Arc::clone(&executor);
        thread::spawn(move || {
            for i in 0..20 {
                let key = format!("PRODUCT{}", i);
                executor.invoke("changeProductStatus", &[key.as_str(), "FastFreight", ""]);
            }
        })
    };

    let readers: Vec<_> = (0..4)
        .map(|_| {
            let executor = Arc::clone(&executor);
            thread::spawn(move || {
                for _ in 0..50 {
                    let produced = executor.invoke("queryProductByStatus", &["Produced"]);
                    let in_transit = executor.invoke("queryProductByStatus", &["InTransit"]);
                    let produced = produced.payload_json().unwrap();
                    let in_transit = in_transit.payload_json().unwrap();
                    for p in produced.as_array().unwrap() {
                        assert_eq!(p["status"], "Produced");
                    }
                    for p in in_transit.as_array().unwrap() {
                        assert_eq!(p["status"], "InTransit");
                    }
                }
            })
        })
        .collect();

    writer.join().unwrap();
    for reader in readers {
        reader.join().unwrap();
    }
    assert_eq!(executor.ledger().open_scans(), 0);
}

#[test]
fn late_commit_of_stale_transition_is_rejected() {
    let executor = Executor::new(MemoryLedger::new());
    executor.invoke("createProduct", &["PRODUCT1", "p", "Widget", "tools", "Acme"]);
    let ledger = executor.ledger();

    // Reads Produced, then waits
    let mut stale = ledger.begin().unwrap();
    change_product_status(&mut stale, "PRODUCT1", "SlowFreight", None).unwrap();

    let mut first = ledger.begin().unwrap();
    change_product_status(&mut first, "PRODUCT1", "FastFreight", None).unwrap();
    ledger.commit(first).unwrap();

    let mut second = ledger.begin().unwrap();
    change_product_status(&mut second, "PRODUCT1", "Courier", None).unwrap();
    ledger.commit(second).unwrap();

    assert!(ledger.commit(stale).is_err());
    assert_eq!(stored_status(ledger, "PRODUCT1"), ProductStatus::Delivered);
    assert_eq!(live_entries(ledger, "PRODUCT1"), vec![ProductStatus::Delivered]);
}

#[test]
fn racing_transitions_keep_one_index_entry() {
    let executor = Arc::new(Executor::new(MemoryLedger::new()));
    for i in 0..10 {
        let key = format!("PRODUCT{}", i);
        executor.invoke("createProduct", &[key.as_str(), "p", "Widget", "tools", "Acme"]);
    }

    let handles: Vec<_> = (0..4)
        .map(|_| {
            let executor = Arc::clone(&executor);
            thread::spawn(move || {
                for _ in 0..3 {
                    for i in 0..10 {
                        let key = format!("PRODUCT{}", i);
                        // Losers see a read conflict or a terminal status
                        executor.invoke("changeProductStatus", &[key.as_str(), "FastFreight", ""]);
                    }
                }
            })
        })
        .collect();
    for handle in handles {
        handle.join().unwrap();
    }

    let ledger = executor.ledger();
    for i in 0..10 {
        let key = format!("PRODUCT{}", i);
        let status = stored_status(ledger, &key);
        assert_eq!(live_entries(ledger, &key), vec![status], "{}", key);
    }
}
