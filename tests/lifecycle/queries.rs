//! Range and status query tests

use crate::common::*;
use waybill::{ContractConfig, Executor, MemoryLedger};

#[test]
fn query_all_lists_configured_range_in_key_order() {
    let executor = create_executor();
    for (key, id) in [
        ("PRODUCT3", "p-3"),
        ("PRODUCT1", "p-1"),
        ("PRODUCT20", "p-20"),
        ("PRODUCT999", "p-999"),
        ("CRATE1", "c-1"),
    ] {
        create_product(&executor, key, id);
    }

    let records = invoke_json(&executor, "queryAllProduct", &[]);
    let records = records.as_array().unwrap();
    let pairs: Vec<(&str, &str)> = records
        .iter()
        .map(|r| {
            (
                r["Key"].as_str().unwrap(),
                r["Record"]["productid"].as_str().unwrap(),
            )
        })
        .collect();

    assert_eq!(
        pairs,
        vec![("PRODUCT1", "p-1"), ("PRODUCT20", "p-20"), ("PRODUCT3", "p-3")]
    );
}

#[test]
fn query_all_on_empty_ledger_is_empty_array() {
    let executor = create_executor();
    let records = invoke_json(&executor, "queryAllProduct", &[]);
    assert_eq!(records, serde_json::json!([]));
}

#[test]
fn query_all_reflects_latest_status() {
    let executor = create_executor();
    create_product(&executor, "PRODUCT1", "p-1");
    advance(&executor, "PRODUCT1", "FastFreight");

    let records = invoke_json(&executor, "queryAllProduct", &[]);
    assert_eq!(records[0]["Record"]["status"], "InTransit");
}

#[test]
fn custom_range_from_config() {
    let config = ContractConfig::from_toml_str(
        "name = \"coldchain\"\nrange_start = \"LOT000\"\nrange_end = \"LOT100\"\n",
    )
    .unwrap();
    let executor = Executor::with_config(MemoryLedger::new(), config).unwrap();
    create_product(&executor, "LOT050", "l-50");
    create_product(&executor, "LOT150", "l-150");

    let records = invoke_json(&executor, "queryAllProduct", &[]);
    assert_eq!(records.as_array().unwrap().len(), 1);
    assert_eq!(records[0]["Key"], "LOT050");
}

#[test]
fn query_by_status_orders_by_record_key() {
    let executor = create_executor();
    create_product(&executor, "PRODUCT2", "p-2");
    create_product(&executor, "PRODUCT1", "p-1");
    assert_eq!(ids_with_status(&executor, "Produced"), vec!["p-1", "p-2"]);
}

#[test]
fn query_by_status_with_no_matches() {
    let executor = create_executor();
    create_product(&executor, "PRODUCT1", "p-1");
    assert!(ids_with_status(&executor, "Delivered").is_empty());
}
