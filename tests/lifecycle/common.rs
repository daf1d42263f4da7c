//! Common test utilities for lifecycle tests

use serde_json::Value;
use waybill::{Executor, MemoryLedger, Response, ResponseStatus};

/// Route contract logs to the test harness output
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_max_level(tracing_subscriber::filter::LevelFilter::DEBUG)
        .with_test_writer()
        .try_init();
}

/// Executor over a fresh in-memory ledger
pub fn create_executor() -> Executor<MemoryLedger> {
    init_tracing();
    Executor::new(MemoryLedger::new())
}

/// Create a product with fixed name, class and producer
pub fn create_product(executor: &Executor<MemoryLedger>, key: &str, product_id: &str) {
    let response = executor.invoke(
        "createProduct",
        &[key, product_id, "Widget", "tools", "Acme Farms"],
    );
    assert_ok(&response);
}

/// Move a product to its next status
pub fn advance(executor: &Executor<MemoryLedger>, key: &str, transporter: &str) {
    let response = executor.invoke("changeProductStatus", &[key, transporter, ""]);
    assert_ok(&response);
}

/// Invoke and parse the JSON payload, failing the test on an error response
pub fn invoke_json(executor: &Executor<MemoryLedger>, function: &str, args: &[&str]) -> Value {
    let response = executor.invoke(function, args);
    assert_ok(&response);
    response.payload_json().unwrap()
}

/// Record keys returned by queryProductByStatus, via their product ids
pub fn ids_with_status(executor: &Executor<MemoryLedger>, status: &str) -> Vec<String> {
    invoke_json(executor, "queryProductByStatus", &[status])
        .as_array()
        .unwrap()
        .iter()
        .map(|p| p["productid"].as_str().unwrap().to_string())
        .collect()
}

/// Assert a success response
pub fn assert_ok(response: &Response) {
    assert_eq!(
        response.status,
        ResponseStatus::Ok,
        "expected success, got: {}",
        response.message
    );
}

/// Assert an error response with no payload
#[allow(dead_code)]
pub fn assert_error(response: &Response) {
    assert_eq!(response.status, ResponseStatus::Error);
    assert!(response.payload.is_empty());
    assert!(!response.message.is_empty());
}
