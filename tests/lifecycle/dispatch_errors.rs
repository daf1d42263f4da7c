//! Unknown command and arity tests

use crate::common::*;
use waybill::CommandKind;

#[test]
fn unknown_command_is_an_error() {
    let executor = create_executor();
    let response = executor.invoke("deleteProduct", &["PRODUCT1"]);
    assert_error(&response);
    assert_eq!(response.message, "Invalid function name: deleteProduct");
}

#[test]
fn every_command_rejects_wrong_arity() {
    let executor = create_executor();
    for kind in CommandKind::ALL {
        let args = vec!["x"; kind.arity() + 1];
        let response = executor.invoke(kind.name(), &args[..]);
        assert_error(&response);
        assert_eq!(
            response.message,
            format!("Incorrect number of arguments. Expecting {}", kind.arity())
        );
    }
}

#[test]
fn too_few_arguments_write_nothing() {
    let executor = create_executor();
    let response = executor.invoke("createProduct", &["PRODUCT1", "p-1"]);
    assert_error(&response);
    assert_eq!(executor.ledger().live_keys(), 0);
}
