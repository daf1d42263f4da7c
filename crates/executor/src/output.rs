//! Output enum for command execution results.
//!
//! Every command produces exactly one output type. This mapping is deterministic:
//! the same command always produces the same output variant (though the values
//! may differ based on ledger state).

use serde::{Deserialize, Serialize};
use waybill_core::{Product, Timestamp};

use crate::Result;

/// Successful command execution results.
///
/// Each [`Command`](crate::Command) variant maps to exactly one `Output` variant.
///
/// # Example
///
/// ```text
/// use waybill_executor::{Command, Output};
///
/// match executor.execute(Command::QueryProduct { key })? {
///     Output::Product(p) => println!("{} is {}", p.id, p.status),
///     _ => unreachable!("QueryProduct always returns Product"),
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Output {
    /// A single product (point reads and mutations)
    Product(Product),

    /// Products with their record keys (range queries)
    Records(Vec<KeyedRecord>),

    /// Products without keys (status queries)
    Products(Vec<Product>),

    /// Revision history, oldest first
    History(Vec<HistoryEntry>),
}

impl Output {
    /// Encode as the JSON payload of a success response
    pub fn to_payload(&self) -> Result<Vec<u8>> {
        let encoded = match self {
            Output::Product(product) => return Ok(product.encode()?),
            Output::Records(records) => serde_json::to_vec(records),
            Output::Products(products) => serde_json::to_vec(products),
            Output::History(entries) => serde_json::to_vec(entries),
        };
        encoded.map_err(|e| crate::Error::Encode {
            reason: e.to_string(),
        })
    }
}

/// A product with the key it is stored under
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeyedRecord {
    /// Record key
    #[serde(rename = "Key")]
    pub key: String,
    /// Decoded product
    #[serde(rename = "Record")]
    pub record: Product,
}

/// One revision of a product
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryEntry {
    /// Transaction that wrote the revision
    #[serde(rename = "TxId")]
    pub tx_id: String,
    /// Product at that revision, `None` for a deletion
    #[serde(rename = "Value")]
    pub value: Option<Product>,
    /// Commit time
    #[serde(rename = "Timestamp")]
    pub timestamp: Timestamp,
    /// Whether the revision deleted the record
    #[serde(rename = "IsDelete", with = "bool_string")]
    pub is_delete: bool,
}

/// `bool` written as `"true"` / `"false"`
mod bool_string {
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(value: &bool, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(if *value { "true" } else { "false" })
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<bool, D::Error> {
        let s = String::deserialize(deserializer)?;
        match s.as_str() {
            "true" => Ok(true),
            "false" => Ok(false),
            other => Err(serde::de::Error::custom(format!(
                "expected \"true\" or \"false\", got {:?}",
                other
            ))),
        }
    }
}
