//! The tracked good and its serialization contract
//!
//! A [`Product`] is stored as a JSON object with a fixed key set, every
//! value a string:
//!
//! | Field | JSON key |
//! |-------|----------|
//! | `id` | `productid` |
//! | `name` | `productname` |
//! | `class` | `productclass` |
//! | `producer` | `producer` |
//! | `production_date` | `productiondate` |
//! | `producer_checkout_date` | `producercheckoutdate` |
//! | `transporter` | `transporter` |
//! | `transporter_entry_date` | `transporterentrydate` |
//! | `status` | `status` |
//!
//! Optional fields that are not yet set are written as `""` and read back
//! as `None`.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::CodecError;
use crate::timestamp::Timestamp;

/// Lifecycle state of a product
///
/// The directed path is `Produced → InTransit → Delivered`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum ProductStatus {
    /// Made by the producer, not yet handed over
    Produced,
    /// Handed to a transporter
    InTransit,
    /// Received by the recipient
    Delivered,
}

impl ProductStatus {
    /// Every status, in lifecycle order
    pub const ALL: [ProductStatus; 3] = [
        ProductStatus::Produced,
        ProductStatus::InTransit,
        ProductStatus::Delivered,
    ];

    /// Wire name of this status
    pub const fn as_str(&self) -> &'static str {
        match self {
            ProductStatus::Produced => "Produced",
            ProductStatus::InTransit => "InTransit",
            ProductStatus::Delivered => "Delivered",
        }
    }

    /// The only status this one may move to, if any
    pub const fn next(&self) -> Option<ProductStatus> {
        match self {
            ProductStatus::Produced => Some(ProductStatus::InTransit),
            ProductStatus::InTransit => Some(ProductStatus::Delivered),
            ProductStatus::Delivered => None,
        }
    }

    /// Whether moving from `self` to `target` follows the lifecycle
    pub fn can_transition_to(&self, target: ProductStatus) -> bool {
        self.next() == Some(target)
    }
}

impl fmt::Display for ProductStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ProductStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ProductStatus::ALL
            .into_iter()
            .find(|status| status.as_str() == s)
            .ok_or_else(|| format!("unknown product status '{}'", s))
    }
}

/// A tracked good
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    /// Caller-assigned product identifier
    #[serde(rename = "productid")]
    pub id: String,
    /// Product name
    #[serde(rename = "productname")]
    pub name: String,
    /// Product class
    #[serde(rename = "productclass")]
    pub class: String,
    /// Producer that created the product
    pub producer: String,
    /// When the product was created
    #[serde(rename = "productiondate")]
    pub production_date: Timestamp,
    /// When the producer handed the product over
    #[serde(rename = "producercheckoutdate", with = "blank_timestamp")]
    pub producer_checkout_date: Option<Timestamp>,
    /// Transporter currently holding the product
    #[serde(with = "blank_string")]
    pub transporter: Option<String>,
    /// When the transporter received the product
    #[serde(rename = "transporterentrydate", with = "blank_timestamp")]
    pub transporter_entry_date: Option<Timestamp>,
    /// Current lifecycle state
    pub status: ProductStatus,
}

impl Product {
    /// A freshly produced product
    pub fn produced(
        id: impl Into<String>,
        name: impl Into<String>,
        class: impl Into<String>,
        producer: impl Into<String>,
        at: Timestamp,
    ) -> Self {
        Product {
            id: id.into(),
            name: name.into(),
            class: class.into(),
            producer: producer.into(),
            production_date: at,
            producer_checkout_date: None,
            transporter: None,
            transporter_entry_date: None,
            status: ProductStatus::Produced,
        }
    }

    /// Move the product to `target`, recording the hand-over when it enters
    /// transit
    ///
    /// Returns the previous status. Fails without modifying `self` if the
    /// transition is not on the lifecycle path.
    pub fn advance(
        &mut self,
        target: ProductStatus,
        transporter: &str,
        at: Timestamp,
    ) -> Result<ProductStatus, (ProductStatus, ProductStatus)> {
        let from = self.status;
        if !from.can_transition_to(target) {
            return Err((from, target));
        }
        if target == ProductStatus::InTransit {
            self.producer_checkout_date = Some(at);
            self.transporter = Some(transporter.to_string());
            self.transporter_entry_date = Some(at);
        }
        self.status = target;
        Ok(from)
    }

    /// Serialize to the stored JSON form
    pub fn encode(&self) -> Result<Vec<u8>, CodecError> {
        serde_json::to_vec(self).map_err(|e| CodecError::Encode(e.to_string()))
    }

    /// Parse the stored JSON form
    pub fn decode(bytes: &[u8]) -> Result<Self, CodecError> {
        serde_json::from_slice(bytes).map_err(|e| CodecError::Decode(e.to_string()))
    }
}

/// `Option<Timestamp>` stored as a string, `""` meaning `None`
mod blank_timestamp {
    use serde::{Deserialize, Deserializer, Serializer};

    use crate::timestamp::Timestamp;

    pub fn serialize<S: Serializer>(
        value: &Option<Timestamp>,
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        match value {
            Some(ts) => serializer.serialize_str(&ts.to_rfc3339()),
            None => serializer.serialize_str(""),
        }
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<Option<Timestamp>, D::Error> {
        let s = String::deserialize(deserializer)?;
        if s.is_empty() {
            return Ok(None);
        }
        s.parse().map(Some).map_err(serde::de::Error::custom)
    }
}

/// `Option<String>` stored as a string, `""` meaning `None`
mod blank_string {
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(
        value: &Option<String>,
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(value.as_deref().unwrap_or(""))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<Option<String>, D::Error> {
        let s = String::deserialize(deserializer)?;
        Ok(if s.is_empty() { None } else { Some(s) })
    }
}
