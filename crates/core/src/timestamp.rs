//! Microsecond-precision UTC timestamp
//!
//! Every ledger commit and every product date carries a `Timestamp`.
//! Internally it is a `chrono::DateTime<Utc>` truncated to whole
//! microseconds, so the RFC 3339 rendering round-trips exactly.
//!
//! ```
//! use waybill_core::Timestamp;
//!
//! let ts = Timestamp::from_micros(1_700_000_000_123_456).unwrap();
//! assert_eq!(ts.to_string(), "2023-11-14T22:13:20.123456Z");
//! assert_eq!(ts.to_string().parse::<Timestamp>().unwrap(), ts);
//! ```

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, SecondsFormat, SubsecRound, Utc};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Microsecond-precision UTC timestamp
///
/// ## Invariants
///
/// - Sub-microsecond precision is always zero
/// - Ordering is chronological
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Timestamp(DateTime<Utc>);

impl Timestamp {
    /// Unix epoch (1970-01-01 00:00:00 UTC)
    pub const EPOCH: Timestamp = Timestamp(DateTime::<Utc>::UNIX_EPOCH);

    // =========================================================================
    // Constructors
    // =========================================================================

    /// Create a timestamp for the current moment
    pub fn now() -> Self {
        Timestamp(Utc::now().trunc_subsecs(6))
    }

    /// Create a timestamp from microseconds since epoch
    ///
    /// Returns `None` when the value is outside chrono's representable range.
    pub fn from_micros(micros: i64) -> Option<Self> {
        DateTime::<Utc>::from_timestamp_micros(micros).map(Timestamp)
    }

    /// Create a timestamp from whole seconds since epoch
    pub fn from_secs(secs: i64) -> Option<Self> {
        DateTime::<Utc>::from_timestamp(secs, 0).map(Timestamp)
    }

    /// Wrap a chrono datetime, dropping sub-microsecond precision
    pub fn from_datetime(dt: DateTime<Utc>) -> Self {
        Timestamp(dt.trunc_subsecs(6))
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    /// Microseconds since Unix epoch
    #[inline]
    pub fn as_micros(&self) -> i64 {
        self.0.timestamp_micros()
    }

    /// The underlying chrono datetime
    #[inline]
    pub fn as_datetime(&self) -> DateTime<Utc> {
        self.0
    }

    /// Render as RFC 3339 with microseconds and a `Z` suffix
    pub fn to_rfc3339(&self) -> String {
        self.0.to_rfc3339_opts(SecondsFormat::Micros, true)
    }
}

impl Default for Timestamp {
    fn default() -> Self {
        Timestamp::EPOCH
    }
}

impl fmt::Display for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_rfc3339())
    }
}

impl FromStr for Timestamp {
    type Err = chrono::ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let parsed = DateTime::parse_from_rfc3339(s)?;
        Ok(Timestamp::from_datetime(parsed.with_timezone(&Utc)))
    }
}

impl From<DateTime<Utc>> for Timestamp {
    fn from(dt: DateTime<Utc>) -> Self {
        Timestamp::from_datetime(dt)
    }
}

impl Serialize for Timestamp {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_rfc3339())
    }
}

impl<'de> Deserialize<'de> for Timestamp {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

// ============================================================================
// Tests
// ============================================================================
