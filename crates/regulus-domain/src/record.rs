//! Record module - the unit of regulatory intelligence Regulus operates on

use std::collections::BTreeMap;
use std::fmt;

use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Unique identifier for a record, based on UUIDv7
///
/// UUIDv7 provides:
/// - Chronological sortability (ingestion order is meaningful for dedup)
/// - 128-bit uniqueness with no coordination between ingestion adapters
/// - RFC 9562-standard format with broad ecosystem support
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RecordId(u128);

impl RecordId {
    /// Generate a new UUIDv7-based RecordId
    ///
    /// # Examples
    ///
    /// ```
    /// use regulus_domain::RecordId;
    ///
    /// let id = RecordId::new();
    /// assert!(id.value() > 0);
    /// ```
    pub fn new() -> Self {
        Self(uuid::Uuid::now_v7().as_u128())
    }

    /// Create a RecordId from a raw u128 value
    ///
    /// This is primarily for storage layer deserialization.
    pub fn from_value(value: u128) -> Self {
        Self(value)
    }

    /// Parse a RecordId from its UUID string form
    pub fn from_string(s: &str) -> Result<Self, String> {
        uuid::Uuid::parse_str(s)
            .map(|u| Self(u.as_u128()))
            .map_err(|e| format!("Invalid record id: {}", e))
    }

    /// Get the raw u128 value
    pub fn value(&self) -> u128 {
        self.0
    }
}

impl Default for RecordId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", uuid::Uuid::from_u128(self.0))
    }
}

impl Serialize for RecordId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for RecordId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Self::from_string(&s).map_err(D::Error::custom)
    }
}

/// A regulatory record as ingested from an external source
///
/// Only `id`, `title` and `content` are guaranteed to be present (and the
/// strings may still be empty - emptiness is a data-quality finding, not a
/// constructor error). Everything else is descriptive metadata that sources
/// may or may not supply. `priority` and `published_at` are kept as the raw
/// ingested strings so that invalid values stay representable and can be
/// flagged by validation instead of being rejected at the boundary.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Record {
    /// Unique identifier, assigned by storage
    pub id: RecordId,

    /// Headline of the update (may be empty)
    pub title: String,

    /// Body text (may be empty)
    pub content: String,

    /// Geographic region or country the update applies to
    pub region: Option<String>,

    /// Feed or publication the record was ingested from
    pub source: Option<String>,

    /// Issuing regulatory authority (FDA, EMA, ...)
    pub authority: Option<String>,

    /// Free-text type/category label as supplied by the source
    pub category: Option<String>,

    /// Raw priority label; expected to parse as [`crate::Priority`]
    pub priority: Option<String>,

    /// Raw publication timestamp as supplied by the source
    pub published_at: Option<String>,

    /// Free-form source-specific metadata
    #[serde(default)]
    pub metadata: BTreeMap<String, String>,
}

impl Record {
    /// Create a record with the required fields; descriptive fields start empty
    pub fn new(id: RecordId, title: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            id,
            title: title.into(),
            content: content.into(),
            region: None,
            source: None,
            authority: None,
            category: None,
            priority: None,
            published_at: None,
            metadata: BTreeMap::new(),
        }
    }
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        /// Property: RecordId ordering matches u128 ordering
        #[test]
        fn test_id_ordering_property(a: u128, b: u128) {
            let id_a = RecordId::from_value(a);
            let id_b = RecordId::from_value(b);

            prop_assert_eq!(id_a < id_b, a < b);
            prop_assert_eq!(id_a == id_b, a == b);
            prop_assert_eq!(id_a > id_b, a > b);
        }

        /// Property: Round-trip through string representation preserves ID
        #[test]
        fn test_id_string_roundtrip(value: u128) {
            let id = RecordId::from_value(value);
            let id_str = id.to_string();

            match RecordId::from_string(&id_str) {
                Ok(parsed) => prop_assert_eq!(id, parsed),
                Err(e) => return Err(TestCaseError::fail(e)),
            }
        }
    }
}
