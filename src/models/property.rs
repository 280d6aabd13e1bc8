//! Property detail records and lookup results.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// A property detail record as persisted by the record store.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct PropertyRecord {
    /// Listing id parsed from the source URL
    pub id: u64,

    /// Canonical detail page URL
    pub url: String,

    /// Feature label to feature value
    pub features: BTreeMap<String, String>,

    /// Street address
    pub address: String,

    /// Neighborhood component of the location line
    pub neighborhood: String,

    /// City component of the location line
    pub city: String,

    /// Transaction type (sale, rent, ...)
    pub operation: String,

    /// Price as displayed on the page
    pub price: String,

    /// All description fragments joined together
    pub description: String,
}

/// Where a returned record came from.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Source {
    Cache,
    Crawler,
}

/// A record tagged with its provenance. Never persisted.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SourcedProperty {
    #[serde(flatten)]
    pub record: PropertyRecord,
    pub source: Source,
}

impl PropertyRecord {
    /// Tag the record with its provenance.
    pub fn with_source(self, source: Source) -> SourcedProperty {
        SourcedProperty {
            record: self,
            source,
        }
    }
}

/// Soft failure returned to direct lookups when the page could not be fetched.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct FetchFailure {
    pub status: String,
    pub message: String,
}

impl FetchFailure {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            status: "Failure".to_string(),
            message: message.into(),
        }
    }
}

/// Outcome of a property lookup.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(untagged)]
pub enum PropertyLookup {
    Found(SourcedProperty),
    Failed(FetchFailure),
}

impl PropertyLookup {
    /// The record, if the lookup succeeded.
    pub fn property(&self) -> Option<&SourcedProperty> {
        match self {
            Self::Found(property) => Some(property),
            Self::Failed(_) => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::sample_record;

    #[test]
    fn test_persisted_shape_has_no_source() {
        let json = serde_json::to_value(sample_record(101)).unwrap();
        assert!(json.get("source").is_none());
        assert_eq!(json["id"], 101);
    }

    #[test]
    fn test_sourced_property_flattens_record() {
        let json = serde_json::to_value(sample_record(101).with_source(Source::Cache)).unwrap();
        assert_eq!(json["source"], "cache");
        assert_eq!(json["city"], "Curitiba");
    }

    #[test]
    fn test_failure_shape() {
        let lookup = PropertyLookup::Failed(FetchFailure::new("timeout"));
        assert_eq!(
            serde_json::to_string(&lookup).unwrap(),
            r#"{"status":"Failure","message":"timeout"}"#
        );
        assert!(lookup.property().is_none());
    }
}
