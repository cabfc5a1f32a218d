//! Desired-state and reconciled-state records.

use std::fmt;

use serde::{Deserialize, Deserializer, Serialize};
use streamreg_client::{
    CleanupPolicy, DEFAULT_PARTITIONS, DEFAULT_REPLICATION_FACTOR, SchemaType, SchemaVersion,
    Subject, TopicSpec, VersionSelector,
};

use crate::error::{Error, Result};

/// Lifecycle phase a reconciliation runs in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Phase {
    Create,
    Read,
    Update,
    Delete,
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Create => write!(f, "create"),
            Self::Read => write!(f, "read"),
            Self::Update => write!(f, "update"),
            Self::Delete => write!(f, "delete"),
        }
    }
}

/// Kind of remote resource being reconciled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ResourceKind {
    Schema,
    Topic,
}

impl fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Schema => write!(f, "schema"),
            Self::Topic => write!(f, "topic"),
        }
    }
}

/// A schema as the caller declares it and as it comes back reconciled.
///
/// `version` and `id` are only ever filled from registry responses.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SchemaRecord {
    pub subject: Subject,
    pub schema: String,
    #[serde(default)]
    pub schema_type: SchemaType,
    #[serde(
        default,
        deserialize_with = "zero_as_none",
        skip_serializing_if = "Option::is_none"
    )]
    pub version: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
}

impl SchemaRecord {
    /// A desired-state record with no registry-assigned fields.
    pub fn desired(subject: Subject, schema: impl Into<String>, schema_type: SchemaType) -> Self {
        Self {
            subject,
            schema: schema.into(),
            schema_type,
            version: None,
            id: None,
        }
    }

    /// Version to fetch when refreshing this record: its own, or `latest`.
    pub const fn read_selector(&self) -> VersionSelector {
        VersionSelector::from_known(self.version)
    }
}

impl From<SchemaVersion> for SchemaRecord {
    fn from(version: SchemaVersion) -> Self {
        Self {
            subject: version.subject,
            schema: version.schema,
            schema_type: version.schema_type,
            version: Some(version.version),
            id: Some(version.id),
        }
    }
}

/// Stored state may carry `version = 0` for "never resolved".
fn zero_as_none<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> std::result::Result<Option<u32>, D::Error> {
    let raw = Option::<u32>::deserialize(deserializer)?;
    Ok(raw.filter(|v| *v != 0))
}

/// A topic as the caller declares it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TopicRecord {
    pub topic: String,
    #[serde(default = "default_partitions")]
    pub partitions: u32,
    #[serde(default = "default_replication_factor")]
    pub replication_factor: u32,
    #[serde(default)]
    pub cleanup_policy: CleanupPolicy,
}

impl TopicRecord {
    /// A record with default partitions, replication and cleanup policy.
    pub fn new(topic: impl Into<String>) -> Self {
        Self {
            topic: topic.into(),
            partitions: DEFAULT_PARTITIONS,
            replication_factor: DEFAULT_REPLICATION_FACTOR,
            cleanup_policy: CleanupPolicy::default(),
        }
    }

    /// Validate into a [`TopicSpec`].
    ///
    /// # Errors
    ///
    /// Returns [`Error::Validation`] for a blank name or zero counts.
    pub fn to_spec(&self) -> Result<TopicSpec> {
        TopicSpec::with_settings(
            self.topic.clone(),
            self.partitions,
            self.replication_factor,
            self.cleanup_policy,
        )
        .map_err(Error::from_client_validation)
    }
}

impl From<&TopicSpec> for TopicRecord {
    fn from(spec: &TopicSpec) -> Self {
        Self {
            topic: spec.name().to_string(),
            partitions: spec.partitions(),
            replication_factor: spec.replication_factor(),
            cleanup_policy: spec.cleanup_policy(),
        }
    }
}

const fn default_partitions() -> u32 {
    DEFAULT_PARTITIONS
}

const fn default_replication_factor() -> u32 {
    DEFAULT_REPLICATION_FACTOR
}

#[cfg(test)]
mod tests {
    use super::*;

    type TestResult = std::result::Result<(), Box<dyn std::error::Error>>;

    #[test]
    fn test_schema_record_defaults() -> TestResult {
        let record: SchemaRecord =
            serde_json::from_str(r#"{"subject":"orders-value","schema":"{\"type\":\"string\"}"}"#)?;
        assert_eq!(record.schema_type, SchemaType::Avro);
        assert_eq!(record.version, None);
        assert_eq!(record.id, None);
        assert_eq!(record.read_selector(), VersionSelector::Latest);
        Ok(())
    }

    #[test]
    fn test_schema_record_version_zero_reads_latest() -> TestResult {
        let record: SchemaRecord =
            serde_json::from_str(r#"{"subject":"orders-value","schema":"{}","version":0}"#)?;
        assert_eq!(record.version, None);
        assert_eq!(record.read_selector(), VersionSelector::Latest);
        Ok(())
    }

    #[test]
    fn test_schema_record_known_version_reads_itself() -> TestResult {
        let record: SchemaRecord = serde_json::from_str(
            r#"{"subject":"orders-value","schema":"{}","schemaType":"JSON","version":4,"id":11}"#,
        )?;
        assert_eq!(record.schema_type, SchemaType::Json);
        assert_eq!(record.read_selector(), VersionSelector::Number(4));
        Ok(())
    }

    #[test]
    fn test_schema_record_rejects_unknown_type() {
        let parsed: std::result::Result<SchemaRecord, _> =
            serde_json::from_str(r#"{"subject":"s","schema":"{}","schemaType":"XML"}"#);
        assert!(parsed.is_err());
    }

    #[test]
    fn test_schema_record_serializes_camel_case() -> TestResult {
        let record = SchemaRecord {
            version: Some(1),
            id: Some(5),
            ..SchemaRecord::desired(Subject::new("orders-value")?, "{}", SchemaType::Avro)
        };
        let value = serde_json::to_value(&record)?;
        assert_eq!(
            value,
            serde_json::json!({
                "subject": "orders-value",
                "schema": "{}",
                "schemaType": "AVRO",
                "version": 1,
                "id": 5
            })
        );
        Ok(())
    }

    #[test]
    fn test_topic_record_defaults() -> TestResult {
        let record: TopicRecord = serde_json::from_str(r#"{"topic":"orders"}"#)?;
        assert_eq!(record, TopicRecord::new("orders"));
        assert_eq!(record.partitions, 2);
        assert_eq!(record.replication_factor, 2);
        assert_eq!(record.cleanup_policy, CleanupPolicy::Compact);
        Ok(())
    }

    #[test]
    fn test_topic_record_to_spec_validates() {
        let record = TopicRecord {
            partitions: 0,
            ..TopicRecord::new("orders")
        };
        let result = record.to_spec();
        assert!(matches!(result, Err(Error::Validation { .. })));
    }

    #[test]
    fn test_phase_and_kind_display() {
        assert_eq!(Phase::Update.to_string(), "update");
        assert_eq!(ResourceKind::Topic.to_string(), "topic");
    }
}
