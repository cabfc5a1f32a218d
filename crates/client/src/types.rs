//! Domain types shared by the registry and topic clients.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Identifier for a family of schema versions.
///
/// Stored verbatim; encoding for URL paths happens when a request is built.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Subject(String);

impl Subject {
    /// Create a subject, rejecting blank names and the dot segments `.` and `..`.
    ///
    /// A dot segment cannot be carried in a URL path: it is collapsed
    /// instead of encoded, which would address a different resource.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Validation`] when the name is blank or a dot segment.
    pub fn new(name: impl Into<String>) -> Result<Self> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(Error::validation("subject must not be empty"));
        }
        if is_dot_segment(&name) {
            return Err(Error::validation(format!("subject '{name}' is not addressable")));
        }
        Ok(Self(name))
    }

    /// Borrow the subject name.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// `.` and `..` are dropped by URL path normalization.
pub(crate) fn is_dot_segment(segment: &str) -> bool {
    matches!(segment, "." | "..")
}

impl TryFrom<String> for Subject {
    type Error = Error;

    fn try_from(value: String) -> Result<Self> {
        Self::new(value)
    }
}

impl From<Subject> for String {
    fn from(subject: Subject) -> Self {
        subject.0
    }
}

impl fmt::Display for Subject {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for Subject {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Schema content type understood by the registry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE", try_from = "String")]
pub enum SchemaType {
    /// Apache Avro (the registry's implicit type).
    #[default]
    Avro,
    /// JSON Schema.
    Json,
    /// Protocol Buffers.
    Protobuf,
}

impl SchemaType {
    /// Wire token for this type.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Avro => "AVRO",
            Self::Json => "JSON",
            Self::Protobuf => "PROTOBUF",
        }
    }

    /// Decode the `schemaType` field of a registry response.
    ///
    /// The registry omits the field for Avro schemas, so absent or empty
    /// means [`SchemaType::Avro`].
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidResponse`] for a token outside the enum.
    pub fn from_response(raw: Option<&str>) -> Result<Self> {
        match raw.map(str::trim) {
            None | Some("") => Ok(Self::default()),
            Some(token) => token
                .parse()
                .map_err(|_| Error::invalid_response(format!("unknown schema type '{token}'"))),
        }
    }
}

impl FromStr for SchemaType {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        [Self::Avro, Self::Json, Self::Protobuf]
            .into_iter()
            .find(|t| t.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| Error::validation(format!("unknown schema type '{s}'")))
    }
}

impl TryFrom<String> for SchemaType {
    type Error = Error;

    fn try_from(value: String) -> Result<Self> {
        value.parse()
    }
}

impl fmt::Display for SchemaType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Which version of a subject to fetch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VersionSelector {
    /// The registry's `latest` alias.
    Latest,
    /// An explicit version number.
    Number(u32),
}

impl VersionSelector {
    /// Read the stored version if there is one, otherwise `latest`.
    pub const fn from_known(version: Option<u32>) -> Self {
        match version {
            Some(v) => Self::Number(v),
            None => Self::Latest,
        }
    }
}

impl fmt::Display for VersionSelector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Latest => f.write_str("latest"),
            Self::Number(v) => write!(f, "{v}"),
        }
    }
}

/// An immutable, registry-assigned schema version.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SchemaVersion {
    /// Subject the version belongs to.
    pub subject: Subject,
    /// Version number within the subject.
    pub version: u32,
    /// Registry-wide schema id.
    pub id: i64,
    /// Schema definition text.
    pub schema: String,
    /// Content type, defaulted client-side to AVRO.
    pub schema_type: SchemaType,
}

/// Topic retention strategy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum CleanupPolicy {
    /// Keep the latest value per key.
    #[default]
    Compact,
    /// Drop segments past retention.
    Delete,
    /// Both compaction and retention.
    CompactDelete,
}

impl CleanupPolicy {
    /// Broker config token for this policy.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Compact => "compact",
            Self::Delete => "delete",
            Self::CompactDelete => "compact,delete",
        }
    }
}

impl FromStr for CleanupPolicy {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let normalized: String = s.chars().filter(|c| !c.is_whitespace()).collect();
        match normalized.to_ascii_lowercase().as_str() {
            "compact" => Ok(Self::Compact),
            "delete" => Ok(Self::Delete),
            "compact,delete" | "delete,compact" => Ok(Self::CompactDelete),
            _ => Err(Error::validation(format!("unknown cleanup policy '{s}'"))),
        }
    }
}

impl TryFrom<String> for CleanupPolicy {
    type Error = Error;

    fn try_from(value: String) -> Result<Self> {
        value.parse()
    }
}

impl From<CleanupPolicy> for String {
    fn from(policy: CleanupPolicy) -> Self {
        policy.as_str().to_string()
    }
}

impl fmt::Display for CleanupPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Default partition count for new topics.
pub const DEFAULT_PARTITIONS: u32 = 2;

/// Default replication factor for new topics.
pub const DEFAULT_REPLICATION_FACTOR: u32 = 2;

/// Declared topic settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TopicSpec {
    name: String,
    partitions: u32,
    replication_factor: u32,
    cleanup_policy: CleanupPolicy,
}

impl TopicSpec {
    /// Create a spec with default partitions, replication and cleanup policy.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Validation`] when the name is blank.
    pub fn new(name: impl Into<String>) -> Result<Self> {
        Self::with_settings(
            name,
            DEFAULT_PARTITIONS,
            DEFAULT_REPLICATION_FACTOR,
            CleanupPolicy::default(),
        )
    }

    /// Create a fully specified topic.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Validation`] for a blank name or a zero count.
    pub fn with_settings(
        name: impl Into<String>,
        partitions: u32,
        replication_factor: u32,
        cleanup_policy: CleanupPolicy,
    ) -> Result<Self> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(Error::validation("topic name must not be empty"));
        }
        if is_dot_segment(&name) {
            return Err(Error::validation(format!("topic '{name}' is not addressable")));
        }
        if partitions == 0 {
            return Err(Error::validation(format!("topic '{name}': partitions must be at least 1")));
        }
        if replication_factor == 0 {
            return Err(Error::validation(format!(
                "topic '{name}': replication factor must be at least 1"
            )));
        }
        Ok(Self {
            name,
            partitions,
            replication_factor,
            cleanup_policy,
        })
    }

    /// Topic name, verbatim.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Partition count, at least 1.
    pub const fn partitions(&self) -> u32 {
        self.partitions
    }

    /// Replication factor, at least 1.
    pub const fn replication_factor(&self) -> u32 {
        self.replication_factor
    }

    /// Retention strategy.
    pub const fn cleanup_policy(&self) -> CleanupPolicy {
        self.cleanup_policy
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_subject_rejects_blank() {
        assert!(Subject::new("").is_err());
        assert!(Subject::new("   ").is_err());
    }

    #[test]
    fn test_subject_rejects_dot_segments() {
        for name in [".", ".."] {
            let result = Subject::new(name);
            assert!(matches!(result, Err(Error::Validation { .. })));
        }
        assert!(Subject::new("...").is_ok());
        assert!(Subject::new("orders.value").is_ok());
    }

    #[test]
    fn test_subject_keeps_quotes_verbatim() -> Result<()> {
        let subject = Subject::new("\"orders-value\"")?;
        assert_eq!(subject.as_str(), "\"orders-value\"");
        Ok(())
    }

    #[test]
    fn test_subject_deserialize_validates() {
        let parsed: std::result::Result<Subject, _> = serde_json::from_str(r#""""#);
        assert!(parsed.is_err());
    }

    #[test]
    fn test_schema_type_defaults_to_avro() {
        assert_eq!(SchemaType::default(), SchemaType::Avro);
        assert!(matches!(SchemaType::from_response(None), Ok(SchemaType::Avro)));
        assert!(matches!(
            SchemaType::from_response(Some("")),
            Ok(SchemaType::Avro)
        ));
    }

    #[test]
    fn test_schema_type_from_response_rejects_unknown() {
        let result = SchemaType::from_response(Some("XML"));
        assert!(result.is_err());
        assert!(result.is_err_and(|e| e.is_decode()));
    }

    #[test]
    fn test_schema_type_parse_is_case_insensitive() {
        assert!(matches!(
            "protobuf".parse::<SchemaType>(),
            Ok(SchemaType::Protobuf)
        ));
        assert!(matches!("Json".parse::<SchemaType>(), Ok(SchemaType::Json)));
    }

    #[test]
    fn test_schema_type_serializes_uppercase() -> std::result::Result<(), serde_json::Error> {
        let token = serde_json::to_string(&SchemaType::Protobuf)?;
        assert_eq!(token, r#""PROTOBUF""#);
        let parsed: SchemaType = serde_json::from_str(r#""avro""#)?;
        assert_eq!(parsed, SchemaType::Avro);
        Ok(())
    }

    #[test]
    fn test_version_selector_display() {
        assert_eq!(VersionSelector::Latest.to_string(), "latest");
        assert_eq!(VersionSelector::Number(7).to_string(), "7");
        assert_eq!(VersionSelector::from_known(None), VersionSelector::Latest);
        assert_eq!(
            VersionSelector::from_known(Some(3)),
            VersionSelector::Number(3)
        );
    }

    #[test]
    fn test_cleanup_policy_tokens() -> Result<()> {
        assert_eq!(CleanupPolicy::default(), CleanupPolicy::Compact);
        assert_eq!(
            "compact, delete".parse::<CleanupPolicy>()?,
            CleanupPolicy::CompactDelete
        );
        assert_eq!(CleanupPolicy::CompactDelete.to_string(), "compact,delete");
        assert!("archive".parse::<CleanupPolicy>().is_err());
        Ok(())
    }

    #[test]
    fn test_topic_spec_defaults() -> Result<()> {
        let spec = TopicSpec::new("orders")?;
        assert_eq!(spec.partitions(), 2);
        assert_eq!(spec.replication_factor(), 2);
        assert_eq!(spec.cleanup_policy(), CleanupPolicy::Compact);
        Ok(())
    }

    #[test]
    fn test_topic_spec_rejects_zero_counts() {
        assert!(TopicSpec::with_settings("orders", 0, 1, CleanupPolicy::Delete).is_err());
        assert!(TopicSpec::with_settings("orders", 1, 0, CleanupPolicy::Delete).is_err());
        assert!(TopicSpec::with_settings(" ", 1, 1, CleanupPolicy::Delete).is_err());
        assert!(TopicSpec::new("..").is_err());
    }
}
