//! Schema registry client.
//!
//! [`SchemaRegistry`] is the seam the resolver and reconciler depend on;
//! [`RegistryClient`] is the HTTP implementation of it.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::config::RegistryConfig;
use crate::error::{Error, Result};
use crate::http::{Transport, decode};
use crate::types::{SchemaType, SchemaVersion, Subject, VersionSelector};

/// Operations a schema registry offers for one subject.
///
/// Every call is a single attempt: transport errors and non-200 responses
/// are returned as-is, with no retry.
#[async_trait]
pub trait SchemaRegistry: Send + Sync {
    /// Register `schema` as a new version of `subject`, returning the schema id.
    async fn register_schema(
        &self,
        subject: &Subject,
        schema: &str,
        schema_type: SchemaType,
    ) -> Result<i64>;

    /// All version numbers that currently exist for `subject`.
    async fn list_versions(&self, subject: &Subject) -> Result<Vec<u32>>;

    /// Fetch one version, by number or `latest`.
    async fn get_version(
        &self,
        subject: &Subject,
        selector: VersionSelector,
    ) -> Result<SchemaVersion>;

    /// Delete `subject` and every version under it.
    async fn delete_subject(&self, subject: &Subject) -> Result<()>;
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct RegisterRequest<'a> {
    schema: &'a str,
    schema_type: SchemaType,
}

#[derive(Debug, Deserialize)]
struct RegisterResponse {
    id: i64,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct VersionResponse {
    subject: String,
    version: u32,
    id: i64,
    schema: String,
    #[serde(default)]
    schema_type: Option<String>,
}

impl TryFrom<VersionResponse> for SchemaVersion {
    type Error = Error;

    fn try_from(raw: VersionResponse) -> Result<Self> {
        let subject = Subject::new(raw.subject)
            .map_err(|_| Error::invalid_response("response carried an empty subject"))?;
        Ok(Self {
            subject,
            version: raw.version,
            id: raw.id,
            schema: raw.schema,
            schema_type: SchemaType::from_response(raw.schema_type.as_deref())?,
        })
    }
}

/// HTTP client for a schema registry.
#[derive(Debug, Clone)]
pub struct RegistryClient {
    transport: Transport,
}

impl RegistryClient {
    /// Create a client with the given configuration.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Http`] if the HTTP client cannot be built.
    pub fn with_config(config: RegistryConfig) -> Result<Self> {
        Ok(Self {
            transport: Transport::new(config)?,
        })
    }

    /// Create a client for `base_url` with the default media type.
    ///
    /// # Errors
    ///
    /// Returns an error if `base_url` does not parse or cannot be a base.
    pub fn from_url(base_url: &str) -> Result<Self> {
        Self::with_config(RegistryConfig::parse(base_url)?)
    }

    /// Active configuration.
    pub fn config(&self) -> &RegistryConfig {
        self.transport.config()
    }
}

#[async_trait]
impl SchemaRegistry for RegistryClient {
    async fn register_schema(
        &self,
        subject: &Subject,
        schema: &str,
        schema_type: SchemaType,
    ) -> Result<i64> {
        let url = self
            .transport
            .url(&["subjects", subject.as_str(), "versions"])?;
        let request = RegisterRequest {
            schema,
            schema_type,
        };
        let body = self.transport.post(url, &request).await?;
        let RegisterResponse { id } = decode(&body)?;

        info!(subject = %subject, id, schema_type = %schema_type, "Registered schema");
        Ok(id)
    }

    async fn list_versions(&self, subject: &Subject) -> Result<Vec<u32>> {
        let url = self
            .transport
            .url(&["subjects", subject.as_str(), "versions"])?;
        let versions: Vec<u32> = decode(&self.transport.get(url).await?)?;

        debug!(subject = %subject, count = versions.len(), "Listed versions");
        Ok(versions)
    }

    async fn get_version(
        &self,
        subject: &Subject,
        selector: VersionSelector,
    ) -> Result<SchemaVersion> {
        let selector_segment = selector.to_string();
        let url = self.transport.url(&[
            "subjects",
            subject.as_str(),
            "versions",
            selector_segment.as_str(),
        ])?;
        let raw: VersionResponse = decode(&self.transport.get(url).await?)?;
        let version = SchemaVersion::try_from(raw)?;

        debug!(
            subject = %subject,
            selector = %selector,
            version = version.version,
            id = version.id,
            "Fetched schema version"
        );
        Ok(version)
    }

    async fn delete_subject(&self, subject: &Subject) -> Result<()> {
        let url = self.transport.url(&["subjects", subject.as_str()])?;
        self.transport.delete(url).await?;

        info!(subject = %subject, "Deleted subject");
        Ok(())
    }
}
