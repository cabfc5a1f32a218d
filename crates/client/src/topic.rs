//! Topic administration client.
//!
//! Only creation exists. The bootstrap-servers value doubles as an HTTP
//! base URL, and creation goes through the registry-shaped
//! `/subjects/{topic}/versions` path with a `{"topic": name}` body.
//! Partition count, replication factor and cleanup policy are not sent.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::config::RegistryConfig;
use crate::error::Result;
use crate::http::{Transport, decode};
use crate::types::TopicSpec;

/// Broker-side topic operations.
#[async_trait]
pub trait TopicAdmin: Send + Sync {
    /// Create the topic described by `spec`.
    async fn create_topic(&self, spec: &TopicSpec) -> Result<()>;
}

#[derive(Debug, Serialize)]
struct CreateTopicRequest<'a> {
    topic: &'a str,
}

#[derive(Debug, Deserialize)]
struct CreateTopicResponse {
    id: i64,
}

/// HTTP client addressed by a bootstrap-servers string.
#[derive(Debug, Clone)]
pub struct TopicClient {
    transport: Transport,
}

impl TopicClient {
    /// Create a client with the given configuration.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Http`](crate::Error::Http) if the HTTP client cannot be built.
    pub fn with_config(config: RegistryConfig) -> Result<Self> {
        Ok(Self {
            transport: Transport::new(config)?,
        })
    }

    /// Create a client from a bootstrap-servers value.
    ///
    /// The value must parse as an absolute URL; nothing else is checked.
    ///
    /// # Errors
    ///
    /// Returns an error if `bootstrap_servers` is not a usable base URL.
    pub fn from_bootstrap_servers(bootstrap_servers: &str) -> Result<Self> {
        Self::with_config(RegistryConfig::parse(bootstrap_servers)?)
    }

    /// Active configuration.
    pub fn config(&self) -> &RegistryConfig {
        self.transport.config()
    }
}

#[async_trait]
impl TopicAdmin for TopicClient {
    async fn create_topic(&self, spec: &TopicSpec) -> Result<()> {
        let url = self.transport.url(&["subjects", spec.name(), "versions"])?;
        let body = self
            .transport
            .post(url, &CreateTopicRequest { topic: spec.name() })
            .await?;
        let CreateTopicResponse { id } = decode(&body)?;

        debug!(topic = spec.name(), id, "Topic endpoint acknowledged");
        info!(
            topic = spec.name(),
            partitions = spec.partitions(),
            replication_factor = spec.replication_factor(),
            cleanup_policy = %spec.cleanup_policy(),
            "Created topic"
        );
        Ok(())
    }
}
