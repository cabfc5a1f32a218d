//! Configuration for the registry client.

use std::time::Duration;

use serde::{Deserialize, Serialize};
use url::Url;

use crate::error::{Error, Result};

/// Media type the schema registry speaks.
pub const SCHEMA_REGISTRY_MEDIA_TYPE: &str = "application/vnd.schemaregistry.v1+json";

/// Configuration for [`RegistryClient`](crate::RegistryClient) and
/// [`TopicClient`](crate::TopicClient).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegistryConfig {
    /// Base URL every request path is appended to.
    pub base_url: Url,

    /// Value of the `Content-Type` header sent on every request.
    #[serde(default = "default_media_type")]
    pub media_type: String,

    /// Request timeout. `None` keeps the transport default.
    #[serde(with = "option_duration_secs", default)]
    pub timeout: Option<Duration>,
}

impl RegistryConfig {
    /// Create a config for the given base URL.
    pub fn new(base_url: Url) -> Self {
        Self {
            base_url,
            media_type: default_media_type(),
            timeout: None,
        }
    }

    /// Parse a base URL and create a config for it.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UrlParse`] if `raw` is not an absolute URL, or
    /// [`Error::ConfigError`] if it cannot carry a path.
    pub fn parse(raw: &str) -> Result<Self> {
        let base_url: Url = raw.trim().parse()?;
        if base_url.cannot_be_a_base() {
            return Err(Error::config_error(format!("'{raw}' cannot be used as a base URL")));
        }
        Ok(Self::new(base_url))
    }

    /// Set the media type.
    #[must_use]
    pub fn media_type(mut self, media_type: impl Into<String>) -> Self {
        self.media_type = media_type.into();
        self
    }

    /// Set the timeout.
    #[must_use]
    pub const fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }
}

fn default_media_type() -> String {
    SCHEMA_REGISTRY_MEDIA_TYPE.to_string()
}

/// Serialization helper for an optional Duration as seconds.
mod option_duration_secs {
    use serde::{Deserialize, Deserializer, Serialize, Serializer};
    use std::time::Duration;

    pub fn serialize<S: Serializer>(
        duration: &Option<Duration>,
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        duration.map(|d| d.as_secs()).serialize(serializer)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<Option<Duration>, D::Error> {
        let secs = Option::<u64>::deserialize(deserializer)?;
        Ok(secs.map(Duration::from_secs))
    }
}
