//! Provider configuration: where the registry and broker endpoints live.

use std::path::Path;
use std::time::Duration;

use anyhow::{Context, Result, bail};
use serde::{Deserialize, Serialize};
use streamreg_client::RegistryConfig;

/// Environment variable overriding `schema_registry_url`.
pub const ENV_SCHEMA_REGISTRY_URL: &str = "STREAMREG_SCHEMA_REGISTRY_URL";
/// Environment variable overriding `bootstrap_servers`.
pub const ENV_BOOTSTRAP_SERVERS: &str = "STREAMREG_BOOTSTRAP_SERVERS";
/// Environment variable overriding `timeout_secs`.
pub const ENV_TIMEOUT_SECS: &str = "STREAMREG_TIMEOUT_SECS";
/// Environment variable overriding `media_type`.
pub const ENV_MEDIA_TYPE: &str = "STREAMREG_MEDIA_TYPE";

/// Endpoints and transport settings shared by every command.
///
/// Both endpoints are optional; a missing one only fails when a command
/// needs it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProviderConfig {
    /// Base URL of the schema registry.
    #[serde(default)]
    pub schema_registry_url: Option<String>,

    /// Topic endpoint. Used as an HTTP base URL.
    #[serde(default)]
    pub bootstrap_servers: Option<String>,

    /// Request timeout in seconds. Unset keeps the transport default.
    #[serde(default)]
    pub timeout_secs: Option<u64>,

    /// Content type override for registry requests.
    #[serde(default)]
    pub media_type: Option<String>,
}

impl ProviderConfig {
    /// Load a file if given, then apply the process environment.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed, or an
    /// environment value is malformed.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let base = match path {
            Some(path) => Self::from_file(path)?,
            None => Self::default(),
        };
        base.with_env(|key| std::env::var(key).ok())
    }

    /// Load configuration from a file: JSON by extension, TOML otherwise.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;

        if path.extension().is_some_and(|e| e == "json") {
            serde_json::from_str(&content)
                .with_context(|| format!("Failed to parse config {}", path.display()))
        } else {
            toml::from_str(&content)
                .with_context(|| format!("Failed to parse config {}", path.display()))
        }
    }

    /// Overlay values from `lookup`, which maps variable names to values.
    ///
    /// # Errors
    ///
    /// Returns an error if `STREAMREG_TIMEOUT_SECS` is not a whole number.
    pub fn with_env(mut self, lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        if let Some(url) = lookup(ENV_SCHEMA_REGISTRY_URL) {
            self.schema_registry_url = Some(url);
        }

        if let Some(servers) = lookup(ENV_BOOTSTRAP_SERVERS) {
            self.bootstrap_servers = Some(servers);
        }

        if let Some(raw) = lookup(ENV_TIMEOUT_SECS) {
            let secs = raw
                .trim()
                .parse()
                .with_context(|| format!("{ENV_TIMEOUT_SECS} must be whole seconds, got '{raw}'"))?;
            self.timeout_secs = Some(secs);
        }

        if let Some(media_type) = lookup(ENV_MEDIA_TYPE) {
            self.media_type = Some(media_type);
        }

        Ok(self)
    }

    /// Client configuration for the schema registry.
    ///
    /// # Errors
    ///
    /// Returns an error if no registry URL is configured or it is not a URL.
    pub fn registry_config(&self) -> Result<RegistryConfig> {
        let Some(url) = self.schema_registry_url.as_deref() else {
            bail!(
                "schema_registry_url is not configured (set it in the config file or {})",
                ENV_SCHEMA_REGISTRY_URL
            );
        };
        self.client_config(url)
            .with_context(|| format!("Invalid schema_registry_url '{url}'"))
    }

    /// Client configuration for the topic endpoint.
    ///
    /// # Errors
    ///
    /// Returns an error if no bootstrap servers are configured or the value
    /// is not a URL.
    pub fn topic_config(&self) -> Result<RegistryConfig> {
        let Some(servers) = self.bootstrap_servers.as_deref() else {
            bail!(
                "bootstrap_servers is not configured (set it in the config file or {})",
                ENV_BOOTSTRAP_SERVERS
            );
        };
        self.client_config(servers)
            .with_context(|| format!("Invalid bootstrap_servers '{servers}'"))
    }

    fn client_config(&self, raw: &str) -> Result<RegistryConfig> {
        let config = RegistryConfig::parse(raw)?;
        let config = match self.timeout_secs {
            Some(secs) => config.timeout(Duration::from_secs(secs)),
            None => config,
        };
        Ok(match &self.media_type {
            Some(media_type) => config.media_type(media_type.clone()),
            None => config,
        })
    }
}
