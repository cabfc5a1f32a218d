//! Request plumbing shared by the registry and topic clients.

use std::sync::Arc;

use reqwest::header::CONTENT_TYPE;
use reqwest::{RequestBuilder, StatusCode};
use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::debug;
use url::Url;

use crate::config::RegistryConfig;
use crate::error::{Error, Result};
use crate::types::is_dot_segment;

/// One configured HTTP endpoint.
#[derive(Debug, Clone)]
pub(crate) struct Transport {
    config: Arc<RegistryConfig>,
    http_client: reqwest::Client,
}

impl Transport {
    pub(crate) fn new(config: RegistryConfig) -> Result<Self> {
        let builder = reqwest::Client::builder();
        let builder = match config.timeout {
            Some(timeout) => builder.timeout(timeout),
            None => builder,
        };
        let http_client = builder.build()?;

        Ok(Self {
            config: Arc::new(config),
            http_client,
        })
    }

    pub(crate) fn config(&self) -> &RegistryConfig {
        &self.config
    }

    /// Append `segments` to the base URL, percent-encoding each one.
    ///
    /// `.` and `..` are refused: the URL parser collapses them rather than
    /// encoding them.
    pub(crate) fn url(&self, segments: &[&str]) -> Result<Url> {
        if let Some(segment) = segments.iter().find(|s| is_dot_segment(s)) {
            return Err(Error::validation(format!("path segment '{segment}' is not addressable")));
        }
        let base = &self.config.base_url;
        let mut url = base.clone();
        url.path_segments_mut()
            .map_err(|()| Error::config_error(format!("'{base}' cannot be used as a base URL")))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    pub(crate) async fn get(&self, url: Url) -> Result<String> {
        self.send(self.http_client.get(url)).await
    }

    pub(crate) async fn post<B: Serialize + ?Sized>(&self, url: Url, body: &B) -> Result<String> {
        let payload = serde_json::to_vec(body)?;
        self.send(self.http_client.post(url).body(payload)).await
    }

    pub(crate) async fn delete(&self, url: Url) -> Result<String> {
        self.send(self.http_client.delete(url)).await
    }

    /// Send once. Anything but `200 OK` becomes [`Error::Status`] carrying the body.
    async fn send(&self, request: RequestBuilder) -> Result<String> {
        let response = request
            .header(CONTENT_TYPE, self.config.media_type.as_str())
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;
        debug!(
            status = status.as_u16(),
            body_len = body.len(),
            "Registry response"
        );

        if status != StatusCode::OK {
            return Err(Error::status(status.as_u16(), body));
        }
        Ok(body)
    }
}

/// Decode a successful response body.
pub(crate) fn decode<T: DeserializeOwned>(body: &str) -> Result<T> {
    Ok(serde_json::from_str(body)?)
}
