//! Error types for the registry and topic clients.

use thiserror::Error;

/// Result type for client operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while talking to the registry or broker endpoint.
#[derive(Error, Debug)]
pub enum Error {
    /// The endpoint answered with something other than `200 OK`.
    ///
    /// The registry's own error payload is not parsed: the message is the
    /// raw response body, verbatim.
    #[error("{body}")]
    Status { status: u16, body: String },

    /// Transport failure (connection, DNS, timeout) from reqwest.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Response body was not the JSON shape we expected.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Response decoded but carried a value outside the accepted domain.
    #[error("invalid response: {reason}")]
    InvalidResponse { reason: String },

    /// A post-condition the registry should guarantee did not hold.
    #[error("integrity check failed: {reason}")]
    Integrity { reason: String },

    /// Input rejected before any request was made.
    #[error("validation failed: {reason}")]
    Validation { reason: String },

    /// Configuration error.
    #[error("configuration error: {reason}")]
    ConfigError { reason: String },

    /// URL parse error.
    #[error("URL parse error: {0}")]
    UrlParse(#[from] url::ParseError),
}

impl Error {
    /// Create a status error from a non-success response.
    pub fn status(status: u16, body: impl Into<String>) -> Self {
        Self::Status {
            status,
            body: body.into(),
        }
    }

    /// Create an invalid response error.
    pub fn invalid_response(reason: impl Into<String>) -> Self {
        Self::InvalidResponse {
            reason: reason.into(),
        }
    }

    /// Create an integrity error.
    pub fn integrity(reason: impl Into<String>) -> Self {
        Self::Integrity {
            reason: reason.into(),
        }
    }

    /// Create a validation error.
    pub fn validation(reason: impl Into<String>) -> Self {
        Self::Validation {
            reason: reason.into(),
        }
    }

    /// Create a config error.
    pub fn config_error(reason: impl Into<String>) -> Self {
        Self::ConfigError {
            reason: reason.into(),
        }
    }

    /// HTTP status of a non-success response, if this is one.
    pub const fn status_code(&self) -> Option<u16> {
        match self {
            Self::Status { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Check if the request never produced a response.
    pub const fn is_transport(&self) -> bool {
        matches!(self, Self::Http(_))
    }

    /// Check if a response arrived but could not be understood.
    pub const fn is_decode(&self) -> bool {
        matches!(self, Self::Json(_) | Self::InvalidResponse { .. })
    }
}
