//! Error types for the reconciler crate.

use thiserror::Error;

use crate::types::{Phase, ResourceKind};

/// Result type alias for reconciler operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Reconciler error types.
#[derive(Error, Debug)]
pub enum Error {
    /// A client or resolver call failed. Displays the client's text verbatim.
    #[error("{error}")]
    Registry {
        phase: Phase,
        kind: ResourceKind,
        error: streamreg_client::Error,
    },

    /// The desired-state record was rejected before any request.
    #[error("invalid desired state: {reason}")]
    Validation { reason: String },
}

impl Error {
    /// Wrap a client failure with the phase and resource it happened in.
    pub const fn registry(
        phase: Phase,
        kind: ResourceKind,
        error: streamreg_client::Error,
    ) -> Self {
        Self::Registry { phase, kind, error }
    }

    /// Create a validation error.
    pub fn validation(reason: impl Into<String>) -> Self {
        Self::Validation {
            reason: reason.into(),
        }
    }

    /// Map a client-side validation failure into a reconciler one.
    pub(crate) fn from_client_validation(error: streamreg_client::Error) -> Self {
        match error {
            streamreg_client::Error::Validation { reason } => Self::validation(reason),
            other => Self::validation(other.to_string()),
        }
    }

    /// Phase the failure happened in, for registry failures.
    pub const fn phase(&self) -> Option<Phase> {
        match self {
            Self::Registry { phase, .. } => Some(*phase),
            Self::Validation { .. } => None,
        }
    }

    /// Underlying client error, for registry failures.
    pub const fn client_error(&self) -> Option<&streamreg_client::Error> {
        match self {
            Self::Registry { error, .. } => Some(error),
            Self::Validation { .. } => None,
        }
    }
}
