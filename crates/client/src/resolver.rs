//! Resolve which version a subject currently stands at.

use std::sync::Arc;

use tracing::debug;

use crate::client::SchemaRegistry;
use crate::error::{Error, Result};
use crate::types::Subject;

/// Highest version number in `versions`, if any.
pub fn highest_version(mut versions: Vec<u32>) -> Option<u32> {
    versions.sort_unstable();
    versions.last().copied()
}

/// Infers the version a registration was assigned.
///
/// The register endpoint only returns a schema id, so the version is taken
/// to be the highest one listed for the subject afterwards.
///
/// # Concurrency
///
/// This is only correct while nobody else writes to the same subject between
/// the register call and the list call. A concurrent writer that lands in that
/// window makes the resolver report the other writer's version. There is no
/// compare-and-swap token to detect this; callers that need determinism must
/// serialize writes per subject.
#[derive(Clone)]
pub struct VersionResolver {
    registry: Arc<dyn SchemaRegistry>,
}

impl VersionResolver {
    /// Create a resolver reading versions from `registry`.
    pub fn new(registry: Arc<dyn SchemaRegistry>) -> Self {
        Self { registry }
    }

    /// Current (highest) version of `subject`.
    ///
    /// # Errors
    ///
    /// Propagates registry failures unchanged, and returns
    /// [`Error::Integrity`] when the subject lists no versions at all.
    pub async fn current_version(&self, subject: &Subject) -> Result<u32> {
        let versions = self.registry.list_versions(subject).await?;
        let count = versions.len();

        let Some(version) = highest_version(versions) else {
            return Err(Error::integrity(format!(
                "subject '{subject}' lists no versions after a successful write"
            )));
        };

        debug!(subject = %subject, version, count, "Resolved current version");
        Ok(version)
    }
}

impl std::fmt::Debug for VersionResolver {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("VersionResolver").finish_non_exhaustive()
    }
}
