//! Read-only access to subjects the caller does not manage.

use std::sync::Arc;

use streamreg_client::{SchemaRegistry, Subject, VersionResolver, VersionSelector};
use tracing::info;

use crate::error::{Error, Result};
use crate::types::{Phase, ResourceKind, SchemaRecord};

/// Looks up the current version of a subject.
#[derive(Clone)]
pub struct SchemaLookup {
    registry: Arc<dyn SchemaRegistry>,
    resolver: VersionResolver,
}

impl SchemaLookup {
    /// Create a lookup reading from `registry`.
    pub fn new(registry: Arc<dyn SchemaRegistry>) -> Self {
        let resolver = VersionResolver::new(Arc::clone(&registry));
        Self { registry, resolver }
    }

    /// Fetch the highest version of `subject` as a fully populated record.
    ///
    /// Resolves the number from the version list first and then fetches
    /// that version explicitly, rather than asking for `latest`.
    ///
    /// # Errors
    ///
    /// Fails with [`Error::Registry`] if listing or fetching fails, or if the
    /// subject has no versions.
    pub async fn lookup(&self, subject: &Subject) -> Result<SchemaRecord> {
        let version = self
            .resolver
            .current_version(subject)
            .await
            .map_err(Self::read_error)?;

        let found = self
            .registry
            .get_version(subject, VersionSelector::Number(version))
            .await
            .map_err(Self::read_error)?;

        info!(subject = %subject, version, id = found.id, "Looked up schema");
        Ok(SchemaRecord::from(found))
    }

    /// Adopt an existing subject: the reconciled record a host stores for it.
    ///
    /// # Errors
    ///
    /// Same as [`SchemaLookup::lookup`].
    pub async fn import(&self, subject: &Subject) -> Result<SchemaRecord> {
        let record = self.lookup(subject).await?;
        info!(subject = %subject, version = ?record.version, "Imported subject");
        Ok(record)
    }

    fn read_error(error: streamreg_client::Error) -> Error {
        Error::registry(Phase::Read, ResourceKind::Schema, error)
    }
}

impl std::fmt::Debug for SchemaLookup {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SchemaLookup").finish_non_exhaustive()
    }
}
