//! Reconciler implementation.

use std::sync::Arc;

use async_trait::async_trait;
use streamreg_client::{SchemaRegistry, TopicAdmin, VersionResolver};
use tracing::{debug, info, warn};

use crate::error::{Error, Result};
use crate::types::{Phase, ResourceKind, SchemaRecord, TopicRecord};

/// Lifecycle callbacks a host invokes for one resource instance.
///
/// Each call issues its requests in sequence and either returns the
/// reconciled record or fails. Nothing is rolled back on failure.
#[async_trait]
pub trait ResourceReconciler: Send + Sync {
    /// Desired/reconciled state record for this resource kind.
    type Record: Send + Sync;

    /// Bring a new resource into existence.
    async fn create(&self, desired: &Self::Record) -> Result<Self::Record>;

    /// Refresh stored state from the remote side.
    async fn read(&self, current: &Self::Record) -> Result<Self::Record>;

    /// Move from `current` to `desired`.
    async fn update(&self, current: &Self::Record, desired: &Self::Record) -> Result<Self::Record>;

    /// Remove the resource.
    async fn delete(&self, current: &Self::Record) -> Result<()>;
}

/// Reconciles schema subjects against a registry.
///
/// Versions are immutable, so update registers a new version exactly like
/// create does; nothing is ever modified in place.
#[derive(Clone)]
pub struct SchemaReconciler {
    registry: Arc<dyn SchemaRegistry>,
    resolver: VersionResolver,
}

impl SchemaReconciler {
    /// Create a new schema reconciler.
    pub fn new(registry: Arc<dyn SchemaRegistry>) -> Self {
        let resolver = VersionResolver::new(Arc::clone(&registry));
        Self { registry, resolver }
    }

    /// Register `desired` as a new version and resolve the version number.
    ///
    /// A resolver failure after a successful register leaves the new
    /// version in the registry with nothing recorded locally.
    async fn register_new_version(
        &self,
        phase: Phase,
        desired: &SchemaRecord,
    ) -> Result<SchemaRecord> {
        let subject = &desired.subject;
        info!(
            phase = %phase,
            subject = %subject,
            schema_type = %desired.schema_type,
            "Registering schema version"
        );

        let id = self
            .registry
            .register_schema(subject, &desired.schema, desired.schema_type)
            .await
            .map_err(|e| Error::registry(phase, ResourceKind::Schema, e))?;

        let version = match self.resolver.current_version(subject).await {
            Ok(version) => version,
            Err(e) => {
                warn!(
                    phase = %phase,
                    subject = %subject,
                    id,
                    error = %e,
                    "Registered but version unresolved"
                );
                return Err(Error::registry(phase, ResourceKind::Schema, e));
            }
        };

        info!(phase = %phase, subject = %subject, id, version, "Schema reconciled");
        Ok(SchemaRecord {
            version: Some(version),
            id: Some(id),
            ..desired.clone()
        })
    }
}

#[async_trait]
impl ResourceReconciler for SchemaReconciler {
    type Record = SchemaRecord;

    async fn create(&self, desired: &SchemaRecord) -> Result<SchemaRecord> {
        self.register_new_version(Phase::Create, desired).await
    }

    async fn read(&self, current: &SchemaRecord) -> Result<SchemaRecord> {
        let selector = current.read_selector();
        debug!(subject = %current.subject, selector = %selector, "Reading schema");

        let version = self
            .registry
            .get_version(&current.subject, selector)
            .await
            .map_err(|e| Error::registry(Phase::Read, ResourceKind::Schema, e))?;

        Ok(SchemaRecord::from(version))
    }

    async fn update(&self, current: &SchemaRecord, desired: &SchemaRecord) -> Result<SchemaRecord> {
        debug!(
            subject = %desired.subject,
            previous_version = ?current.version,
            "Update registers a new version"
        );
        self.register_new_version(Phase::Update, desired).await
    }

    async fn delete(&self, current: &SchemaRecord) -> Result<()> {
        info!(subject = %current.subject, version = ?current.version, "Deleting subject");
        self.registry
            .delete_subject(&current.subject)
            .await
            .map_err(|e| Error::registry(Phase::Delete, ResourceKind::Schema, e))
    }
}

impl std::fmt::Debug for SchemaReconciler {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SchemaReconciler").finish_non_exhaustive()
    }
}

/// Reconciles topics.
///
/// Only creation reaches the broker. Read, update and delete work on the
/// stored record alone.
#[derive(Clone)]
pub struct TopicReconciler {
    admin: Arc<dyn TopicAdmin>,
}

impl TopicReconciler {
    /// Create a new topic reconciler.
    pub fn new(admin: Arc<dyn TopicAdmin>) -> Self {
        Self { admin }
    }
}

#[async_trait]
impl ResourceReconciler for TopicReconciler {
    type Record = TopicRecord;

    async fn create(&self, desired: &TopicRecord) -> Result<TopicRecord> {
        let spec = desired.to_spec()?;
        info!(
            topic = spec.name(),
            partitions = spec.partitions(),
            "Creating topic"
        );

        self.admin
            .create_topic(&spec)
            .await
            .map_err(|e| Error::registry(Phase::Create, ResourceKind::Topic, e))?;

        Ok(TopicRecord::from(&spec))
    }

    async fn read(&self, current: &TopicRecord) -> Result<TopicRecord> {
        debug!(topic = %current.topic, "Topic read uses stored state");
        Ok(current.clone())
    }

    async fn update(&self, current: &TopicRecord, desired: &TopicRecord) -> Result<TopicRecord> {
        let spec = desired.to_spec()?;
        if current != desired {
            warn!(
                topic = spec.name(),
                "Topic update is not sent to the broker; stored state only"
            );
        }
        Ok(TopicRecord::from(&spec))
    }

    async fn delete(&self, current: &TopicRecord) -> Result<()> {
        warn!(topic = %current.topic, "Topic delete is not sent to the broker; stored state only");
        Ok(())
    }
}

impl std::fmt::Debug for TopicReconciler {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TopicReconciler").finish_non_exhaustive()
    }
}
