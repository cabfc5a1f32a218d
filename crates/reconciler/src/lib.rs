//! Create/read/update/delete reconciliation for registry resources.
//!
//! A host hands this crate a desired-state record and gets back a
//! reconciled-state record carrying the registry-assigned fields, or an
//! error with the registry's own text.
//!
//! # Key Concepts
//!
//! ## Schemas
//!
//! Schema versions are immutable. Create and update both register a new
//! version and then resolve its number from the subject's version list.
//! Read fetches the stored version, or `latest` when none is stored.
//! Delete removes the whole subject.
//!
//! ## Topics
//!
//! Only creation reaches the broker endpoint. Read, update and delete echo
//! stored state and log that the broker was not touched.
//!
//! # Example
//!
//! ```ignore
//! use std::sync::Arc;
//! use streamreg_client::{RegistryClient, SchemaType, Subject};
//! use streamreg_reconciler::{ResourceReconciler, SchemaReconciler, SchemaRecord};
//!
//! let registry = Arc::new(RegistryClient::from_url("http://localhost:8081")?);
//! let reconciler = SchemaReconciler::new(registry);
//!
//! let desired = SchemaRecord::desired(
//!     Subject::new("orders-value")?,
//!     r#"{"type":"string"}"#,
//!     SchemaType::Avro,
//! );
//! let reconciled = reconciler.create(&desired).await?;
//! assert!(reconciled.version.is_some());
//! ```

#![forbid(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![forbid(clippy::panic)]

pub mod error;
pub mod lookup;
pub mod reconciler;
pub mod types;

pub use error::{Error, Result};
pub use lookup::SchemaLookup;
pub use reconciler::{ResourceReconciler, SchemaReconciler, TopicReconciler};
pub use types::{Phase, ResourceKind, SchemaRecord, TopicRecord};
