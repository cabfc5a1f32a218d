#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]

//! # streamreg-client
//!
//! HTTP clients for a schema registry and for a topic-administration endpoint.
//!
//! ## Features
//!
//! - Register, list, fetch and delete schema versions by subject
//! - Resolve the version a registration was assigned
//! - Create topics through the bootstrap-servers endpoint
//! - Closed enums for schema types and cleanup policies
//!
//! ## Example
//!
//! ```ignore
//! use std::sync::Arc;
//! use streamreg_client::{RegistryClient, SchemaRegistry, SchemaType, Subject, VersionResolver};
//!
//! let client = Arc::new(RegistryClient::from_url("http://localhost:8081")?);
//! let subject = Subject::new("orders-value")?;
//!
//! let id = client
//!     .register_schema(&subject, r#"{"type":"string"}"#, SchemaType::Avro)
//!     .await?;
//! let version = VersionResolver::new(client).current_version(&subject).await?;
//! ```

pub mod client;
pub mod config;
pub mod error;
mod http;
pub mod resolver;
pub mod topic;
pub mod types;

pub use client::{RegistryClient, SchemaRegistry};
pub use config::{RegistryConfig, SCHEMA_REGISTRY_MEDIA_TYPE};
pub use error::{Error, Result};
pub use resolver::{VersionResolver, highest_version};
pub use topic::{TopicAdmin, TopicClient};
pub use types::{
    CleanupPolicy, DEFAULT_PARTITIONS, DEFAULT_REPLICATION_FACTOR, SchemaType, SchemaVersion,
    Subject, TopicSpec, VersionSelector,
};
