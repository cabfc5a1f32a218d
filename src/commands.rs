//! CLI command handlers.
//!
//! Every handler builds the clients it needs from the provider config,
//! runs one reconciliation call and returns the record to print.

use std::io::Read;
use std::path::Path;
use std::sync::Arc;

use anyhow::{Context, Result};
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;
use streamreg_client::{RegistryClient, Subject, TopicClient};
use streamreg_reconciler::{ResourceReconciler, SchemaLookup, SchemaReconciler, TopicReconciler};
use tracing::info;

use crate::cli::{Commands, LifecycleCommands, SchemaCommands};
use crate::config::ProviderConfig;

/// Execute a CLI command.
///
/// Returns the record to print, or `None` when the phase produces none.
///
/// # Errors
///
/// Returns an error if configuration is missing, a record cannot be read,
/// or reconciliation fails.
pub async fn execute_command(command: Commands, config: &ProviderConfig) -> Result<Option<Value>> {
    match command {
        Commands::Schema { command } => cmd_schema(command, config).await,
        Commands::Topic { command } => cmd_topic(command, config).await,
    }
}

async fn cmd_schema(command: SchemaCommands, config: &ProviderConfig) -> Result<Option<Value>> {
    let registry = Arc::new(RegistryClient::with_config(config.registry_config()?)?);

    match command {
        SchemaCommands::Lifecycle(phase) => {
            run_lifecycle(&SchemaReconciler::new(registry), "schema", phase).await
        }
        SchemaCommands::Lookup(arg) => {
            let subject = Subject::new(arg.subject)?;
            let record = SchemaLookup::new(registry)
                .lookup(&subject)
                .await
                .with_context(|| format!("schema lookup failed for '{subject}'"))?;
            to_output(&record)
        }
        SchemaCommands::Import(arg) => {
            let subject = Subject::new(arg.subject)?;
            let record = SchemaLookup::new(registry)
                .import(&subject)
                .await
                .with_context(|| format!("schema import failed for '{subject}'"))?;
            to_output(&record)
        }
    }
}

async fn cmd_topic(command: LifecycleCommands, config: &ProviderConfig) -> Result<Option<Value>> {
    let admin = Arc::new(TopicClient::with_config(config.topic_config()?)?);
    run_lifecycle(&TopicReconciler::new(admin), "topic", command).await
}

async fn run_lifecycle<R, T>(
    reconciler: &R,
    kind: &str,
    command: LifecycleCommands,
) -> Result<Option<Value>>
where
    R: ResourceReconciler<Record = T>,
    T: Serialize + DeserializeOwned + Send + Sync,
{
    match command {
        LifecycleCommands::Create(arg) => {
            let desired: T = read_record(&arg.file)?;
            let record = reconciler
                .create(&desired)
                .await
                .with_context(|| format!("{kind} create failed"))?;
            to_output(&record)
        }
        LifecycleCommands::Read(arg) => {
            let current: T = read_record(&arg.file)?;
            let record = reconciler
                .read(&current)
                .await
                .with_context(|| format!("{kind} read failed"))?;
            to_output(&record)
        }
        LifecycleCommands::Update { current, desired } => {
            let current: T = read_record(&current)?;
            let desired: T = read_record(&desired)?;
            let record = reconciler
                .update(&current, &desired)
                .await
                .with_context(|| format!("{kind} update failed"))?;
            to_output(&record)
        }
        LifecycleCommands::Delete(arg) => {
            let current: T = read_record(&arg.file)?;
            reconciler
                .delete(&current)
                .await
                .with_context(|| format!("{kind} delete failed"))?;
            info!(kind, "Deleted");
            Ok(None)
        }
    }
}

/// Read a record from `path`, or stdin for `-`.
///
/// `.toml` files parse as TOML; everything else, stdin included, is tried
/// as JSON first and TOML second.
pub fn read_record<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let content = if path == Path::new("-") {
        let mut buf = String::new();
        std::io::stdin()
            .read_to_string(&mut buf)
            .context("Failed to read record from stdin")?;
        buf
    } else {
        std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read record {}", path.display()))?
    };

    parse_record(&content, path.extension().is_some_and(|e| e == "toml"))
        .with_context(|| format!("Failed to parse record {}", path.display()))
}

fn parse_record<T: DeserializeOwned>(content: &str, toml_only: bool) -> Result<T> {
    if toml_only {
        return Ok(toml::from_str(content)?);
    }
    match serde_json::from_str(content) {
        Ok(record) => Ok(record),
        Err(json_err) => toml::from_str(content).map_err(|_| json_err.into()),
    }
}

fn to_output<T: Serialize>(record: &T) -> Result<Option<Value>> {
    Ok(Some(serde_json::to_value(record)?))
}
