//! # streamreg - command-line entry point
//!
//! ## Sequence
//!
//! 1. **Tracing** - logs to stderr, filtered by `RUST_LOG` (default `info`)
//! 2. **Configuration** - optional `--config` file, then `STREAMREG_*` variables
//! 3. **Command** - one lifecycle phase against the registry or topic endpoint
//! 4. **Output** - the reconciled record as pretty JSON on stdout
//!
//! ## Error Handling
//!
//! Failures carry the registry's own error text and exit non-zero. Nothing
//! is printed on stdout for a failed command.

#![forbid(unsafe_code)]
#![forbid(clippy::unwrap_used)]
#![forbid(clippy::panic)]
#![deny(clippy::expect_used)]

use anyhow::{Context, Result};
use clap::Parser;
use tracing::{debug, info};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use streamreg::cli::Cli;
use streamreg::commands::execute_command;
use streamreg::config::ProviderConfig;

#[tokio::main]
async fn main() -> Result<()> {
    init_tracing();

    let cli = Cli::parse();
    let config = ProviderConfig::load(cli.config.as_deref())
        .context("Failed to load provider configuration")?;
    debug!(
        schema_registry_url = ?config.schema_registry_url,
        bootstrap_servers = ?config.bootstrap_servers,
        "Provider configured"
    );

    let output = execute_command(cli.command, &config).await?;

    if let Some(record) = output {
        let rendered =
            serde_json::to_string_pretty(&record).context("Failed to render reconciled record")?;
        println!("{rendered}");
    }

    info!("Done");
    Ok(())
}

/// Initialize tracing subscriber with environment filter, writing to stderr.
fn init_tracing() {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}
