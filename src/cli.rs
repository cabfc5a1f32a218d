//! CLI command definitions using clap.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

/// streamreg - schema and topic reconciliation
#[derive(Parser, Debug)]
#[command(name = "streamreg")]
#[command(version)]
#[command(about = "Reconcile schema-registry subjects and topics against declared records")]
#[command(long_about = "Each command reads a desired or stored record (JSON or TOML), runs \
    one lifecycle phase against the registry, and prints the reconciled record as JSON on \
    stdout. Logs go to stderr; set RUST_LOG to adjust.")]
pub struct Cli {
    /// Provider config file (TOML, or JSON by extension)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Reconcile a schema subject
    Schema {
        #[command(subcommand)]
        command: SchemaCommands,
    },

    /// Reconcile a topic
    Topic {
        #[command(subcommand)]
        command: LifecycleCommands,
    },
}

#[derive(Subcommand, Debug)]
pub enum SchemaCommands {
    #[command(flatten)]
    Lifecycle(LifecycleCommands),

    /// Show the highest version of a subject
    Lookup(SubjectArg),

    /// Produce a stored record for an existing subject
    Import(SubjectArg),
}

#[derive(Args, Debug)]
pub struct SubjectArg {
    /// Subject name
    #[arg(short, long)]
    pub subject: String,
}

/// The four lifecycle phases.
#[derive(Subcommand, Debug)]
pub enum LifecycleCommands {
    /// Create from a desired record
    Create(RecordArg),

    /// Refresh a stored record
    Read(RecordArg),

    /// Move a stored record to a desired one
    Update {
        /// Stored record
        #[arg(long)]
        current: PathBuf,

        /// Desired record
        #[arg(long)]
        desired: PathBuf,
    },

    /// Delete what a stored record describes
    Delete(RecordArg),
}

#[derive(Args, Debug)]
pub struct RecordArg {
    /// Record file, or `-` for stdin
    #[arg(short, long)]
    pub file: PathBuf,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_schema_update() -> Result<(), clap::Error> {
        let cli = Cli::try_parse_from([
            "streamreg",
            "schema",
            "update",
            "--current",
            "old.json",
            "--desired",
            "new.json",
            "--config",
            "provider.toml",
        ])?;

        assert_eq!(cli.config, Some(PathBuf::from("provider.toml")));
        assert!(matches!(
            cli.command,
            Commands::Schema {
                command: SchemaCommands::Lifecycle(LifecycleCommands::Update { .. })
            }
        ));
        Ok(())
    }

    #[test]
    fn test_parse_topic_create_from_stdin() -> Result<(), clap::Error> {
        let cli = Cli::try_parse_from(["streamreg", "topic", "create", "--file", "-"])?;

        let Commands::Topic {
            command: LifecycleCommands::Create(arg),
        } = cli.command
        else {
            return Err(clap::Error::new(clap::error::ErrorKind::InvalidSubcommand));
        };
        assert_eq!(arg.file, PathBuf::from("-"));
        Ok(())
    }

    #[test]
    fn test_topic_has_no_lookup() {
        assert!(Cli::try_parse_from(["streamreg", "topic", "lookup", "-s", "orders"]).is_err());
    }
}
