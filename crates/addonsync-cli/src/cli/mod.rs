//! CLI for addonsync.

mod commands;

use addonsync_core::config::{self, UpdatePolicy};
use anyhow::Result;
use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

use commands::{run_completions, run_pull, run_push, run_update};

/// Top-level CLI for addonsync.
#[derive(Debug, Parser)]
#[command(name = "addonsync")]
#[command(about = "addonsync: keep local addon catalogs in step with their published manifests", long_about = None)]
pub struct Cli {
    /// Config file to use instead of ~/.config/addonsync/config.toml.
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: CliCommand,
}

/// Persistence policy override for `update`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum PolicyArg {
    /// Rewrite only the version value, keeping the file's formatting.
    Patch,
    /// Replace the whole manifest and re-serialize the catalog.
    Replace,
}

impl From<PolicyArg> for UpdatePolicy {
    fn from(p: PolicyArg) -> Self {
        match p {
            PolicyArg::Patch => UpdatePolicy::Patch,
            PolicyArg::Replace => UpdatePolicy::Replace,
        }
    }
}

#[derive(Debug, Subcommand)]
pub enum CliCommand {
    /// Sync every enabled catalog in the update list with its published manifests.
    Update {
        /// Update list to read (defaults to `list_file` from the config).
        #[arg(long, value_name = "PATH")]
        list: Option<PathBuf>,
        /// Persistence policy for this run (defaults to `policy` from the config).
        #[arg(long, value_enum)]
        policy: Option<PolicyArg>,
    },

    /// Pull or push a user's addon collection.
    Collection {
        #[command(subcommand)]
        action: CollectionCommand,
    },

    /// Print a shell completion script.
    Completions {
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },
}

#[derive(Debug, Subcommand)]
pub enum CollectionCommand {
    /// Save the remote collection as a catalog file.
    Pull {
        /// Account auth key.
        #[arg(long, env = "ADDONSYNC_AUTH_KEY", hide_env_values = true)]
        auth_key: String,
        /// Where to write the collection.
        #[arg(long, default_value = "collection.json", value_name = "PATH")]
        out: PathBuf,
    },

    /// Replace the remote collection with the addons of a catalog file.
    Push {
        /// Account auth key.
        #[arg(long, env = "ADDONSYNC_AUTH_KEY", hide_env_values = true)]
        auth_key: String,
        /// Catalog whose addons become the collection.
        catalog: PathBuf,
    },
}

impl CliCommand {
    pub async fn run_from_args() -> Result<()> {
        let cli = Cli::parse();

        if let CliCommand::Completions { shell } = cli.command {
            run_completions(shell);
            return Ok(());
        }

        let cfg = match &cli.config {
            Some(path) => config::load_from(path)?,
            None => config::load_or_init()?,
        };
        tracing::debug!("loaded config: {:?}", cfg);

        match cli.command {
            CliCommand::Update { list, policy } => {
                run_update(&cfg, list.as_deref(), policy.map(UpdatePolicy::from)).await?
            }
            CliCommand::Collection { action } => match action {
                CollectionCommand::Pull { auth_key, out } => run_pull(&cfg, auth_key, &out).await?,
                CollectionCommand::Push { auth_key, catalog } => {
                    run_push(&cfg, auth_key, &catalog).await?
                }
            },
            CliCommand::Completions { .. } => {}
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests;
