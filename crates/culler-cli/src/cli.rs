//! Command-line argument definitions.

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

/// Offline inspection and maintenance of a persisted activity ledger.
#[derive(Debug, Parser)]
#[command(name = "culler", version, about)]
pub struct Cli {
    /// Path to the persisted ledger file (overrides the config file)
    #[arg(long, env = "CULLER_LEDGER", global = true)]
    pub ledger: Option<PathBuf>,

    /// Path to a TOML config file
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Command to execute
    #[command(subcommand)]
    pub command: Command,
}

/// Available commands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// List ledger entries with their last-activity ages
    List(ListArgs),

    /// Remove entries idle longer than a threshold
    Purge(PurgeArgs),
}

/// Arguments for the list command.
#[derive(Debug, Args)]
pub struct ListArgs {
    /// Only show entries idle at least this many seconds
    #[arg(long)]
    pub idle_for: Option<u64>,
}

/// Arguments for the purge command.
#[derive(Debug, Args)]
pub struct PurgeArgs {
    /// Idle threshold in seconds; entries older than this are removed
    #[arg(long)]
    pub older_than: u64,

    /// Show what would be removed without rewriting the file
    #[arg(long)]
    pub dry_run: bool,
}
