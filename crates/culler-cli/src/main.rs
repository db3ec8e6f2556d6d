//! Culler CLI - command-line interface for persisted activity ledgers.

use clap::Parser;
use culler_cli::commands;
use culler_cli::{Cli, Command, Config};

fn main() {
    if let Err(e) = run() {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    // Parse CLI arguments
    let cli = Cli::parse();

    // Load config, if any; flags override it
    let config = Config::load(cli.config.as_deref())?;
    let ledger_path = cli.ledger.unwrap_or(config.ledger_path);

    match cli.command {
        Command::List(args) => commands::execute_list(&ledger_path, &args)?,
        Command::Purge(args) => commands::execute_purge(&ledger_path, &args)?,
    }

    Ok(())
}
