//! Culler CLI - offline maintenance for persisted activity ledgers.
//!
//! The running service owns the ledger file between `start` and `stop`; this
//! binary is for everything outside that window: inspecting what a server
//! left behind, and pruning records before the next boot.

#![warn(missing_docs)]

pub mod commands;

mod cli;
mod config;
mod error;

pub use cli::{Cli, Command, ListArgs, PurgeArgs};
pub use config::Config;
pub use error::{CliError, Result};
