//! Configuration management for the CLI.

use crate::error::{CliError, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Default config file looked up in the working directory.
pub const DEFAULT_CONFIG_FILE: &str = "culler.toml";

/// CLI configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Path to the persisted ledger file
    #[serde(default = "default_ledger_path")]
    pub ledger_path: PathBuf,
}

fn default_ledger_path() -> PathBuf {
    PathBuf::from("updates.dat")
}

impl Default for Config {
    fn default() -> Self {
        Self {
            ledger_path: default_ledger_path(),
        }
    }
}

impl Config {
    /// Load configuration from an explicit path, from `culler.toml` in the
    /// working directory, or fall back to defaults.
    ///
    /// An explicitly named file must exist and parse; the implicit one is
    /// optional.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => {
                if !path.exists() {
                    return Err(CliError::Config(format!(
                        "Config file '{}' not found",
                        path.display()
                    )));
                }
                let contents = fs::read_to_string(path)?;
                Ok(toml::from_str(&contents)?)
            }
            None => {
                let implicit = Path::new(DEFAULT_CONFIG_FILE);
                if implicit.exists() {
                    let contents = fs::read_to_string(implicit)?;
                    Ok(toml::from_str(&contents)?)
                } else {
                    Ok(Self::default())
                }
            }
        }
    }
}
