//! Static configuration for the adapter.
//!
//! The configuration is a TOML document compiled into the binary from
//! `adapter.toml`. Changing the match runner path, the tuned engine, the
//! opponent pool or the match options means editing that file and rebuilding.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use thiserror::Error;

/// The TOML document embedded at build time.
pub const BUILTIN_CONFIG: &str = include_str!("../adapter.toml");

/// Errors that can occur when loading or validating configuration.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// The configuration is not valid TOML or has mistyped fields.
    #[error("Failed to parse config: {0}")]
    ParseError(#[from] toml::de::Error),
    /// No opponents were configured, so no game can be planned.
    #[error("Opponent pool is empty")]
    EmptyOpponentPool,
    /// The tuned engine has no base identifier.
    #[error("Engine identifier is empty")]
    MissingEngine,
}

/// Configuration of one adapter deployment.
///
/// Every field has a default so a partial document still loads.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq, Eq)]
pub struct AdapterConfig {
    /// Path to the cutechess-cli executable.
    #[serde(default = "default_cutechess_cli_path")]
    pub cutechess_cli_path: PathBuf,
    /// Engine specification of the engine being tuned (e.g. `conf=MyEngine`).
    #[serde(default = "default_engine")]
    pub engine: String,
    /// Template of the init string that sets one parameter.
    /// `{name}` and `{value}` are substituted per parameter.
    #[serde(default = "default_engine_param_cmd")]
    pub engine_param_cmd: String,
    /// Ordered opponent pool, indexed by the seed.
    #[serde(default = "default_opponents")]
    pub opponents: Vec<String>,
    /// Extra cutechess-cli options appended after both engines.
    #[serde(default = "default_options")]
    pub options: String,
}

fn default_cutechess_cli_path() -> PathBuf {
    PathBuf::from("path_to_cutechess-cli/cutechess-cli.sh")
}

fn default_engine() -> String {
    "conf=MyEngine".to_string()
}

fn default_engine_param_cmd() -> String {
    "setvalue {name} {value}".to_string()
}

fn default_opponents() -> Vec<String> {
    vec![
        "conf=OpponentEngine1".to_string(),
        "conf=OpponentEngine2".to_string(),
        "conf=OpponentEngine3".to_string(),
    ]
}

fn default_options() -> String {
    "-each tc=40/1+0.05 -draw 80 1 -resign 5 500".to_string()
}

impl Default for AdapterConfig {
    fn default() -> Self {
        Self {
            cutechess_cli_path: default_cutechess_cli_path(),
            engine: default_engine(),
            engine_param_cmd: default_engine_param_cmd(),
            opponents: default_opponents(),
            options: default_options(),
        }
    }
}

impl AdapterConfig {
    /// Loads the configuration compiled into the binary.
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`] if the embedded document does not parse
    /// or fails validation.
    pub fn load() -> Result<Self, ConfigError> {
        Self::from_toml(BUILTIN_CONFIG)
    }

    /// Parses and validates a configuration document.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::ParseError`] for invalid TOML,
    /// [`ConfigError::EmptyOpponentPool`] if `opponents` is empty and
    /// [`ConfigError::MissingEngine`] if `engine` is blank.
    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Checks the invariants the planner relies on.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.opponents.is_empty() {
            return Err(ConfigError::EmptyOpponentPool);
        }
        if self.engine.trim().is_empty() {
            return Err(ConfigError::MissingEngine);
        }
        Ok(())
    }

    /// Number of engines in the opponent pool.
    pub fn pool_size(&self) -> usize {
        self.opponents.len()
    }
}
