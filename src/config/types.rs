//! Core configuration types and loading.

use serde::Deserialize;
use std::path::{Path, PathBuf};
use thiserror::Error;

use super::defaults::{default_max_in_flight, default_true};
use super::listen::ListenConfig;
use crate::commands::Policy;

/// Failure to obtain a configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),
}

/// Top-level configuration. Every section is optional.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub listen: ListenConfig,
    #[serde(default)]
    pub commands: CommandsConfig,
    #[serde(default)]
    pub queue: QueueConfig,
    #[serde(default)]
    pub diagnostics: DiagnosticsConfig,
}

impl Config {
    /// Load configuration from a TOML file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)?;
        Ok(config)
    }
}

/// Server behaviour.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ServerConfig {
    /// Debug mode: greet players on connect and echo errors caught by
    /// command error handlers into chat.
    #[serde(default)]
    pub debug: bool,
}

/// Chat command settings.
#[derive(Debug, Clone, Deserialize)]
pub struct CommandsConfig {
    /// Prefix that marks a chat line as a command (e.g. "!").
    /// Commands are disabled when unset.
    pub prefix: Option<String>,
    /// Register the built-in `ping` and `help` commands.
    #[serde(default = "default_true")]
    pub builtins: bool,
    /// Quoting policy for splitting command lines.
    #[serde(default)]
    pub quoting: Policy,
}

impl Default for CommandsConfig {
    fn default() -> Self {
        Self {
            prefix: None,
            builtins: true,
            quoting: Policy::default(),
        }
    }
}

/// Command request flow control.
#[derive(Debug, Clone, Deserialize)]
pub struct QueueConfig {
    /// Maximum number of unacknowledged command requests.
    #[serde(default = "default_max_in_flight")]
    pub max_in_flight: usize,
}

impl Default for QueueConfig {
    fn default() -> Self {
        Self {
            max_in_flight: default_max_in_flight(),
        }
    }
}

/// Diagnostics output.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct DiagnosticsConfig {
    /// Directory receiving one pretty-printed JSON file per inbound message.
    pub dump_dir: Option<PathBuf>,
}
