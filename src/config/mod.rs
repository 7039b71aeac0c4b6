//! Configuration loading and management.
//!
//! This module is split into logical submodules:
//! - [`types`]: Core config struct definitions and loading
//! - [`listen`]: WebSocket listener configuration
//! - [`defaults`]: serde default values
//! - [`validation`]: startup checks collecting every problem found

pub mod defaults;
mod listen;
mod types;
pub mod validation;

pub use listen::ListenConfig;
pub use types::{
    CommandsConfig, Config, ConfigError, DiagnosticsConfig, QueueConfig, ServerConfig,
};
pub use validation::{ValidationError, validate};
