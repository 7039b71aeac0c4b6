//! bedrockd - WebSocket server for Minecraft Bedrock Edition.
//!
//! Serves the built-in chat commands; embed the library to add your own.

use bedrockd::config::{Config, validate};
use bedrockd::handlers::register_builtins;
use bedrockd::{App, Gateway, Settings};
use std::sync::Arc;
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_target(true)
        .init();

    // Load configuration
    let config_path = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "config.toml".to_string());

    let config = match Config::load(&config_path) {
        Ok(config) => config,
        Err(bedrockd::config::ConfigError::Io(e)) if e.kind() == std::io::ErrorKind::NotFound => {
            warn!(path = %config_path, "Config file not found, using defaults");
            Config::default()
        }
        Err(e) => {
            error!(path = %config_path, error = %e, "Failed to load config");
            return Err(e.into());
        }
    };

    if let Err(errors) = validate(&config) {
        for e in &errors {
            error!(error = %e, "Invalid configuration");
        }
        return Err(anyhow::anyhow!(
            "configuration has {} error(s), see above",
            errors.len()
        ));
    }

    info!(
        address = %config.listen.address,
        prefix = config.commands.prefix.as_deref(),
        debug = config.server.debug,
        "Starting bedrockd"
    );

    let mut app = App::new(Settings::from(&config));
    if config.commands.builtins {
        if config.commands.prefix.is_some() {
            register_builtins(&mut app)?;
        } else {
            warn!("commands.builtins is set but commands.prefix is not; built-in commands disabled");
        }
    }

    let gateway = Gateway::bind(config.listen.address, Arc::new(app)).await?;
    gateway.run().await
}
