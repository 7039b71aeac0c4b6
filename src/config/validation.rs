//! Configuration validation.
//!
//! Validates configuration at startup to catch common errors early.

use super::Config;
use thiserror::Error;

/// Validation errors for configuration.
#[derive(Debug, Error)]
pub enum ValidationError {
    #[error("commands.prefix must not be empty or whitespace")]
    EmptyPrefix,
    #[error("commands.prefix must not contain whitespace, got {0:?}")]
    PrefixWhitespace(String),
    #[error("queue.max_in_flight must be at least 1")]
    ZeroInFlight,
    #[error("diagnostics.dump_dir parent directory does not exist: {0}")]
    DumpDirInvalid(String),
}

/// Validate a configuration, returning all errors found.
pub fn validate(config: &Config) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if let Some(ref prefix) = config.commands.prefix {
        if prefix.trim().is_empty() {
            errors.push(ValidationError::EmptyPrefix);
        } else if prefix.chars().any(char::is_whitespace) {
            errors.push(ValidationError::PrefixWhitespace(prefix.clone()));
        }
    }

    if config.queue.max_in_flight == 0 {
        errors.push(ValidationError::ZeroInFlight);
    }

    // The dump directory itself is created on demand
    if let Some(ref dir) = config.diagnostics.dump_dir
        && let Some(parent) = dir.parent()
        && !parent.as_os_str().is_empty()
        && !parent.exists()
    {
        errors.push(ValidationError::DumpDirInvalid(dir.display().to_string()));
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
