//! Command registry.
//!
//! Owns every registered [`Command`] and guarantees that primary names and
//! aliases are unique across the whole registry.

use std::sync::Arc;

use crate::commands::Command;
use crate::error::{HandlerError, SetupError};
use crate::handlers::core::ErrorHandler;

/// Registry of chat commands, in registration order.
#[derive(Debug, Default)]
pub struct Registry {
    commands: Vec<Command>,
}

impl Registry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a command after validating its names.
    pub fn register(&mut self, command: Command) -> Result<(), SetupError> {
        if command.name().is_empty() {
            return Err(SetupError::EmptyName);
        }

        let mut seen: Vec<&str> = Vec::new();
        for name in command.names() {
            if name.chars().any(char::is_whitespace) {
                return Err(SetupError::Whitespace(name.to_string()));
            }
            if seen.contains(&name) || self.find(name).is_some() {
                return Err(SetupError::DuplicateName(name.to_string()));
            }
            seen.push(name);
        }

        tracing::debug!(command = %command.name(), aliases = ?command.aliases(), "Registered command");
        self.commands.push(command);
        Ok(())
    }

    /// Remove the command whose primary name is `name`.
    pub fn unregister(&mut self, name: &str) -> Option<Command> {
        let position = self.commands.iter().position(|c| c.name() == name)?;
        Some(self.commands.remove(position))
    }

    /// Look up a command by primary name or alias.
    pub fn find(&self, name: &str) -> Option<&Command> {
        self.commands.iter().find(|c| c.names().any(|n| n == name))
    }

    /// Mutable lookup by primary name or alias, e.g. to toggle `enabled`.
    pub fn get_mut(&mut self, name: &str) -> Option<&mut Command> {
        self.commands.iter_mut().find(|c| c.names().any(|n| n == name))
    }

    /// Every primary name and alias.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.commands.iter().flat_map(Command::names)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Command> {
        self.commands.iter()
    }

    pub fn len(&self) -> usize {
        self.commands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    /// First error handler of `command` that covers the kind of `error`.
    pub fn resolve_error_handler<'c>(
        command: &'c Command,
        error: &HandlerError,
    ) -> Option<&'c Arc<dyn ErrorHandler>> {
        command.error_handler_for(error.kind())
    }
}
