//! Registered chat commands.

use std::fmt;
use std::sync::Arc;

use super::convert::{Args, Param};
use crate::error::{ErrorKind, HandlerResult};
use crate::handlers::core::{ChatContext, CommandHandler, ErrorHandler};

/// A chat command: names, declared parameters, handler, and error handlers.
///
/// Built with the `with_*` methods and handed to
/// [`App::add_command`](crate::App::add_command).
///
/// # Example
///
/// ```ignore
/// let cmd = Command::new("tp", TeleportCommand)
///     .with_alias("teleport")
///     .with_param(Param::new("target"))
///     .with_param(Param::new("x").of(Converter::int()).with_default(0i64))
///     .with_description("Teleport a player");
/// ```
#[derive(Clone)]
pub struct Command {
    name: String,
    aliases: Vec<String>,
    params: Vec<Param>,
    handler: Arc<dyn CommandHandler>,
    enabled: bool,
    description: String,
    help: String,
    error_handlers: Vec<(ErrorKind, Arc<dyn ErrorHandler>)>,
}

impl Command {
    pub fn new(name: impl Into<String>, handler: impl CommandHandler + 'static) -> Self {
        Self {
            name: name.into(),
            aliases: Vec::new(),
            params: Vec::new(),
            handler: Arc::new(handler),
            enabled: true,
            description: String::new(),
            help: String::new(),
            error_handlers: Vec::new(),
        }
    }

    pub fn with_alias(mut self, alias: impl Into<String>) -> Self {
        self.aliases.push(alias.into());
        self
    }

    /// Append a positional parameter.
    pub fn with_param(mut self, param: Param) -> Self {
        self.params.push(param);
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn with_help(mut self, help: impl Into<String>) -> Self {
        self.help = help.into();
        self
    }

    pub fn with_enabled(mut self, enabled: bool) -> Self {
        self.enabled = enabled;
        self
    }

    /// Install `handler` for every kind in `kinds`.
    ///
    /// Errors are matched against kinds in the order they were first
    /// installed; installing an existing kind again replaces its handler in
    /// place.
    pub fn on_error<K>(mut self, kinds: K, handler: impl ErrorHandler + 'static) -> Self
    where
        K: IntoIterator<Item = ErrorKind>,
    {
        let handler: Arc<dyn ErrorHandler> = Arc::new(handler);
        for kind in kinds {
            match self.error_handlers.iter_mut().find(|(k, _)| *k == kind) {
                Some(slot) => slot.1 = Arc::clone(&handler),
                None => self.error_handlers.push((kind, Arc::clone(&handler))),
            }
        }
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn aliases(&self) -> &[String] {
        &self.aliases
    }

    /// Primary name followed by aliases.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        std::iter::once(self.name.as_str()).chain(self.aliases.iter().map(String::as_str))
    }

    pub fn params(&self) -> &[Param] {
        &self.params
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    pub fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn help(&self) -> &str {
        &self.help
    }

    /// First installed error handler whose kind covers `kind`.
    pub fn error_handler_for(&self, kind: ErrorKind) -> Option<&Arc<dyn ErrorHandler>> {
        self.error_handlers
            .iter()
            .find(|(registered, _)| kind.is_subkind_of(*registered))
            .map(|(_, handler)| handler)
    }

    /// Run the command handler.
    pub async fn invoke(&self, ctx: &mut ChatContext<'_>, args: Args) -> HandlerResult {
        self.handler.call(ctx, args).await
    }
}

impl fmt::Debug for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Command")
            .field("name", &self.name)
            .field("aliases", &self.aliases)
            .field("params", &self.params)
            .field("enabled", &self.enabled)
            .field(
                "error_handlers",
                &self.error_handlers.iter().map(|(k, _)| k).collect::<Vec<_>>(),
            )
            .finish()
    }
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}
