//! Application: handler tables, command registry, and settings.
//!
//! An [`App`] is assembled before serving and shared read-only with the
//! session through an `Arc`. Two apps never share any table.

use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::Arc;

use bedrock_proto::{PLAYER_MESSAGE, pascal_case};

use crate::commands::{Command, Policy};
use crate::config::Config;
use crate::error::SetupError;
use crate::handlers::core::{CommandParser, EventHandler, Registry};
use crate::queue::DEFAULT_MAX_IN_FLIGHT;

/// Lifecycle event fired after the game client connected.
pub const CONNECT: &str = "connect";
/// Lifecycle event fired after the connection closed.
pub const DISCONNECT: &str = "disconnect";

/// Runtime behaviour switches.
#[derive(Debug, Clone)]
pub struct Settings {
    /// Chat prefix marking a command; commands are disabled without one.
    pub prefix: Option<String>,
    /// Debug mode: welcome banner and error-handler echo.
    pub debug: bool,
    /// Ceiling on unacknowledged command requests.
    pub max_in_flight: usize,
    /// Tokenizer policy for command lines.
    pub quoting: Policy,
    /// Directory receiving a JSON dump of every inbound message.
    pub dump_dir: Option<PathBuf>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            prefix: None,
            debug: false,
            max_in_flight: DEFAULT_MAX_IN_FLIGHT,
            quoting: Policy::Strict,
            dump_dir: None,
        }
    }
}

impl Settings {
    pub fn with_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.prefix = Some(prefix.into());
        self
    }

    pub fn with_debug(mut self, debug: bool) -> Self {
        self.debug = debug;
        self
    }

    pub fn with_max_in_flight(mut self, max_in_flight: usize) -> Self {
        self.max_in_flight = max_in_flight;
        self
    }

    pub fn with_quoting(mut self, quoting: Policy) -> Self {
        self.quoting = quoting;
        self
    }

    pub fn with_dump_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.dump_dir = Some(dir.into());
        self
    }

    /// The command prefix, `None` when unset or empty.
    pub fn command_prefix(&self) -> Option<&str> {
        self.prefix.as_deref().filter(|p| !p.is_empty())
    }
}

impl From<&Config> for Settings {
    fn from(config: &Config) -> Self {
        Self {
            prefix: config.commands.prefix.clone(),
            debug: config.server.debug,
            max_in_flight: config.queue.max_in_flight,
            quoting: config.commands.quoting,
            dump_dir: config.diagnostics.dump_dir.clone(),
        }
    }
}

/// Handler tables, command registry, and settings of one server instance.
#[derive(Default)]
pub struct App {
    settings: Settings,
    events: HashMap<String, Arc<dyn EventHandler>>,
    game_events: HashMap<String, Arc<dyn EventHandler>>,
    registry: Registry,
    parser: Option<Arc<dyn CommandParser>>,
    /// Set once commands or a parser were installed; never cleared.
    chat_subscribed: bool,
}

impl App {
    pub fn new(settings: Settings) -> Self {
        Self {
            settings,
            ..Self::default()
        }
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    /// Install a lifecycle handler ([`CONNECT`], [`DISCONNECT`]).
    ///
    /// Replaces any handler previously installed under `name`.
    pub fn add_event(&mut self, name: &str, handler: impl EventHandler + 'static) -> &mut Self {
        self.events.insert(name.to_string(), Arc::new(handler));
        self
    }

    pub fn remove_event(&mut self, name: &str) -> bool {
        self.events.remove(name).is_some()
    }

    /// Install a game event handler; `name` is normalised to PascalCase.
    pub fn add_game_event(
        &mut self,
        name: &str,
        handler: impl EventHandler + 'static,
    ) -> &mut Self {
        self.game_events.insert(pascal_case(name), Arc::new(handler));
        self
    }

    pub fn remove_game_event(&mut self, name: &str) -> bool {
        self.game_events.remove(&pascal_case(name)).is_some()
    }

    /// Register a chat command.
    pub fn add_command(&mut self, command: Command) -> Result<&mut Self, SetupError> {
        if self.parser.is_some() {
            return Err(SetupError::ParserInstalled);
        }
        if self.settings.command_prefix().is_none() {
            return Err(SetupError::MissingPrefix);
        }
        self.registry.register(command)?;
        self.chat_subscribed = true;
        Ok(self)
    }

    pub fn remove_command(&mut self, name: &str) -> Option<Command> {
        self.registry.unregister(name)
    }

    /// Mutable access to a command, e.g. to toggle `enabled`.
    pub fn command_mut(&mut self, name: &str) -> Option<&mut Command> {
        self.registry.get_mut(name)
    }

    /// Replace command lookup with a whole-string parser.
    pub fn set_parser(
        &mut self,
        parser: impl CommandParser + 'static,
    ) -> Result<&mut Self, SetupError> {
        if self.settings.command_prefix().is_none() {
            return Err(SetupError::ParserWithoutPrefix);
        }
        if !self.registry.is_empty() {
            return Err(SetupError::CommandsRegistered);
        }
        self.parser = Some(Arc::new(parser));
        self.chat_subscribed = true;
        Ok(self)
    }

    pub(crate) fn event(&self, name: &str) -> Option<&Arc<dyn EventHandler>> {
        self.events.get(name)
    }

    pub(crate) fn game_event(&self, name: &str) -> Option<&Arc<dyn EventHandler>> {
        self.game_events.get(name)
    }

    pub(crate) fn parser(&self) -> Option<&Arc<dyn CommandParser>> {
        self.parser.as_ref()
    }

    /// Game events to subscribe to on connect, sorted.
    pub fn subscriptions(&self) -> Vec<String> {
        let mut names: Vec<String> = self.game_events.keys().cloned().collect();
        if self.chat_subscribed && !self.game_events.contains_key(PLAYER_MESSAGE) {
            names.push(PLAYER_MESSAGE.to_string());
        }
        names.sort();
        names
    }
}

impl std::fmt::Debug for App {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut events: Vec<&String> = self.events.keys().collect();
        events.sort();
        f.debug_struct("App")
            .field("settings", &self.settings)
            .field("events", &events)
            .field("game_events", &self.subscriptions())
            .field("commands", &self.registry.len())
            .field("parser", &self.parser.as_ref().map(|p| p.name()))
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::Args;
    use crate::error::HandlerResult;
    use crate::handlers::core::{ChatContext, CommandHandler, Context};
    use async_trait::async_trait;

    struct Noop;

    #[async_trait]
    impl CommandHandler for Noop {
        async fn call(&self, _ctx: &mut ChatContext<'_>, _args: Args) -> HandlerResult {
            Ok(())
        }
    }

    #[async_trait]
    impl EventHandler for Noop {
        async fn handle(&self, _ctx: &mut Context<'_>) -> HandlerResult {
            Ok(())
        }
    }

    #[async_trait]
    impl CommandParser for Noop {
        async fn parse(&self, _ctx: &mut ChatContext<'_>, _input: &str) -> HandlerResult {
            Ok(())
        }
    }

    #[test]
    fn test_command_requires_prefix() {
        let mut app = App::new(Settings::default());
        let err = app.add_command(Command::new("foo", Noop)).unwrap_err();
        assert_eq!(err, SetupError::MissingPrefix);
    }

    #[test]
    fn test_empty_prefix_counts_as_unset() {
        let mut app = App::new(Settings::default().with_prefix(""));
        assert_eq!(app.settings().command_prefix(), None);
        assert_eq!(
            app.add_command(Command::new("foo", Noop)).err(),
            Some(SetupError::MissingPrefix)
        );
        assert_eq!(app.set_parser(Noop).err(), Some(SetupError::ParserWithoutPrefix));
        assert!(app.subscriptions().is_empty());
    }

    #[test]
    fn test_parser_requires_prefix() {
        let mut app = App::new(Settings::default());
        assert_eq!(app.set_parser(Noop).err(), Some(SetupError::ParserWithoutPrefix));
    }

    #[test]
    fn test_parser_and_commands_exclusive() {
        let mut app = App::new(Settings::default().with_prefix("!"));
        app.set_parser(Noop).unwrap();
        assert_eq!(
            app.add_command(Command::new("foo", Noop)).err(),
            Some(SetupError::ParserInstalled)
        );

        let mut app = App::new(Settings::default().with_prefix("!"));
        app.add_command(Command::new("foo", Noop)).unwrap();
        assert_eq!(app.set_parser(Noop).err(), Some(SetupError::CommandsRegistered));
    }

    #[test]
    fn test_game_event_names_normalised() {
        let mut app = App::new(Settings::default());
        app.add_game_event("block_broken", Noop);
        assert!(app.game_event("BlockBroken").is_some());
        assert!(app.remove_game_event("BlockBroken"));
        assert!(!app.remove_game_event("block_broken"));
    }

    #[test]
    fn test_lifecycle_table_is_separate() {
        let mut app = App::new(Settings::default());
        app.add_event(CONNECT, Noop);
        assert!(app.event(CONNECT).is_some());
        assert!(app.game_event(CONNECT).is_none());
        assert!(app.subscriptions().is_empty());
    }

    #[test]
    fn test_subscriptions() {
        let mut app = App::new(Settings::default().with_prefix("!"));
        app.add_game_event("player_join", Noop);
        assert_eq!(app.subscriptions(), ["PlayerJoin"]);

        app.add_command(Command::new("foo", Noop)).unwrap();
        assert_eq!(app.subscriptions(), ["PlayerJoin", "PlayerMessage"]);

        // Still subscribed after the last command is gone.
        app.remove_command("foo");
        assert_eq!(app.subscriptions(), ["PlayerJoin", "PlayerMessage"]);
    }

    #[test]
    fn test_apps_do_not_share_tables() {
        let mut a = App::new(Settings::default());
        let b = App::new(Settings::default());
        a.add_game_event("player_join", Noop);
        assert!(b.game_event("PlayerJoin").is_none());
    }

    #[test]
    fn test_command_mut_toggles() {
        let mut app = App::new(Settings::default().with_prefix("!"));
        app.add_command(Command::new("foo", Noop).with_alias("f")).unwrap();
        app.command_mut("f").unwrap().set_enabled(false);
        assert!(!app.registry().find("foo").unwrap().is_enabled());
    }
}
