//! Chat command and event handlers.
//!
//! [`core`] holds the handler traits, contexts, registry, and outbound
//! middleware; [`builtin`] provides the stock `ping` and `help` commands.

pub mod builtin;
pub mod core;

pub use builtin::{HelpCommand, PingCommand, register_builtins};
pub use core::{
    ALL_PLAYERS, ChatContext, CommandHandler, CommandParser, Context, ErrorHandler, EventHandler,
    Outbound, OutboundError, Registry,
};
