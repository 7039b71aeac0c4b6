//! Handler traits.
//!
//! Four kinds of user code plug into a session:
//!
//! - [`CommandHandler`]: body of a chat command, receives converted [`Args`].
//! - [`EventHandler`]: lifecycle (`connect`/`disconnect`) and game events.
//! - [`ErrorHandler`]: per-command recovery for a matched [`ErrorKind`].
//! - [`CommandParser`]: replaces command lookup with whole-string parsing.
//!
//! [`ErrorKind`]: crate::error::ErrorKind

use async_trait::async_trait;

use super::context::{ChatContext, Context};
use crate::commands::Args;
use crate::error::{HandlerError, HandlerResult};

/// Body of a chat command.
#[async_trait]
pub trait CommandHandler: Send + Sync {
    async fn call(&self, ctx: &mut ChatContext<'_>, args: Args) -> HandlerResult;
}

/// Handler for a lifecycle or game event.
#[async_trait]
pub trait EventHandler: Send + Sync {
    async fn handle(&self, ctx: &mut Context<'_>) -> HandlerResult;

    /// Identity used when logging failures.
    fn name(&self) -> &'static str {
        std::any::type_name::<Self>()
    }
}

/// Per-command error handler.
#[async_trait]
pub trait ErrorHandler: Send + Sync {
    async fn handle(&self, ctx: &mut ChatContext<'_>, error: &HandlerError) -> HandlerResult;

    /// Identity used when logging failures.
    fn name(&self) -> &'static str {
        std::any::type_name::<Self>()
    }
}

/// Whole-string command parser, used instead of registered commands.
///
/// Receives the chat text with the prefix already stripped.
#[async_trait]
pub trait CommandParser: Send + Sync {
    async fn parse(&self, ctx: &mut ChatContext<'_>, input: &str) -> HandlerResult;

    /// Identity used when logging failures.
    fn name(&self) -> &'static str {
        std::any::type_name::<Self>()
    }
}
