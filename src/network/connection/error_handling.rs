//! Error policy for command, event, and transport failures.
//!
//! Command failures first go to the command's matching error handler. A
//! [`CommandError`] nobody handled is reported to the sender in red; anything
//! else is logged and swallowed so the connection keeps running.

use bedrock_proto::TransportError;
use tracing::{debug, error, warn};

use crate::commands::Command;
use crate::error::{CommandError, HandlerError};
use crate::handlers::core::{ChatContext, Registry};

/// Classification of transport read errors.
pub(super) enum ReadErrorAction {
    /// Undecodable frame: log and read the next one.
    Skip,
    /// The socket is unusable: disconnect.
    Disconnect,
}

/// Classify a transport read error into an actionable category.
pub(super) fn classify_read_error(e: &TransportError) -> ReadErrorAction {
    if e.is_fatal() {
        ReadErrorAction::Disconnect
    } else {
        ReadErrorAction::Skip
    }
}

/// Route a command failure.
///
/// `command` is `None` when no command was resolved (unknown name, tokenizer
/// failure, parser failure, disabled command).
pub(super) async fn handle_command_error(
    command: Option<&Command>,
    error: HandlerError,
    ctx: &mut ChatContext<'_>,
    debug_mode: bool,
) {
    debug!(
        command = command.map(Command::name),
        code = error.error_code(),
        error = %error,
        "Command failed"
    );

    if let Some(command) = command
        && let Some(handler) = Registry::resolve_error_handler(command, &error)
    {
        if debug_mode {
            let text = format!("[Debugger] '{}' raised {}", command.name(), error);
            if let Err(e) = ctx.reply_error(&text).await {
                warn!(error = %e, "Failed to send debugger notice");
            }
        }
        if let Err(e) = handler.handle(ctx, &error).await {
            log_unexpected(handler.name(), &e);
        }
        return;
    }

    match error {
        HandlerError::Command(e) => report(ctx, &e).await,
        other => log_unexpected(command.map_or("parser", Command::name), &other),
    }
}

/// Reply the error description to the sender in red.
async fn report(ctx: &mut ChatContext<'_>, error: &CommandError) {
    if let Err(e) = ctx.reply_error(&error.describe()).await {
        warn!(error = %e, "Failed to report command error");
    }
}

/// Log an error no handler took care of.
pub(super) fn log_unexpected(source: &str, error: &HandlerError) {
    error!(
        handler = source,
        code = error.error_code(),
        error = %error,
        "Ignoring error in handler"
    );
}
