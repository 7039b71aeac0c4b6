//! Per-message dispatch for one game client connection.
//!
//! [`Session`] owns the request queue and the outbound handle of a
//! connection and processes inbound envelopes strictly in arrival order:
//! event handlers first, then request acknowledgement, then chat commands.

use std::net::SocketAddr;
use std::sync::Arc;

use bedrock_proto::{ChatMessage, Message, PLAYER_MESSAGE};
use tracing::{Instrument, debug, warn};

use super::error_handling::{handle_command_error, log_unexpected};
use crate::app::App;
use crate::commands::{Args, Command, close_matches, convert_args, tokenize};
use crate::error::CommandError;
use crate::handlers::core::context::send_request;
use crate::handlers::core::{ChatContext, Context, Outbound};
use crate::queue::RequestQueue;
use crate::telemetry::{CommandTimer, dump_message, shorten, spans};

/// Dispatcher state of one connection.
pub struct Session {
    pub(super) app: Arc<App>,
    pub(super) queue: RequestQueue,
    pub(super) outbound: Outbound,
    pub(super) local_addr: Option<SocketAddr>,
}

impl Session {
    pub fn new(app: Arc<App>, outbound: Outbound) -> Self {
        let queue = RequestQueue::new(app.settings().max_in_flight);
        Self {
            app,
            queue,
            outbound,
            local_addr: None,
        }
    }

    /// Address the client connected to, shown in the debug banner.
    pub fn with_local_addr(mut self, addr: Option<SocketAddr>) -> Self {
        self.local_addr = addr;
        self
    }

    pub fn queue(&self) -> &RequestQueue {
        &self.queue
    }

    pub fn app(&self) -> &Arc<App> {
        &self.app
    }

    /// Process one inbound envelope.
    ///
    /// Never fails: handler errors go through the error policy and are
    /// logged or reported in chat.
    pub async fn process_message(&mut self, message: Message) {
        let app = Arc::clone(&self.app);
        debug!(
            purpose = message.purpose().as_str(),
            event = message.event_name(),
            request_id = %message.header.request_id,
            "Received message"
        );

        if let Some(dir) = app.settings().dump_dir.as_deref()
            && let Err(e) = dump_message(dir, &message).await
        {
            warn!(error = %e, dir = %dir.display(), "Failed to dump message");
        }

        if let Some(name) = message.event_name()
            && let Some(handler) = app.game_event(name)
        {
            let mut ctx = Context::new(&self.outbound, &mut self.queue, app.registry(), &message.body);
            if let Err(e) = handler.handle(&mut ctx).instrument(spans::event(name)).await {
                log_unexpected(handler.name(), &e);
            }
        }

        if message.is_command_response() {
            self.acknowledge(&message).await;
        }

        if message.event_name() != Some(PLAYER_MESSAGE) {
            return;
        }
        self.dispatch_chat(&app, &message).await;
    }

    /// Release the next parked command request, if the response frees a slot.
    async fn acknowledge(&mut self, message: &Message) {
        let Some(id) = message.request_uuid() else {
            debug!(request_id = %message.header.request_id, "Ignoring response with unparseable id");
            return;
        };
        if let Some(next) = self.queue.acknowledge(&id)
            && let Err(e) = send_request(&self.outbound, &mut self.queue, next).await
        {
            warn!(error = %e, "Failed to send queued command request");
        }
    }

    async fn dispatch_chat(&mut self, app: &App, message: &Message) {
        let chat = match ChatMessage::from_body(&message.body) {
            Ok(chat) => chat,
            Err(e) => {
                warn!(error = %e, "Malformed chat message");
                return;
            }
        };

        let settings = app.settings();
        let Some(prefix) = settings.command_prefix() else {
            return;
        };
        let input = match chat.message.strip_prefix(prefix) {
            Some(rest) if !rest.is_empty() => rest.to_string(),
            _ => return,
        };
        debug!(sender = %chat.sender, message = %shorten(&chat.message, 40), "Chat command");

        let debug_mode = settings.debug;
        let mut ctx = ChatContext::new(
            Context::new(&self.outbound, &mut self.queue, app.registry(), &message.body),
            chat,
        );

        if let Some(parser) = app.parser() {
            if let Err(e) = parser.parse(&mut ctx, &input).await {
                let error = CommandError::Generic(e.to_string());
                handle_command_error(None, error.into(), &mut ctx, debug_mode).await;
            }
            return;
        }

        let tokens = match tokenize(&input, settings.quoting) {
            Ok(tokens) => tokens,
            Err(e) => {
                handle_command_error(None, e.into(), &mut ctx, debug_mode).await;
                return;
            }
        };
        let Some((name, rest)) = tokens.split_first() else {
            return;
        };

        match app.registry().find(name) {
            Some(command) => run_command(command, rest, &mut ctx, debug_mode).await,
            None => {
                let error = CommandError::UnknownCommand {
                    name: name.clone(),
                    suggestions: close_matches(name, app.registry().names()),
                };
                handle_command_error(None, error.into(), &mut ctx, debug_mode).await;
            }
        }
    }
}

/// Convert `tokens` for `command` and invoke it.
async fn run_command(command: &Command, tokens: &[String], ctx: &mut ChatContext<'_>, debug: bool) {
    if !command.is_enabled() {
        let error = CommandError::Generic(format!("command '{}' is disabled", command.name()));
        handle_command_error(None, error.into(), ctx, debug).await;
        return;
    }

    // A conversion failure never reaches the handler
    let converted = match convert_args(tokens, command.params()) {
        Ok(values) => values,
        Err(e) => {
            handle_command_error(Some(command), e.into(), ctx, debug).await;
            return;
        }
    };
    let args = Args::resolve(converted, command.params());

    let span = spans::command(command.name(), ctx.sender());
    let result = {
        let _timer = CommandTimer::new(command.name());
        command.invoke(ctx, args).instrument(span).await
    };
    if let Err(e) = result {
        handle_command_error(Some(command), e, ctx, debug).await;
    }
}
