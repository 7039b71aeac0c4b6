//! Handler contexts.
//!
//! A [`Context`] is built per inbound message and borrows the session's
//! request queue and outbound middleware for the duration of one handler
//! call. [`ChatContext`] adds the fields of a `PlayerMessage` body and the
//! `reply*` helpers that target the sender.

use std::ops::{Deref, DerefMut};

use bedrock_proto::rawtext::{RawText, red};
use bedrock_proto::{ChatMessage, Message, pascal_case};
use serde_json::Value;
use tracing::{debug, warn};

use super::middleware::{Outbound, OutboundError};
use super::registry::Registry;
use crate::error::HandlerResult;
use crate::queue::{PendingRequest, RequestQueue};

/// Target selector matching every player.
pub const ALL_PLAYERS: &str = "@a";

/// Context handed to event handlers.
pub struct Context<'a> {
    outbound: &'a Outbound,
    queue: &'a mut RequestQueue,
    registry: &'a Registry,
    /// Body of the message that triggered the handler.
    data: &'a Value,
}

impl<'a> Context<'a> {
    pub fn new(
        outbound: &'a Outbound,
        queue: &'a mut RequestQueue,
        registry: &'a Registry,
        data: &'a Value,
    ) -> Self {
        Self {
            outbound,
            queue,
            registry,
            data,
        }
    }

    /// Body of the triggering message (`null` for lifecycle events).
    pub fn data(&self) -> &Value {
        self.data
    }

    /// Commands registered on the app.
    pub fn registry(&self) -> &Registry {
        self.registry
    }

    pub fn queue(&self) -> &RequestQueue {
        self.queue
    }

    /// Execute a game command. The leading `/` may be omitted.
    ///
    /// The request goes through the request queue and may be held back until
    /// earlier requests are acknowledged.
    pub async fn run(&mut self, command: &str) -> HandlerResult {
        let request = PendingRequest::command(command);
        debug!(request_id = %request.id, command, "Submitting command request");
        if let Some(ready) = self.queue.submit(request) {
            send_request(self.outbound, self.queue, ready).await?;
        }
        Ok(())
    }

    /// Send an envelope directly, bypassing the request queue.
    pub async fn send(&self, message: Message) -> HandlerResult {
        self.outbound.send(message).await?;
        Ok(())
    }

    /// Subscribe to a game event (name normalised to PascalCase).
    pub async fn subscribe(&self, event: &str) -> HandlerResult {
        self.send(Message::subscribe(&pascal_case(event))).await
    }

    pub async fn unsubscribe(&self, event: &str) -> HandlerResult {
        self.send(Message::unsubscribe(&pascal_case(event))).await
    }

    /// Show `text` to `target` via `/tell`.
    pub async fn tell(&mut self, text: &str, target: &str) -> HandlerResult {
        self.run(&format!("tell {target} {text}")).await
    }

    /// Like [`tell`](Self::tell) without the sender prefix, via `/tellraw`.
    pub async fn tell_raw(&mut self, text: &str, target: &str) -> HandlerResult {
        let payload = RawText::new(text).to_json();
        self.run(&format!("tellraw {target} {payload}")).await
    }

    /// Show `text` formatted as an error.
    pub async fn tell_error(&mut self, text: &str, target: &str) -> HandlerResult {
        self.tell_raw(&red(text), target).await
    }
}

/// Send a request that holds an in-flight slot.
///
/// A request that cannot be delivered gives its slot up, and the parked
/// request promoted into it is sent in turn. Returns the first failure.
pub(crate) async fn send_request(
    outbound: &Outbound,
    queue: &mut RequestQueue,
    request: PendingRequest,
) -> Result<(), OutboundError> {
    let mut next = Some(request);
    let mut first_error = None;
    while let Some(request) = next.take() {
        let id = request.id;
        if let Err(e) = outbound.send(request.payload).await {
            warn!(request_id = %id, error = %e, "Command request not delivered, releasing its slot");
            next = queue.abandon(&id);
            first_error.get_or_insert(e);
        }
    }
    first_error.map_or(Ok(()), Err)
}

/// Context for `PlayerMessage` events and chat commands.
pub struct ChatContext<'a> {
    inner: Context<'a>,
    chat: ChatMessage,
}

impl<'a> ChatContext<'a> {
    pub fn new(inner: Context<'a>, chat: ChatMessage) -> Self {
        Self { inner, chat }
    }

    pub fn chat(&self) -> &ChatMessage {
        &self.chat
    }

    /// Chat text as typed, prefix included.
    pub fn message(&self) -> &str {
        &self.chat.message
    }

    pub fn sender(&self) -> &str {
        &self.chat.sender
    }

    pub fn receiver(&self) -> &str {
        &self.chat.receiver
    }

    pub fn chat_type(&self) -> &str {
        &self.chat.chat_type
    }

    /// Whisper `text` to the sender.
    pub async fn reply(&mut self, text: &str) -> HandlerResult {
        let target = selector(&self.chat.sender);
        self.inner.tell(text, &target).await
    }

    pub async fn reply_raw(&mut self, text: &str) -> HandlerResult {
        let target = selector(&self.chat.sender);
        self.inner.tell_raw(text, &target).await
    }

    pub async fn reply_error(&mut self, text: &str) -> HandlerResult {
        let target = selector(&self.chat.sender);
        self.inner.tell_error(text, &target).await
    }
}

impl<'a> Deref for ChatContext<'a> {
    type Target = Context<'a>;

    fn deref(&self) -> &Self::Target {
        &self.inner
    }
}

impl DerefMut for ChatContext<'_> {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.inner
    }
}

/// Player names with spaces must be quoted in target selectors.
fn selector(player: &str) -> String {
    if player.chars().any(char::is_whitespace) {
        format!("\"{player}\"")
    } else {
        player.to_string()
    }
}
