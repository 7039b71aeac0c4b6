//! Connection lifecycle: subscriptions, debug banner, lifecycle events.

use std::sync::Arc;

use bedrock_proto::Message;
use serde_json::Value;
use tracing::{Instrument, debug, info, warn};

use super::dispatch::Session;
use super::error_handling::log_unexpected;
use crate::app::{CONNECT, DISCONNECT};
use crate::handlers::core::{ALL_PLAYERS, Context};
use crate::telemetry::spans;

/// Data handed to lifecycle handlers, which have no triggering message.
static NO_DATA: Value = Value::Null;

impl Session {
    /// Subscribe to events, greet in debug mode, and fire `connect`.
    pub async fn on_connect(&mut self) {
        for event in self.app.subscriptions() {
            match self.outbound.send(Message::subscribe(&event)).await {
                Ok(()) => debug!(event = %event, "Subscribed"),
                Err(e) => warn!(event = %event, error = %e, "Failed to subscribe"),
            }
        }

        if self.app.settings().debug {
            self.send_banner().await;
        }

        self.fire(CONNECT).await;
    }

    /// Fire `disconnect`. Queued command requests are abandoned.
    pub async fn on_disconnect(&mut self) {
        if self.queue.pending_len() > 0 || self.queue.in_flight_len() > 0 {
            info!(
                pending = self.queue.pending_len(),
                in_flight = self.queue.in_flight_len(),
                "Abandoning command requests"
            );
        }
        self.fire(DISCONNECT).await;
    }

    async fn send_banner(&mut self) {
        let app = Arc::clone(&self.app);
        let addr = self
            .local_addr
            .map_or_else(|| String::from("unknown address"), |a| a.to_string());
        let text = format!(
            "§l§aConnected§r to bedrockd {} on {addr}. Debug mode is on.",
            env!("CARGO_PKG_VERSION")
        );

        let mut ctx = Context::new(&self.outbound, &mut self.queue, app.registry(), &NO_DATA);
        if let Err(e) = ctx.tell_raw(&text, ALL_PLAYERS).await {
            warn!(error = %e, "Failed to send welcome banner");
        }
    }

    async fn fire(&mut self, name: &str) {
        let app = Arc::clone(&self.app);
        let Some(handler) = app.event(name) else {
            return;
        };
        let mut ctx = Context::new(&self.outbound, &mut self.queue, app.registry(), &NO_DATA);
        if let Err(e) = handler.handle(&mut ctx).instrument(spans::event(name)).await {
            log_unexpected(handler.name(), &e);
        }
    }
}
