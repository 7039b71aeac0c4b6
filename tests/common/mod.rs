//! Integration test common infrastructure.
//!
//! Provides an in-process test server, a fake game client, and a few stock
//! handlers used across test files.

pub mod client;
pub mod server;

#[allow(unused_imports)]
pub use client::TestClient;
#[allow(unused_imports)]
pub use server::TestServer;

use async_trait::async_trait;
use bedrockd::{Args, ChatContext, Context, EventHandler, HandlerError, HandlerResult};
use bedrockd::{CommandHandler, ErrorHandler};
use tokio::sync::mpsc;

/// Command handler that replies every argument, space separated.
#[allow(dead_code)]
pub struct Echo;

#[async_trait]
impl CommandHandler for Echo {
    async fn call(&self, ctx: &mut ChatContext<'_>, args: Args) -> HandlerResult {
        let words: Vec<String> = args.iter().map(ToString::to_string).collect();
        ctx.reply(&words.join(" ")).await
    }
}

/// Event/error handler that reports its tag on a channel.
#[allow(dead_code)]
pub struct Probe {
    pub tag: &'static str,
    pub tx: mpsc::UnboundedSender<String>,
}

#[allow(dead_code)]
impl Probe {
    pub fn new(tag: &'static str) -> (Self, mpsc::UnboundedReceiver<String>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (Self { tag, tx }, rx)
    }
}

#[async_trait]
impl EventHandler for Probe {
    async fn handle(&self, _ctx: &mut Context<'_>) -> HandlerResult {
        let _ = self.tx.send(self.tag.to_string());
        Ok(())
    }
}

#[async_trait]
impl ErrorHandler for Probe {
    async fn handle(&self, _ctx: &mut ChatContext<'_>, error: &HandlerError) -> HandlerResult {
        let _ = self.tx.send(format!("{}: {}", self.tag, error));
        Ok(())
    }
}
