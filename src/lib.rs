//! bedrockd - command and event dispatch for Minecraft Bedrock Edition.
//!
//! The game client connects to a WebSocket server with `/connect`, after
//! which the server can subscribe to game events and run commands. This crate
//! turns that channel into a small framework:
//!
//! - chat lines starting with a prefix are tokenized, matched against
//!   registered [`Command`]s, converted to typed [`Args`], and dispatched;
//! - game events and connection lifecycle events go to [`EventHandler`]s;
//! - game commands issued by handlers are flow-controlled by the
//!   [`RequestQueue`](queue::RequestQueue).
//!
//! ```ignore
//! let mut app = App::new(Settings::default().with_prefix("!"));
//! app.add_command(Command::new("ping", PingCommand))?;
//! Gateway::bind("127.0.0.1:6464".parse()?, Arc::new(app)).await?.run().await?;
//! ```

pub mod app;
pub mod commands;
pub mod config;
pub mod error;
pub mod handlers;
pub mod network;
pub mod queue;
pub mod telemetry;

pub use app::{App, CONNECT, DISCONNECT, Settings};
pub use bedrock_proto as proto;
pub use commands::{Arg, Args, Command, Converter, Param, Policy};
pub use error::{CommandError, ErrorKind, HandlerError, HandlerResult, SetupError};
pub use handlers::{
    ALL_PLAYERS, ChatContext, CommandHandler, CommandParser, Context, ErrorHandler, EventHandler,
};
pub use network::{Gateway, Session};
