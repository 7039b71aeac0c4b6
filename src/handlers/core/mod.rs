//! Core handler infrastructure.
//!
//! This module contains the fundamental types of the handler system: the
//! command registry, the handler traits, the per-message contexts, and the
//! outbound middleware that routes handler output to the connection.

pub mod context;
pub mod middleware;
pub mod registry;
pub mod traits;

pub use context::{ALL_PLAYERS, ChatContext, Context};
pub use middleware::{Outbound, OutboundError};
pub use registry::Registry;
pub use traits::{CommandHandler, CommandParser, ErrorHandler, EventHandler};
