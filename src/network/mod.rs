//! Network module.
//!
//! Contains the Gateway (WebSocket listener) and the per-connection Session.

mod connection;
mod gateway;

pub use connection::{Connection, Session};
pub use gateway::Gateway;
