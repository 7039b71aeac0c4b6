//! # bedrock-proto
//!
//! Wire types for the Minecraft Bedrock Edition automation protocol: the
//! JSON envelope exchanged over the `/connect` WebSocket, event bodies, and
//! `tellraw` payloads.
//!
//! ## Quick Start
//!
//! ```rust
//! use bedrock_proto::{Message, MessagePurpose};
//! use uuid::Uuid;
//!
//! let subscribe = Message::subscribe("PlayerMessage");
//! assert_eq!(subscribe.purpose(), MessagePurpose::Subscribe);
//!
//! let request = Message::command_request(Uuid::new_v4(), "/say hi");
//! assert_eq!(request.body["commandLine"], "say hi");
//!
//! let raw = r#"{"header":{"version":1,"requestId":"0","messagePurpose":"event","eventName":"PlayerMessage"},"body":{}}"#;
//! let inbound = Message::from_json(raw).expect("valid envelope");
//! assert_eq!(inbound.event_name(), Some("PlayerMessage"));
//! ```

#![deny(clippy::all)]
#![warn(missing_docs)]

pub mod error;
pub mod event;
pub mod message;
pub mod rawtext;
#[cfg(feature = "tokio")]
pub mod transport;

pub use self::error::ProtocolError;
pub use self::event::{ChatMessage, PLAYER_MESSAGE, pascal_case};
pub use self::message::{Header, Message, MessagePurpose, PROTOCOL_VERSION};
pub use self::rawtext::RawText;

#[cfg(feature = "tokio")]
pub use self::transport::{MessageReader, MessageWriter, TransportError, split};
