//! The JSON envelope carried by every WebSocket frame.
//!
//! Every frame in either direction is a single JSON object:
//!
//! ```text
//! { "header": { "version", "requestId", "messageType", "messagePurpose", ["eventName"] },
//!   "body":   <purpose-specific object> }
//! ```
//!
//! Outbound frames are built with [`Message::subscribe`],
//! [`Message::unsubscribe`] and [`Message::command_request`]. Inbound frames
//! are decoded with [`Message::from_json`] and inspected through the typed
//! accessors.

use serde::{Deserialize, Serialize};
use serde_json::{Value, json};
use uuid::Uuid;

use crate::error::Result;

/// Envelope version sent on every outbound frame.
pub const PROTOCOL_VERSION: u32 = 1;

/// Value of `messageType` on outbound frames.
const COMMAND_REQUEST_TYPE: &str = "commandRequest";

/// The `messagePurpose` header field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[non_exhaustive]
pub enum MessagePurpose {
    /// Subscribe to a game event.
    Subscribe,
    /// Unsubscribe from a game event.
    Unsubscribe,
    /// Execute a game command.
    CommandRequest,
    /// Result of a previously sent command request.
    CommandResponse,
    /// Game event notification.
    Event,
    /// The client rejected a frame.
    Error,
    /// Any purpose this library does not know about.
    Unknown,
}

impl MessagePurpose {
    /// Wire representation of the purpose.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Subscribe => "subscribe",
            Self::Unsubscribe => "unsubscribe",
            Self::CommandRequest => "commandRequest",
            Self::CommandResponse => "commandResponse",
            Self::Event => "event",
            Self::Error => "error",
            Self::Unknown => "",
        }
    }

    /// Parse a wire purpose; unrecognised values map to [`MessagePurpose::Unknown`].
    pub fn parse(raw: &str) -> Self {
        match raw {
            "subscribe" => Self::Subscribe,
            "unsubscribe" => Self::Unsubscribe,
            "commandRequest" => Self::CommandRequest,
            "commandResponse" => Self::CommandResponse,
            "event" => Self::Event,
            "error" => Self::Error,
            _ => Self::Unknown,
        }
    }
}

/// Envelope header.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Header {
    /// Protocol version. Game clients send their own encoded version here.
    #[serde(default = "default_version")]
    pub version: u32,
    /// Correlation id. Outbound requests use a fresh UUIDv4.
    #[serde(default)]
    pub request_id: String,
    /// Message type (always `commandRequest` on outbound frames).
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub message_type: String,
    /// Raw `messagePurpose`; see [`Message::purpose`].
    #[serde(default)]
    pub message_purpose: String,
    /// Game event name, present on event notifications.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub event_name: Option<String>,
}

fn default_version() -> u32 {
    PROTOCOL_VERSION
}

impl Header {
    /// Build an outbound header with the given purpose and correlation id.
    pub fn outbound(purpose: MessagePurpose, request_id: Uuid) -> Self {
        Self {
            version: PROTOCOL_VERSION,
            request_id: request_id.to_string(),
            message_type: COMMAND_REQUEST_TYPE.to_string(),
            message_purpose: purpose.as_str().to_string(),
            event_name: None,
        }
    }
}

/// A complete protocol frame.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Message {
    /// Routing header.
    pub header: Header,
    /// Purpose-specific payload.
    #[serde(default)]
    pub body: Value,
}

impl Message {
    /// Subscribe to notifications for `event_name`.
    pub fn subscribe(event_name: &str) -> Self {
        Self::event_subscription(MessagePurpose::Subscribe, event_name)
    }

    /// Stop notifications for `event_name`.
    pub fn unsubscribe(event_name: &str) -> Self {
        Self::event_subscription(MessagePurpose::Unsubscribe, event_name)
    }

    fn event_subscription(purpose: MessagePurpose, event_name: &str) -> Self {
        Self {
            header: Header::outbound(purpose, Uuid::new_v4()),
            body: json!({ "eventName": event_name }),
        }
    }

    /// Ask the game to execute `command_line`. A leading `/` is stripped.
    pub fn command_request(request_id: Uuid, command_line: &str) -> Self {
        let command_line = command_line.strip_prefix('/').unwrap_or(command_line);
        Self {
            header: Header::outbound(MessagePurpose::CommandRequest, request_id),
            body: json!({
                "version": PROTOCOL_VERSION,
                "commandLine": command_line,
                "origin": { "type": "player" },
            }),
        }
    }

    /// Decode a frame.
    pub fn from_json(raw: &str) -> Result<Self> {
        Ok(serde_json::from_str(raw)?)
    }

    /// Encode this frame.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }

    /// Typed `messagePurpose`.
    pub fn purpose(&self) -> MessagePurpose {
        MessagePurpose::parse(&self.header.message_purpose)
    }

    /// Event name for event notifications.
    pub fn event_name(&self) -> Option<&str> {
        self.header.event_name.as_deref()
    }

    /// Whether this frame answers a previously sent command request.
    pub fn is_command_response(&self) -> bool {
        self.purpose() == MessagePurpose::CommandResponse
    }

    /// Correlation id parsed as a UUID, if it is one.
    pub fn request_uuid(&self) -> Option<Uuid> {
        Uuid::parse_str(&self.header.request_id).ok()
    }
}
