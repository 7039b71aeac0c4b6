//! Game event names and event bodies.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{ProtocolError, Result};

/// Event fired for every chat line a player sends.
pub const PLAYER_MESSAGE: &str = "PlayerMessage";

/// Body of a [`PLAYER_MESSAGE`] event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    /// The chat text as typed.
    pub message: String,
    /// Recipient for whispers; empty for public chat.
    #[serde(default)]
    pub receiver: String,
    /// Player name of the author.
    pub sender: String,
    /// Chat type (`chat`, `tell`, `say`, ...).
    #[serde(rename = "type", default)]
    pub chat_type: String,
}

impl ChatMessage {
    /// Extract a chat message from an event body.
    pub fn from_body(body: &Value) -> Result<Self> {
        let text = |field: &'static str| -> Result<String> {
            body.get(field)
                .and_then(Value::as_str)
                .map(str::to_owned)
                .ok_or_else(|| ProtocolError::MissingProperty {
                    event: PLAYER_MESSAGE.to_string(),
                    field,
                })
        };
        let optional = |field: &str| {
            body.get(field)
                .and_then(Value::as_str)
                .unwrap_or_default()
                .to_owned()
        };

        Ok(Self {
            message: text("message")?,
            sender: text("sender")?,
            receiver: optional("receiver"),
            chat_type: optional("type"),
        })
    }
}

/// Normalise a handler-style name into the game's PascalCase event name.
///
/// `player_message`, `player-message` and `PlayerMessage` all map to
/// `PlayerMessage`.
pub fn pascal_case(name: &str) -> String {
    name.split(['_', '-', ' '])
        .filter(|segment| !segment.is_empty())
        .map(|segment| {
            let mut chars = segment.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect::<String>(),
                None => String::new(),
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_chat_message_from_body() {
        let body = json!({
            "message": "!ping",
            "receiver": "",
            "sender": "Steve",
            "type": "chat",
        });
        let chat = ChatMessage::from_body(&body).unwrap();
        assert_eq!(chat.message, "!ping");
        assert_eq!(chat.sender, "Steve");
        assert_eq!(chat.chat_type, "chat");
        assert!(chat.receiver.is_empty());
    }

    #[test]
    fn test_chat_message_missing_sender() {
        let body = json!({ "message": "hi" });
        let err = ChatMessage::from_body(&body).unwrap_err();
        assert!(matches!(
            err,
            ProtocolError::MissingProperty { field: "sender", .. }
        ));
    }

    #[test]
    fn test_chat_message_optional_fields() {
        let body = json!({ "message": "hi", "sender": "Alex" });
        let chat = ChatMessage::from_body(&body).unwrap();
        assert_eq!(chat.receiver, "");
        assert_eq!(chat.chat_type, "");
    }

    #[test]
    fn test_pascal_case() {
        assert_eq!(pascal_case("player_message"), "PlayerMessage");
        assert_eq!(pascal_case("PlayerMessage"), "PlayerMessage");
        assert_eq!(pascal_case("end-of_day"), "EndOfDay");
        assert_eq!(pascal_case("block__broken"), "BlockBroken");
        assert_eq!(pascal_case(""), "");
    }
}
