//! `tellraw` payloads and the section-sign formatting codes used in them.

use serde::Serialize;

/// Formatting code for red text.
pub const RED: &str = "§c";
/// Formatting code that resets colour and style.
pub const RESET: &str = "§r";

/// A `{"rawtext":[...]}` component list as accepted by `/tellraw`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct RawText {
    rawtext: Vec<TextComponent>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
struct TextComponent {
    text: String,
}

impl RawText {
    /// A payload with a single text component.
    pub fn new(text: impl Into<String>) -> Self {
        Self::default().push(text)
    }

    /// Append a text component.
    pub fn push(mut self, text: impl Into<String>) -> Self {
        self.rawtext.push(TextComponent { text: text.into() });
        self
    }

    /// Serialise to the JSON form embedded in the command line.
    pub fn to_json(&self) -> String {
        // Only strings are serialised, which cannot fail.
        serde_json::to_string(self).unwrap_or_else(|_| String::from(r#"{"rawtext":[]}"#))
    }
}

/// Wrap `text` in red with a trailing reset.
pub fn red(text: &str) -> String {
    format!("{RED}{text}{RESET}")
}
