//! Error types for the Bedrock protocol library.

use thiserror::Error;

/// Convenience type alias for Results using [`ProtocolError`].
pub type Result<T, E = ProtocolError> = std::result::Result<T, E>;

/// Errors raised while encoding or decoding protocol envelopes.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ProtocolError {
    /// The frame was not valid JSON or did not match the envelope shape.
    #[error("invalid envelope: {0}")]
    InvalidEnvelope(#[from] serde_json::Error),

    /// An event body lacked a property the event type requires.
    #[error("event {event} is missing property {field:?}")]
    MissingProperty {
        /// Event name the body belongs to.
        event: String,
        /// Property that was absent.
        field: &'static str,
    },
}
