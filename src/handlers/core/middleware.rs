//! Outbound middleware between handlers and the connection writer.
//!
//! Handlers never touch the socket. Every envelope goes through
//! [`Outbound::send`] into a bounded channel drained by the writer task.
//!
//! # Slow consumer protection
//!
//! When the channel stays full for [`SEND_TIMEOUT`] the send is abandoned and
//! the error propagates to the handler, which surfaces through the error
//! policy like any other failure.

use std::time::Duration;

use bedrock_proto::Message;
use thiserror::Error;
use tokio::sync::mpsc;

/// Timeout for a send to a slow consumer before giving up.
pub const SEND_TIMEOUT: Duration = Duration::from_secs(5);

/// Failure to hand an envelope to the writer task.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum OutboundError {
    #[error("connection closed")]
    Closed,

    #[error("client not reading (timeout after {0:?})")]
    Timeout(Duration),
}

/// Handle for queuing envelopes to the connection writer.
#[derive(Debug, Clone)]
pub struct Outbound {
    tx: mpsc::Sender<Message>,
}

impl Outbound {
    pub fn new(tx: mpsc::Sender<Message>) -> Self {
        Self { tx }
    }

    /// Create a handle together with the receiving end for the writer.
    pub fn channel(capacity: usize) -> (Self, mpsc::Receiver<Message>) {
        let (tx, rx) = mpsc::channel(capacity);
        (Self::new(tx), rx)
    }

    /// Queue one envelope for sending.
    pub async fn send(&self, message: Message) -> Result<(), OutboundError> {
        match tokio::time::timeout(SEND_TIMEOUT, self.tx.send(message)).await {
            Ok(Ok(())) => Ok(()),
            Ok(Err(_)) => Err(OutboundError::Closed),
            Err(_elapsed) => {
                tracing::warn!(
                    "Outbound queue full: client not reading (timeout after {:?})",
                    SEND_TIMEOUT
                );
                Err(OutboundError::Timeout(SEND_TIMEOUT))
            }
        }
    }
}
