//! WebSocket transport carrying protocol envelopes.
//!
//! The game client speaks one JSON envelope per text frame. [`split`] turns an
//! accepted [`WebSocketStream`] into an owned reader and writer so the read
//! loop and the outbound writer can live on different tasks.

use futures_util::stream::{SplitSink, SplitStream};
use futures_util::{SinkExt, StreamExt};
use thiserror::Error;
use tokio::io::{AsyncRead, AsyncWrite};
use tokio_tungstenite::WebSocketStream;
use tokio_tungstenite::tungstenite::{self, Message as WsMessage};

use crate::error::ProtocolError;
use crate::message::Message;

/// Errors that can occur on the WebSocket transport.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum TransportError {
    /// The WebSocket itself failed; the connection is unusable.
    #[error("websocket error: {0}")]
    WebSocket(#[from] tungstenite::Error),

    /// A frame arrived but could not be decoded; later frames may still be fine.
    #[error("transport protocol error: {0}")]
    Protocol(#[from] ProtocolError),
}

impl TransportError {
    /// Whether the connection must be torn down after this error.
    pub fn is_fatal(&self) -> bool {
        matches!(self, Self::WebSocket(_))
    }
}

/// Split a WebSocket into envelope reader and writer halves.
pub fn split<S>(stream: WebSocketStream<S>) -> (MessageReader<S>, MessageWriter<S>)
where
    S: AsyncRead + AsyncWrite + Unpin,
{
    let (sink, stream) = stream.split();
    (MessageReader { stream }, MessageWriter { sink })
}

/// Read half yielding decoded envelopes.
pub struct MessageReader<S> {
    stream: SplitStream<WebSocketStream<S>>,
}

impl<S> MessageReader<S>
where
    S: AsyncRead + AsyncWrite + Unpin,
{
    /// Read the next envelope.
    ///
    /// Returns `None` once the peer closed the connection.
    pub async fn next(&mut self) -> Option<Result<Message, TransportError>> {
        loop {
            match self.stream.next().await {
                Some(Ok(WsMessage::Text(text))) => {
                    return Some(Message::from_json(&text).map_err(TransportError::from));
                }
                Some(Ok(WsMessage::Close(_))) | None => return None,
                Some(Ok(WsMessage::Ping(_) | WsMessage::Pong(_) | WsMessage::Frame(_))) => {
                    // Control frames are answered by tungstenite itself
                    continue;
                }
                Some(Ok(WsMessage::Binary(data))) => {
                    tracing::debug!(len = data.len(), "Ignoring binary frame");
                    continue;
                }
                Some(Err(e)) => return Some(Err(TransportError::WebSocket(e))),
            }
        }
    }
}

/// Write half accepting envelopes.
pub struct MessageWriter<S> {
    sink: SplitSink<WebSocketStream<S>, WsMessage>,
}

impl<S> MessageWriter<S>
where
    S: AsyncRead + AsyncWrite + Unpin,
{
    /// Encode and send one envelope.
    pub async fn write_message(&mut self, message: &Message) -> Result<(), TransportError> {
        let text = message.to_json()?;
        self.sink.send(WsMessage::Text(text)).await?;
        Ok(())
    }

    /// Send a close frame and flush.
    pub async fn close(&mut self) -> Result<(), TransportError> {
        self.sink.close().await?;
        Ok(())
    }
}
