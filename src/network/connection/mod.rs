//! Connection - Handles one game client connection.
//!
//! ```text
//!   WebSocket handshake
//!          ↓
//!   ┌──────────────────┐   Message   ┌───────────────┐
//!   │  MessageReader   │ ──────────▶ │   Session     │
//!   └──────────────────┘             │ (in order,    │
//!                                    │  one task)    │
//!   ┌──────────────────┐   mpsc      └───────┬───────┘
//!   │  writer task     │ ◀───────────────────┘
//!   │  MessageWriter   │   Outbound
//!   └──────────────────┘
//! ```

mod dispatch;
mod error_handling;
mod lifecycle;

pub use dispatch::Session;

use error_handling::{ReadErrorAction, classify_read_error};

use crate::app::App;
use crate::handlers::core::Outbound;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpStream;
use tokio_tungstenite::accept_async;
use tracing::{debug, info, warn};

/// Capacity of the outbound channel between session and writer task.
const OUTGOING_CAPACITY: usize = 256;

/// A game client connection.
pub struct Connection {
    addr: SocketAddr,
    app: Arc<App>,
}

impl Connection {
    pub fn new(addr: SocketAddr, app: Arc<App>) -> Self {
        Self { addr, app }
    }

    /// Run the connection until the client goes away.
    pub async fn run(self, stream: TcpStream) -> anyhow::Result<()> {
        let local_addr = stream.local_addr().ok();
        let ws = accept_async(stream).await?;
        info!(addr = %self.addr, "WebSocket handshake complete");

        let (mut reader, mut writer) = bedrock_proto::split(ws);
        let (outbound, mut outgoing) = Outbound::channel(OUTGOING_CAPACITY);

        let writer_task = tokio::spawn(async move {
            while let Some(message) = outgoing.recv().await {
                if let Err(e) = writer.write_message(&message).await {
                    warn!(error = %e, "Write failed");
                    break;
                }
            }
            if let Err(e) = writer.close().await {
                debug!(error = %e, "Close failed");
            }
        });

        let mut session = Session::new(self.app, outbound).with_local_addr(local_addr);
        session.on_connect().await;

        while let Some(result) = reader.next().await {
            match result {
                Ok(message) => session.process_message(message).await,
                Err(e) => match classify_read_error(&e) {
                    ReadErrorAction::Skip => warn!(error = %e, "Skipping undecodable frame"),
                    ReadErrorAction::Disconnect => {
                        warn!(error = %e, "Transport error");
                        break;
                    }
                },
            }
        }

        session.on_disconnect().await;
        // Dropping the session closes the outbound channel and stops the writer
        drop(session);
        writer_task.await?;
        Ok(())
    }
}
