//! Gateway - WebSocket listener that accepts game client connections.
//!
//! Clients are served one at a time: the next connection is accepted only
//! after the current one closed.

use crate::app::App;
use crate::network::Connection;
use crate::telemetry::spans;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::{Instrument, error, info, warn};

/// The Gateway accepts incoming connections and runs them.
pub struct Gateway {
    listener: TcpListener,
    app: Arc<App>,
}

impl Gateway {
    /// Bind the gateway to the specified address.
    pub async fn bind(addr: SocketAddr, app: Arc<App>) -> anyhow::Result<Self> {
        let listener = TcpListener::bind(addr).await?;
        info!(%addr, "WebSocket listener bound");
        Ok(Self { listener, app })
    }

    /// Address actually bound (useful with port 0).
    pub fn local_addr(&self) -> std::io::Result<SocketAddr> {
        self.listener.local_addr()
    }

    /// Accept and serve connections forever.
    pub async fn run(self) -> anyhow::Result<()> {
        let local = self.local_addr()?;
        info!("Ready. Type /connect {local} in game");

        loop {
            match self.listener.accept().await {
                Ok((stream, addr)) => {
                    info!(%addr, "Game client connected");
                    let connection = Connection::new(addr, Arc::clone(&self.app));
                    match connection.run(stream).instrument(spans::connection(addr)).await {
                        Ok(()) => info!(%addr, "Game client disconnected"),
                        Err(e) => warn!(%addr, error = %e, "Connection ended with error"),
                    }
                }
                Err(e) => error!(error = %e, "Accept failed"),
            }
        }
    }
}
