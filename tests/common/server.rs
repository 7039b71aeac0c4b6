//! Test server management.
//!
//! Runs a bedrockd gateway in-process on an ephemeral port.

use bedrockd::{App, Gateway};
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::task::JoinHandle;

/// A test server instance.
pub struct TestServer {
    addr: SocketAddr,
    handle: JoinHandle<anyhow::Result<()>>,
}

impl TestServer {
    /// Bind a gateway for `app` on 127.0.0.1:0 and start serving.
    pub async fn spawn(app: App) -> anyhow::Result<Self> {
        let gateway = Gateway::bind("127.0.0.1:0".parse()?, Arc::new(app)).await?;
        let addr = gateway.local_addr()?;
        let handle = tokio::spawn(gateway.run());
        Ok(Self { addr, handle })
    }

    /// Address the server listens on.
    #[allow(dead_code)]
    pub fn addr(&self) -> SocketAddr {
        self.addr
    }
}

impl Drop for TestServer {
    fn drop(&mut self) {
        self.handle.abort();
    }
}
