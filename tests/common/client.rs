//! Test game client.
//!
//! Speaks the Bedrock WebSocket protocol the way the game does: sends event
//! notifications and command responses, receives subscriptions and command
//! requests.

#![allow(dead_code)]

use bedrockd::proto::{Message, MessagePurpose};
use futures_util::{SinkExt, StreamExt};
use serde_json::{Value, json};
use std::net::SocketAddr;
use std::time::Duration;
use tokio::net::TcpStream;
use tokio::time::timeout;
use tokio_tungstenite::tungstenite::Message as WsMessage;
use tokio_tungstenite::{MaybeTlsStream, WebSocketStream, connect_async};

/// A fake game client.
pub struct TestClient {
    ws: WebSocketStream<MaybeTlsStream<TcpStream>>,
}

impl TestClient {
    /// Connect to a test server.
    pub async fn connect(addr: SocketAddr) -> anyhow::Result<Self> {
        let (ws, _) = connect_async(format!("ws://{addr}")).await?;
        Ok(Self { ws })
    }

    /// Send a raw text frame.
    pub async fn send_raw(&mut self, text: &str) -> anyhow::Result<()> {
        self.ws.send(WsMessage::Text(text.to_string())).await?;
        Ok(())
    }

    /// Send a game event notification.
    pub async fn event(&mut self, name: &str, body: Value) -> anyhow::Result<()> {
        let frame = json!({
            "header": {
                "version": 1,
                "requestId": "00000000-0000-0000-0000-000000000000",
                "messagePurpose": "event",
                "eventName": name,
            },
            "body": body,
        });
        self.send_raw(&frame.to_string()).await
    }

    /// Send a chat line as `sender`.
    pub async fn chat(&mut self, sender: &str, text: &str) -> anyhow::Result<()> {
        self.event(
            "PlayerMessage",
            json!({ "message": text, "receiver": "", "sender": sender, "type": "chat" }),
        )
        .await
    }

    /// Acknowledge the command request `request_id`.
    pub async fn respond(&mut self, request_id: &str) -> anyhow::Result<()> {
        let frame = json!({
            "header": {
                "version": 1,
                "requestId": request_id,
                "messagePurpose": "commandResponse",
            },
            "body": { "statusCode": 0, "statusMessage": "" },
        });
        self.send_raw(&frame.to_string()).await
    }

    /// Receive a single envelope.
    pub async fn recv(&mut self) -> anyhow::Result<Message> {
        self.recv_timeout(Duration::from_secs(5)).await
    }

    /// Receive an envelope with a timeout.
    pub async fn recv_timeout(&mut self, dur: Duration) -> anyhow::Result<Message> {
        loop {
            let frame = timeout(dur, self.ws.next())
                .await?
                .ok_or_else(|| anyhow::anyhow!("connection closed"))??;
            if let WsMessage::Text(text) = frame {
                return Ok(Message::from_json(&text)?);
            }
        }
    }

    /// Receive the next command request, returning `(request_id, command_line)`.
    pub async fn recv_command(&mut self) -> anyhow::Result<(String, String)> {
        loop {
            let message = self.recv().await?;
            if message.purpose() == MessagePurpose::CommandRequest {
                let line = message.body["commandLine"]
                    .as_str()
                    .ok_or_else(|| anyhow::anyhow!("commandLine missing"))?
                    .to_string();
                return Ok((message.header.request_id, line));
            }
        }
    }

    /// Receive the `count` subscriptions sent on connect.
    pub async fn recv_subscriptions(&mut self, count: usize) -> anyhow::Result<Vec<String>> {
        let mut events = Vec::with_capacity(count);
        for _ in 0..count {
            let message = self.recv().await?;
            anyhow::ensure!(
                message.purpose() == MessagePurpose::Subscribe,
                "expected subscribe, got {:?}",
                message.purpose()
            );
            let event = message.body["eventName"].as_str().unwrap_or_default();
            events.push(event.to_string());
        }
        Ok(events)
    }

    /// Whether nothing arrives within `dur`.
    pub async fn is_silent(&mut self, dur: Duration) -> bool {
        self.recv_timeout(dur).await.is_err()
    }

    /// Close the connection.
    pub async fn close(mut self) -> anyhow::Result<()> {
        self.ws.close(None).await?;
        Ok(())
    }
}
