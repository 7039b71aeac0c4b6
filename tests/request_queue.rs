//! Integration tests for command request flow control.

mod common;

use async_trait::async_trait;
use bedrockd::{App, Args, ChatContext, Command, CommandHandler, HandlerResult, Settings};
use common::{TestClient, TestServer};
use std::time::Duration;

/// Issues 110 game commands in one go.
struct Flood;

#[async_trait]
impl CommandHandler for Flood {
    async fn call(&self, ctx: &mut ChatContext<'_>, _args: Args) -> HandlerResult {
        for i in 0..110 {
            ctx.run(&format!("say {i}")).await?;
        }
        Ok(())
    }
}

async fn flooded(max_in_flight: usize) -> (TestServer, TestClient) {
    let mut app = App::new(Settings::default().with_prefix("!").with_max_in_flight(max_in_flight));
    app.add_command(Command::new("flood", Flood)).unwrap();
    let server = TestServer::spawn(app).await.unwrap();
    let mut client = TestClient::connect(server.addr()).await.unwrap();
    client.recv_subscriptions(1).await.unwrap();
    client.chat("Steve", "!flood").await.unwrap();
    (server, client)
}

#[tokio::test]
async fn test_at_most_100_in_flight() {
    let (_server, mut client) = flooded(100).await;

    let mut sent = Vec::new();
    for _ in 0..100 {
        sent.push(client.recv_command().await.unwrap());
    }
    assert_eq!(sent[0].1, "say 0");
    assert_eq!(sent[99].1, "say 99");
    assert!(client.is_silent(Duration::from_millis(300)).await);

    // Unknown and malformed ids release nothing
    client.respond("6f0e2a4c-0000-4000-8000-000000000000").await.unwrap();
    client.respond("not-a-uuid").await.unwrap();
    assert!(client.is_silent(Duration::from_millis(200)).await);

    // Each response frees exactly one slot, in FIFO order
    for expected in 100..110 {
        let (id, _) = sent.remove(0);
        client.respond(&id).await.unwrap();
        let (next_id, line) = client.recv_command().await.unwrap();
        assert_eq!(line, format!("say {expected}"));
        sent.push((next_id, line));
    }
    assert!(client.is_silent(Duration::from_millis(200)).await);
}

#[tokio::test]
async fn test_configured_ceiling() {
    let (_server, mut client) = flooded(5).await;

    let mut sent = Vec::new();
    for _ in 0..5 {
        sent.push(client.recv_command().await.unwrap());
    }
    assert!(client.is_silent(Duration::from_millis(200)).await);

    let (id, _) = sent.remove(0);
    client.respond(&id).await.unwrap();
    assert_eq!(client.recv_command().await.unwrap().1, "say 5");
}
