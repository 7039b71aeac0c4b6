//! Telemetry utilities: command timing, spans, and message dumps.

use std::path::{Path, PathBuf};
use std::time::Instant;

use bedrock_proto::Message;

/// Guard for timing command execution.
///
/// Logs the command latency at debug level when dropped.
pub struct CommandTimer {
    command: String,
    start: Instant,
}

impl CommandTimer {
    /// Start timing a command.
    pub fn new(command: impl Into<String>) -> Self {
        Self {
            command: command.into(),
            start: Instant::now(),
        }
    }
}

impl Drop for CommandTimer {
    fn drop(&mut self) {
        let elapsed_ms = self.start.elapsed().as_secs_f64() * 1000.0;
        tracing::debug!(command = %self.command, elapsed_ms, "Command finished");
    }
}

/// Shorten `text` to at most `width` characters for log previews.
pub fn shorten(text: &str, width: usize) -> String {
    const ELLIPSIS: &str = "...";
    if text.chars().count() <= width {
        return text.to_string();
    }
    let keep = width.saturating_sub(ELLIPSIS.len());
    let mut short: String = text.chars().take(keep).collect();
    short.push_str(ELLIPSIS);
    short
}

/// Write `message` as pretty JSON into `dir`, named by the current time.
///
/// The directory is created if missing. Returns the written path.
pub async fn dump_message(dir: &Path, message: &Message) -> std::io::Result<PathBuf> {
    tokio::fs::create_dir_all(dir).await?;
    let stamp = chrono::Local::now().format("%Y-%m-%d_%H-%M-%S%.6f");
    let path = dir.join(format!("{stamp}.json"));
    let pretty = serde_json::to_string_pretty(message)?;
    tokio::fs::write(&path, pretty).await?;
    Ok(path)
}

/// Standardized span constructors.
pub mod spans {
    use std::net::SocketAddr;
    use tracing::{Span, info_span};

    /// Create a span for a game client connection.
    pub fn connection(addr: SocketAddr) -> Span {
        info_span!("connection", addr = %addr)
    }

    /// Create a span for a command execution.
    pub fn command(name: &str, sender: &str) -> Span {
        info_span!("command", name = %name, sender = %sender)
    }

    /// Create a span for an event handler.
    pub fn event(name: &str) -> Span {
        info_span!("event", name = %name)
    }
}
