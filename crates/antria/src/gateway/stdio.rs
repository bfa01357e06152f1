//! JSON-Lines stdio gateway.
//!
//! An external transport sidecar (the process that actually holds the
//! WhatsApp connection) writes [`GatewayEvent`] lines to our stdin and
//! reads [`GatewayCommand`] lines from our stdout. Malformed lines are
//! logged and skipped; the loop only ends when stdin closes.

use std::sync::Arc;

use async_trait::async_trait;
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader, Stdout};
use tokio::sync::Mutex;
use tracing::{info, warn};

use antria_gateway_protocol::{GatewayCommand, GatewayEvent};

use super::{MessageSender, SendError};
use crate::bot::Dispatcher;

/// Writes `send_message` commands as JSON lines on stdout.
pub struct StdoutSender {
    stdout: Mutex<Stdout>,
}

impl StdoutSender {
    pub fn new() -> Self {
        Self {
            stdout: Mutex::new(tokio::io::stdout()),
        }
    }
}

impl Default for StdoutSender {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl MessageSender for StdoutSender {
    async fn send(&self, recipient: &str, text: &str) -> Result<(), SendError> {
        let command = GatewayCommand::SendMessage {
            recipient: recipient.to_string(),
            text: text.to_string(),
        };
        let mut line =
            serde_json::to_string(&command).map_err(|e| SendError(e.to_string()))?;
        line.push('\n');

        let mut stdout = self.stdout.lock().await;
        stdout
            .write_all(line.as_bytes())
            .await
            .map_err(|e| SendError(e.to_string()))?;
        stdout.flush().await.map_err(|e| SendError(e.to_string()))
    }
}

/// Consume gateway events from stdin until it closes.
pub async fn run(dispatcher: Arc<Dispatcher>) -> anyhow::Result<()> {
    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    while let Some(line) = lines.next_line().await? {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        let event: GatewayEvent = match serde_json::from_str(line) {
            Ok(event) => event,
            Err(err) => {
                warn!(error = %err, "ignoring malformed gateway event");
                continue;
            }
        };
        match event {
            GatewayEvent::MessageReceived(data) => {
                let Some(text) = data.dispatch_text() else {
                    continue;
                };
                let _ = dispatcher.on_message(&data.sender.jid, text).await;
            }
            GatewayEvent::Connected { gateway } => info!(%gateway, "transport connected"),
            GatewayEvent::Disconnected { reason } => {
                warn!(?reason, "transport disconnected");
            }
            GatewayEvent::Error { code, message } => {
                warn!(%code, %message, "transport error");
            }
        }
    }

    info!("gateway stdin closed, stopping");
    Ok(())
}
