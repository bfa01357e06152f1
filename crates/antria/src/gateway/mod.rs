//! Transport seam.
//!
//! The core never talks to a messaging platform directly: outbound texts go
//! through [`MessageSender`], inbound events arrive as
//! `antria_gateway_protocol` envelopes from an external sidecar (see
//! [`stdio`]). Delivery is fire-and-forget; a failed send is logged and
//! swallowed, it never disturbs session state.

pub mod stdio;

use async_trait::async_trait;
use thiserror::Error;
use tracing::debug;

#[derive(Debug, Error)]
#[error("send failed: {0}")]
pub struct SendError(pub String);

/// The `send(recipient, text)` capability consumed by the dispatcher.
#[async_trait]
pub trait MessageSender: Send + Sync {
    async fn send(&self, recipient: &str, text: &str) -> Result<(), SendError>;
}

/// Sender for API-only deployments: outbound texts are logged, not
/// delivered anywhere.
#[derive(Debug, Default)]
pub struct NullSender;

#[async_trait]
impl MessageSender for NullSender {
    async fn send(&self, recipient: &str, _text: &str) -> Result<(), SendError> {
        debug!(recipient, "no transport attached, dropping outbound message");
        Ok(())
    }
}
