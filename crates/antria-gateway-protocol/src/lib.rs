//! Gateway protocol types for Antria.
//!
//! Transport sidecars (WhatsApp, or anything that can deliver text) talk to
//! the Antria core through this protocol:
//!
//! - [`GatewayEvent`]: messages from the gateway to the core (message
//!   received, connection state, errors)
//! - [`GatewayCommand`]: messages from the core to the gateway (send text)
//!
//! External gateways serialize both as JSON Lines (newline-delimited JSON),
//! so a sidecar in any language can plug in over stdio.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// JID suffixes appended by WhatsApp-style transports.
const JID_SUFFIXES: &[&str] = &["@s.whatsapp.net", "@c.us", "@g.us"];

/// The well-known JID used for status broadcasts.
const STATUS_BROADCAST_JID: &str = "status@broadcast";

// ============================================================================
// Events (gateway -> core)
// ============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum GatewayEvent {
    MessageReceived(MessageReceivedData),
    Connected { gateway: String },
    Disconnected { reason: Option<String> },
    Error { code: String, message: String },
}

/// One inbound message envelope, as delivered by the transport.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MessageReceivedData {
    pub sender: Sender,
    /// True when the transport echoes the account's own outgoing message.
    #[serde(default)]
    pub from_self: bool,
    pub timestamp: DateTime<Utc>,
    pub content: MessageContent,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Sender {
    /// Raw transport identifier, e.g. `6281234567890@s.whatsapp.net`.
    pub jid: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,
}

/// Best-effort text carriers. Rich interactive elements degrade to the id
/// of whatever the user tapped.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MessageContent {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub button_reply_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub list_reply_id: Option<String>,
}

impl MessageContent {
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            text: Some(text.into()),
            ..Self::default()
        }
    }

    /// Resolve the single text field the dispatcher sees: the first
    /// non-empty carrier wins, in order plain text, selected button id,
    /// selected list row id.
    pub fn best_text(&self) -> Option<&str> {
        fn non_empty(value: Option<&str>) -> Option<&str> {
            value.filter(|t| !t.is_empty())
        }
        non_empty(self.text.as_deref())
            .or_else(|| non_empty(self.button_reply_id.as_deref()))
            .or_else(|| non_empty(self.list_reply_id.as_deref()))
    }
}

impl MessageReceivedData {
    pub fn is_status_broadcast(&self) -> bool {
        self.sender.jid == STATUS_BROADCAST_JID
    }

    /// The text to dispatch, or `None` when the event must be discarded:
    /// own outgoing echoes, status broadcasts, and envelopes with no
    /// extractable text never reach the dispatcher.
    pub fn dispatch_text(&self) -> Option<&str> {
        if self.from_self || self.is_status_broadcast() {
            return None;
        }
        self.content.best_text()
    }
}

// ============================================================================
// Commands (core -> gateway)
// ============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum GatewayCommand {
    SendMessage { recipient: String, text: String },
}

// ============================================================================
// Identity normalization
// ============================================================================

/// Strip the transport suffix from a JID, leaving the bare phone number.
pub fn phone_key(jid: &str) -> &str {
    for suffix in JID_SUFFIXES {
        if let Some(stripped) = jid.strip_suffix(suffix) {
            return stripped;
        }
    }
    jid
}

/// Canonicalize an Indonesian phone number: digits only, `0` prefix and
/// bare local numbers rewritten to the `62` country format.
pub fn canonical_phone(raw: &str) -> String {
    let digits: String = raw.chars().filter(|c| c.is_ascii_digit()).collect();
    if let Some(rest) = digits.strip_prefix('0') {
        format!("62{rest}")
    } else if digits.starts_with("62") {
        digits
    } else {
        format!("62{digits}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn envelope(jid: &str, content: MessageContent) -> MessageReceivedData {
        MessageReceivedData {
            sender: Sender {
                jid: jid.to_string(),
                display_name: None,
            },
            from_self: false,
            timestamp: Utc::now(),
            content,
        }
    }

    #[test]
    fn best_text_prefers_plain_text() {
        let content = MessageContent {
            text: Some("halo".into()),
            button_reply_id: Some("btn-1".into()),
            list_reply_id: Some("row-1".into()),
        };
        assert_eq!(content.best_text(), Some("halo"));
    }

    #[test]
    fn best_text_falls_back_to_button_then_list() {
        let content = MessageContent {
            text: None,
            button_reply_id: Some("btn-1".into()),
            list_reply_id: Some("row-1".into()),
        };
        assert_eq!(content.best_text(), Some("btn-1"));

        let content = MessageContent {
            text: None,
            button_reply_id: None,
            list_reply_id: Some("row-1".into()),
        };
        assert_eq!(content.best_text(), Some("row-1"));
    }

    #[test]
    fn best_text_empty_content() {
        assert_eq!(MessageContent::default().best_text(), None);
        assert_eq!(MessageContent::text("").best_text(), None);
    }

    #[test]
    fn empty_text_falls_through_to_button() {
        let content = MessageContent {
            text: Some(String::new()),
            button_reply_id: Some("btn-1".into()),
            list_reply_id: None,
        };
        assert_eq!(content.best_text(), Some("btn-1"));
    }

    #[test]
    fn discards_own_messages() {
        let mut msg = envelope("628111@s.whatsapp.net", MessageContent::text("hi"));
        msg.from_self = true;
        assert_eq!(msg.dispatch_text(), None);
    }

    #[test]
    fn discards_status_broadcast() {
        let msg = envelope("status@broadcast", MessageContent::text("story"));
        assert_eq!(msg.dispatch_text(), None);
    }

    #[test]
    fn dispatches_plain_message() {
        let msg = envelope("628111@s.whatsapp.net", MessageContent::text("MENU"));
        assert_eq!(msg.dispatch_text(), Some("MENU"));
    }

    #[test]
    fn phone_key_strips_jid_suffix() {
        assert_eq!(phone_key("6281234567890@s.whatsapp.net"), "6281234567890");
        assert_eq!(phone_key("6281234567890@c.us"), "6281234567890");
        assert_eq!(phone_key("6281234567890"), "6281234567890");
    }

    #[test]
    fn canonical_phone_rewrites_local_prefixes() {
        assert_eq!(canonical_phone("081234567890"), "6281234567890");
        assert_eq!(canonical_phone("6281234567890"), "6281234567890");
        assert_eq!(canonical_phone("81234567890"), "6281234567890");
        assert_eq!(canonical_phone("+62 812-3456-7890"), "6281234567890");
    }

    #[test]
    fn event_json_line_round_trip() {
        let event = GatewayEvent::MessageReceived(envelope(
            "628111@s.whatsapp.net",
            MessageContent::text("RESERVASI"),
        ));
        let line = serde_json::to_string(&event).unwrap();
        assert!(line.contains("\"type\":\"message_received\""));
        let parsed: GatewayEvent = serde_json::from_str(&line).unwrap();
        match parsed {
            GatewayEvent::MessageReceived(data) => {
                assert_eq!(data.dispatch_text(), Some("RESERVASI"));
            }
            other => panic!("unexpected event: {other:?}"),
        }
    }

    #[test]
    fn command_json_shape() {
        let cmd = GatewayCommand::SendMessage {
            recipient: "6281234567890".into(),
            text: "halo".into(),
        };
        let line = serde_json::to_string(&cmd).unwrap();
        assert!(line.contains("\"type\":\"send_message\""));
    }
}
