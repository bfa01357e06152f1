//! Message dispatch: the single entry point for inbound texts.

use std::sync::Arc;

use tracing::{debug, error, warn};

use antria_gateway_protocol::{canonical_phone, phone_key};

use crate::domain::DomainGateway;
use crate::gateway::MessageSender;

use super::command::{self, OverrideCommand};
use super::machine::{self, Resolution, Turn};
use super::session::{DialogState, SessionStore};
use super::templates;

/// Collaborators shared by every flow handler.
pub(crate) struct BotContext {
    pub sessions: Arc<SessionStore>,
    pub domain: Arc<dyn DomainGateway>,
    pub sender: Arc<dyn MessageSender>,
    pub default_department_id: String,
    pub admin_phone: String,
}

/// One observed exchange: what came in, how it was interpreted, where the
/// session went, and what was said back. Never persisted; returned for
/// tests and the message-injection endpoint.
#[derive(Debug, Clone)]
pub struct DialogueStep {
    pub sender: String,
    pub input: String,
    pub resolution: Resolution,
    pub from_state: &'static str,
    pub to_state: &'static str,
    pub reply: String,
}

pub struct Dispatcher {
    ctx: BotContext,
}

impl Dispatcher {
    pub fn new(
        sessions: Arc<SessionStore>,
        domain: Arc<dyn DomainGateway>,
        sender: Arc<dyn MessageSender>,
        default_department_id: impl Into<String>,
        admin_phone: impl Into<String>,
    ) -> Self {
        Self {
            ctx: BotContext {
                sessions,
                domain,
                sender,
                default_department_id: default_department_id.into(),
                admin_phone: admin_phone.into(),
            },
        }
    }

    /// Handle one inbound text. Returns `None` when the message is
    /// discarded (empty text); otherwise the observed [`DialogueStep`].
    ///
    /// Messages from the same sender are serialized on the per-key session
    /// lock, so concurrent replies from one user cannot interleave their
    /// read-modify-write of the session.
    pub async fn on_message(&self, sender_key: &str, raw_text: &str) -> Option<DialogueStep> {
        let text = raw_text.trim();
        if text.is_empty() {
            return None;
        }

        let key = canonical_phone(phone_key(sender_key));
        let lock = self.ctx.sessions.lock_handle(&key);
        let _guard = lock.lock().await;

        let session = self.ctx.sessions.get(&key);
        let from_state = session.state.name();
        debug!(%key, state = from_state, %text, "dispatching message");

        let Turn {
            reply,
            next,
            resolution,
        } = self.run_turn(&key, session.state, text).await;
        let to_state = next.name();

        if next.is_idle() {
            self.ctx.sessions.clear(&key);
        } else {
            self.ctx.sessions.update(&key, next);
        }

        if let Err(err) = self.ctx.sender.send(&key, &reply).await {
            // Delivery is best-effort; the session has already moved on.
            warn!(%key, error = %err, "failed to send reply");
        }

        Some(DialogueStep {
            sender: key,
            input: text.to_string(),
            resolution,
            from_state,
            to_state,
            reply,
        })
    }

    async fn run_turn(&self, key: &str, state: DialogState, text: &str) -> Turn {
        // Overrides win over in-flow parsing, from every non-idle state.
        if !state.is_idle() {
            if let Some(ov) = command::lookup_override(text) {
                let reply = match ov {
                    OverrideCommand::Menu => templates::welcome(),
                    OverrideCommand::Abort => templates::flow_aborted(),
                };
                return Turn::new(reply, DialogState::Idle)
                    .resolved(Resolution::Override(ov));
            }
        }

        match machine::handle_state(&self.ctx, key, state.clone(), text).await {
            Ok(turn) => turn,
            Err(err) => {
                // Boundary catch: log, apologize, leave the session as-is.
                error!(%key, error = %err, "dialogue handler failed");
                Turn::new(templates::generic_error(), state)
            }
        }
    }
}
