//! State routing: one handler per dialogue state.

use crate::domain::DomainError;

use super::command::{Command, OverrideCommand};
use super::dispatcher::BotContext;
use super::flow;
use super::session::DialogState;

/// How the input text was interpreted. Exposed on
/// [`DialogueStep`](super::DialogueStep) for test observability.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resolution {
    /// Free text (registration data) or unrecognized input.
    None,
    /// An idle-state command keyword.
    Command(Command),
    /// An override honored mid-flow.
    Override(OverrideCommand),
    /// A 1-based pick from the offered list.
    Selection(usize),
}

/// The outcome of one handled message: the reply to send and the state the
/// session moves to. Staying in a state and advancing are the same shape;
/// terminating a flow is `next = Idle`.
pub(crate) struct Turn {
    pub reply: String,
    pub next: DialogState,
    pub resolution: Resolution,
}

impl Turn {
    pub(crate) fn new(reply: impl Into<String>, next: DialogState) -> Self {
        Self {
            reply: reply.into(),
            next,
            resolution: Resolution::None,
        }
    }

    pub(crate) fn resolved(mut self, resolution: Resolution) -> Self {
        self.resolution = resolution;
        self
    }
}

/// Route one message through the handler registered for the session's
/// current state. Exhaustive over [`DialogState`]; adding a state without
/// a handler is a compile error.
pub(crate) async fn handle_state(
    ctx: &BotContext,
    key: &str,
    state: DialogState,
    text: &str,
) -> Result<Turn, DomainError> {
    let turn = match state {
        DialogState::Idle => flow::idle::handle(ctx, key, text).await?,
        DialogState::AwaitingRegistration => flow::registration::handle(ctx, key, text).await,
        DialogState::AwaitingScheduleSelection { departments } => {
            flow::schedule::department_selection(departments, text)
        }
        DialogState::AwaitingDoctorScheduleSelection { doctors } => {
            flow::schedule::doctor_schedule_selection(doctors, text)
        }
        DialogState::AwaitingDoctorSelection {
            patient_id,
            doctors,
        } => flow::reservation::doctor_selection(patient_id, doctors, text),
        DialogState::AwaitingDateSelection {
            patient_id,
            doctor_id,
            doctor_name,
            dates,
        } => flow::reservation::date_selection(patient_id, doctor_id, doctor_name, dates, text),
        DialogState::AwaitingTimeSelection {
            patient_id,
            doctor_id,
            doctor_name,
            date,
        } => {
            flow::reservation::time_selection(ctx, patient_id, doctor_id, doctor_name, date, text)
                .await
        }
        DialogState::AwaitingCancelConfirmation { reservations } => {
            flow::cancel::handle(ctx, reservations, text).await
        }
    };
    Ok(turn)
}
