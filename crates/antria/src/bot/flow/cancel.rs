//! Reservation cancellation: pick one of the active reservations.

use tracing::error;

use crate::bot::dispatcher::BotContext;
use crate::bot::machine::{Resolution, Turn};
use crate::bot::session::DialogState;
use crate::bot::templates;
use crate::domain::Reservation;

use super::parse_selection;

pub(crate) async fn handle(
    ctx: &BotContext,
    reservations: Vec<Reservation>,
    text: &str,
) -> Turn {
    let Some(idx) = parse_selection(text, reservations.len()) else {
        return Turn::new(
            templates::invalid_selection(reservations.len()),
            DialogState::AwaitingCancelConfirmation { reservations },
        );
    };

    let selected = &reservations[idx];
    let turn = match ctx.domain.cancel_reservation(&selected.id).await {
        Ok(_) => Turn::new(
            templates::cancel_success(&selected.queue_number),
            DialogState::Idle,
        ),
        Err(err) => {
            error!(error = %err, reservation = %selected.id, "cancellation failed");
            Turn::new(templates::cancel_failed(), DialogState::Idle)
        }
    };
    turn.resolved(Resolution::Selection(idx + 1))
}
