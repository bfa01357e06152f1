//! Reservation administration handlers.
//!
//! The bot is the only writer of new reservations; the admin surface
//! drives the status lifecycle (`confirm`, `complete`, `cancel`).

use axum::Json;
use axum::extract::{Path, State};
use axum::response::{IntoResponse, Response};

use crate::domain::{DomainError, ReservationStatus};
use crate::response;
use crate::server::AppState;

/// GET /api/v1/reservations
pub async fn list_reservations(State(state): State<AppState>) -> Response {
    Json(state.store.list_reservations()).into_response()
}

/// POST /api/v1/reservations/{id}/confirm
pub async fn confirm_reservation(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Response {
    transition(&state, &id, ReservationStatus::Confirmed)
}

/// POST /api/v1/reservations/{id}/complete
pub async fn complete_reservation(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Response {
    transition(&state, &id, ReservationStatus::Completed)
}

/// POST /api/v1/reservations/{id}/cancel
pub async fn cancel_reservation(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Response {
    transition(&state, &id, ReservationStatus::Cancelled)
}

fn transition(state: &AppState, id: &str, status: ReservationStatus) -> Response {
    match state.store.set_reservation_status(id, status) {
        Ok(reservation) => Json(reservation).into_response(),
        Err(DomainError::NotFound { .. }) => {
            response::not_found(format!("Reservation '{id}' not found")).into_response()
        }
        Err(err) => response::internal_error(err.to_string()).into_response(),
    }
}
