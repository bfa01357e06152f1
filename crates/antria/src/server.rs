use std::sync::Arc;
use std::time::Duration;

use axum::Router;
use axum::http::StatusCode;
use axum::routing::{get, post};
use tower_http::timeout::TimeoutLayer;

use crate::bot::Dispatcher;
use crate::domain::MemoryGateway;
use crate::handlers;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<MemoryGateway>,
    pub dispatcher: Arc<Dispatcher>,
}

pub fn build_app(state: AppState, request_timeout_secs: u64) -> Router {
    let api_v1 = Router::new()
        .route(
            "/patients",
            get(handlers::v1::list_patients).post(handlers::v1::create_patient),
        )
        .route("/patients/{id}", get(handlers::v1::get_patient))
        .route(
            "/doctors",
            get(handlers::v1::list_doctors).post(handlers::v1::create_doctor),
        )
        .route(
            "/departments",
            get(handlers::v1::list_departments).post(handlers::v1::create_department),
        )
        .route("/reservations", get(handlers::v1::list_reservations))
        .route(
            "/reservations/{id}/confirm",
            post(handlers::v1::confirm_reservation),
        )
        .route(
            "/reservations/{id}/complete",
            post(handlers::v1::complete_reservation),
        )
        .route(
            "/reservations/{id}/cancel",
            post(handlers::v1::cancel_reservation),
        )
        .route("/bot/messages", post(handlers::v1::bot_message))
        .with_state(state);

    Router::new()
        .route("/livez", get(handlers::livez))
        .route("/readyz", get(handlers::readyz))
        .route("/version", get(handlers::version))
        .nest("/api/v1", api_v1)
        .layer(TimeoutLayer::with_status_code(
            StatusCode::REQUEST_TIMEOUT,
            Duration::from_secs(request_timeout_secs),
        ))
}
