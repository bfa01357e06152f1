//! Doctor administration handlers.

use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Deserialize;

use crate::domain::{DomainGateway, WeeklySchedule};
use crate::response;
use crate::server::AppState;

#[derive(Deserialize)]
pub struct CreateDoctorRequest {
    name: String,
    specialty: String,
    #[serde(default)]
    schedule: WeeklySchedule,
}

/// GET /api/v1/doctors
pub async fn list_doctors(State(state): State<AppState>) -> Response {
    match state.store.list_doctors().await {
        Ok(doctors) => Json(doctors).into_response(),
        Err(err) => response::internal_error(err.to_string()).into_response(),
    }
}

/// POST /api/v1/doctors
pub async fn create_doctor(
    State(state): State<AppState>,
    Json(req): Json<CreateDoctorRequest>,
) -> Response {
    if req.name.trim().is_empty() || req.specialty.trim().is_empty() {
        return response::bad_request("name and specialty are required").into_response();
    }
    let doctor = state
        .store
        .insert_doctor(req.name, req.specialty, req.schedule);
    (StatusCode::CREATED, Json(doctor)).into_response()
}
