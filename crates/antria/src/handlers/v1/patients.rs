//! Patient administration handlers.

use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use chrono::NaiveDate;
use serde::Deserialize;

use antria_gateway_protocol::canonical_phone;

use crate::domain::{DomainError, DomainGateway, NewPatient};
use crate::response;
use crate::server::AppState;

#[derive(Deserialize)]
pub struct CreatePatientRequest {
    name: String,
    nik: String,
    phone: String,
    /// `YYYY-MM-DD`
    birth_date: String,
}

/// GET /api/v1/patients
pub async fn list_patients(State(state): State<AppState>) -> Response {
    Json(state.store.list_patients()).into_response()
}

/// GET /api/v1/patients/{id}
pub async fn get_patient(State(state): State<AppState>, Path(id): Path<String>) -> Response {
    match state.store.get_patient(&id) {
        Some(patient) => Json(patient).into_response(),
        None => response::not_found(format!("Patient '{id}' not found")).into_response(),
    }
}

/// POST /api/v1/patients
pub async fn create_patient(
    State(state): State<AppState>,
    Json(req): Json<CreatePatientRequest>,
) -> Response {
    if req.nik.len() != 16 || !req.nik.chars().all(|c| c.is_ascii_digit()) {
        return response::bad_request("NIK must be exactly 16 digits").into_response();
    }
    let Ok(birth_date) = NaiveDate::parse_from_str(&req.birth_date, "%Y-%m-%d") else {
        return response::bad_request("birth_date must be YYYY-MM-DD").into_response();
    };

    let result = state
        .store
        .create_patient(NewPatient {
            name: req.name,
            nik: req.nik,
            phone: canonical_phone(&req.phone),
            birth_date,
        })
        .await;

    match result {
        Ok(patient) => (StatusCode::CREATED, Json(patient)).into_response(),
        Err(DomainError::DuplicateNik { nik }) => {
            response::conflict(format!("NIK '{nik}' already registered")).into_response()
        }
        Err(err) => response::internal_error(err.to_string()).into_response(),
    }
}
