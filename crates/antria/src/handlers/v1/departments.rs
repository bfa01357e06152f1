//! Department (poli) administration handlers.

use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Deserialize;

use crate::domain::WeeklySchedule;
use crate::response;
use crate::server::AppState;

#[derive(Deserialize)]
pub struct CreateDepartmentRequest {
    name: String,
    #[serde(default)]
    description: Option<String>,
    #[serde(default)]
    schedule: WeeklySchedule,
    #[serde(default = "default_active")]
    is_active: bool,
}

fn default_active() -> bool {
    true
}

/// GET /api/v1/departments
pub async fn list_departments(State(state): State<AppState>) -> Response {
    Json(state.store.list_departments()).into_response()
}

/// POST /api/v1/departments
pub async fn create_department(
    State(state): State<AppState>,
    Json(req): Json<CreateDepartmentRequest>,
) -> Response {
    if req.name.trim().is_empty() {
        return response::bad_request("name is required").into_response();
    }
    let department =
        state
            .store
            .insert_department(req.name, req.description, req.schedule, req.is_active);
    (StatusCode::CREATED, Json(department)).into_response()
}
