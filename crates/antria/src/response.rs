//! Uniform JSON error envelopes for the HTTP API.

use axum::Json;
use axum::http::StatusCode;
use serde::Serialize;

#[derive(Serialize)]
pub struct ErrorBody {
    pub error: ErrorDetail,
}

#[derive(Serialize)]
pub struct ErrorDetail {
    pub code: &'static str,
    pub message: String,
}

fn envelope(code: &'static str, message: impl Into<String>) -> Json<ErrorBody> {
    Json(ErrorBody {
        error: ErrorDetail {
            code,
            message: message.into(),
        },
    })
}

pub fn bad_request(message: impl Into<String>) -> (StatusCode, Json<ErrorBody>) {
    (StatusCode::BAD_REQUEST, envelope("bad_request", message))
}

pub fn not_found(message: impl Into<String>) -> (StatusCode, Json<ErrorBody>) {
    (StatusCode::NOT_FOUND, envelope("not_found", message))
}

pub fn conflict(message: impl Into<String>) -> (StatusCode, Json<ErrorBody>) {
    (StatusCode::CONFLICT, envelope("conflict", message))
}

pub fn internal_error(message: impl Into<String>) -> (StatusCode, Json<ErrorBody>) {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        envelope("internal_error", message),
    )
}
