//! Inbound message injection.
//!
//! Webhook-shaped entry for transports that prefer HTTP over the stdio
//! protocol, and a convenient way to drive the bot in development.

use axum::Json;
use axum::extract::State;
use axum::response::{IntoResponse, Response};
use serde::{Deserialize, Serialize};

use crate::response;
use crate::server::AppState;

#[derive(Deserialize)]
pub struct BotMessageRequest {
    sender: String,
    text: String,
}

#[derive(Serialize)]
pub struct BotMessageResponse {
    reply: String,
    from_state: &'static str,
    to_state: &'static str,
}

/// POST /api/v1/bot/messages
pub async fn bot_message(
    State(state): State<AppState>,
    Json(req): Json<BotMessageRequest>,
) -> Response {
    match state.dispatcher.on_message(&req.sender, &req.text).await {
        Some(step) => Json(BotMessageResponse {
            reply: step.reply,
            from_state: step.from_state,
            to_state: step.to_state,
        })
        .into_response(),
        None => response::bad_request("message has no text").into_response(),
    }
}
