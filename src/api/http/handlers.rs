// src/api/http/handlers.rs

use axum::{Json, extract::State};
use chrono::Utc;
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::sync::Arc;

use crate::dispatcher;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct CommandRequest {
    pub text: String,
}

#[derive(Debug, Serialize)]
pub struct CommandResponse {
    pub response: String,
}

/// Main endpoint: one command in, one assistant reply out. The reply shape
/// never varies, whatever failed internally.
pub async fn process_command_handler(
    State(app_state): State<Arc<AppState>>,
    Json(request): Json<CommandRequest>,
) -> Json<CommandResponse> {
    let response = dispatcher::dispatch(&app_state, &request.text).await;
    Json(CommandResponse { response })
}

/// Health check handler
pub async fn health_handler() -> Json<serde_json::Value> {
    Json(json!({
        "status": "Car assistant backend is running",
        "version": env!("CARGO_PKG_VERSION"),
        "timestamp": Utc::now().to_rfc3339(),
    }))
}
