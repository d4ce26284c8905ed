// src/api/http/router.rs

use axum::{
    Router,
    http::{HeaderValue, Method, header},
    routing::{get, post},
};
use std::sync::Arc;
use tower_http::cors::{AllowOrigin, CorsLayer};

use super::handlers::{health_handler, process_command_handler};
use crate::state::AppState;

/// Router for the command endpoint and health checks, CORS restricted to the
/// configured frontend origins.
pub fn http_router(app_state: Arc<AppState>, cors_origins: &[String]) -> Router {
    let origins: Vec<HeaderValue> = cors_origins
        .iter()
        .filter_map(|origin| origin.parse().ok())
        .collect();
    let cors = CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_methods([Method::GET, Method::POST])
        .allow_headers([header::CONTENT_TYPE])
        .allow_credentials(true);

    Router::new()
        .route("/", get(health_handler))
        .route("/health", get(health_handler))
        .route("/process-command", post(process_command_handler))
        .layer(cors)
        .with_state(app_state)
}
