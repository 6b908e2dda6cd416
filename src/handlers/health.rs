use axum::{extract::State, http::StatusCode, response::Json};
use once_cell::sync::Lazy;
use std::time::Instant;
use tracing::debug;

use super::AppState;
use crate::models::HealthResponse;

pub static STARTED_AT: Lazy<Instant> = Lazy::new(Instant::now);

/// Health check endpoint
pub async fn health_handler(State(state): State<AppState>) -> Json<HealthResponse> {
    let response = HealthResponse {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        provider: state.chat.provider_name().to_string(),
        uptime_seconds: STARTED_AT.elapsed().as_secs(),
    };

    debug!(
        provider = %response.provider,
        uptime_seconds = response.uptime_seconds,
        "Health check completed"
    );

    Json(response)
}

/// Readiness check endpoint (for Kubernetes/Railway)
pub async fn ready_handler() -> StatusCode {
    StatusCode::OK
}
