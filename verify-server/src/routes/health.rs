//! Health and status endpoints

use axum::{
    extract::State,
    http::StatusCode,
    response::IntoResponse,
    routing::get,
    Json, Router,
};

use crate::state::AppState;
use crate::types::{HealthResponse, StatusResponse};

/// Create health routes
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/health", get(health_check))
        .route("/status", get(status))
}

/// Health check endpoint
/// GET /health
async fn health_check() -> impl IntoResponse {
    let response = HealthResponse {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    };

    (StatusCode::OK, Json(response))
}

/// Detailed status endpoint
/// GET /status
async fn status(State(state): State<AppState>) -> impl IntoResponse {
    let response = StatusResponse {
        status: "running".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        network_passphrase: state.submitter().network_passphrase().to_string(),
        contract_id: state.contract_id().map(str::to_string),
        started_at: state.started_at(),
        uptime_secs: state.uptime_secs(),
        proofs_generated: state.proofs_generated(),
        verifications: state.verification_counters(),
    };

    (StatusCode::OK, Json(response))
}
