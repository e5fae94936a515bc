//! HTTP Routes for the Verify Server
//!
//! Provides REST API endpoints for encoding, generating and verifying proofs.

pub mod error;
pub mod health;
pub mod proof;
pub mod session;

use axum::Router;

pub use error::ApiError;

use crate::state::AppState;

/// Create all routes
pub fn create_routes(state: AppState) -> Router {
    Router::new()
        .merge(health::routes())
        .nest("/api/v1", proof::routes().merge(session::routes()))
        .with_state(state)
}
