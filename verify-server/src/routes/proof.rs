//! Canonical encoding endpoint

use axum::{routing::post, Json, Router};
use proof_codec::{encode_proof, encode_public_inputs};
use tracing::{info, instrument};

use super::ApiError;
use crate::state::AppState;
use crate::types::{EncodeProofRequest, EncodeProofResponse};

/// Create proof routes
pub fn routes() -> Router<AppState> {
    Router::new().route("/proof/encode", post(encode))
}

/// Encode snarkjs proof and public signals
/// POST /api/v1/proof/encode
#[instrument(skip(request))]
async fn encode(
    Json(request): Json<EncodeProofRequest>,
) -> Result<Json<EncodeProofResponse>, ApiError> {
    let proof_hex = encode_proof(&request.proof)?;
    let public_hex = encode_public_inputs(&request.public_signals)?;

    info!(public_count = request.public_signals.len(), "Encoded proof");

    Ok(Json(EncodeProofResponse {
        proof_hex,
        public_hex,
        public_count: request.public_signals.len(),
    }))
}
