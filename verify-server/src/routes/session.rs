//! Session endpoints
//!
//! Each endpoint takes the client's session, applies one action and returns
//! the updated session. Failures carry the updated session in `details`.

use axum::{extract::State, routing::post, Json, Router};
use proof_codec::{encode_proof, encode_public_inputs};
use tracing::{info, instrument};

use super::ApiError;
use crate::services::{IdentityInput, MultiplierInput, VerifyRequest};
use crate::session::{Session, SessionAction};
use crate::state::AppState;
use crate::types::{SessionResponse, VerifySessionRequest};

/// Create session routes
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/session/generate", post(generate))
        .route("/session/corrupt-proof", post(corrupt_proof))
        .route("/session/corrupt-public", post(corrupt_public))
        .route("/session/verify", post(verify))
}

/// Generate a proof for the session's inputs
/// POST /api/v1/session/generate
#[instrument(skip(state, session))]
async fn generate(
    State(state): State<AppState>,
    Json(mut session): Json<Session>,
) -> Result<Json<SessionResponse>, ApiError> {
    session.verify_result = None;

    let result = async {
        let input = MultiplierInput::new(&session.a, &session.b)?;
        let generated = state.prover().generate_proof(&input).await?;
        let proof_hex = encode_proof(&generated.proof)?;
        let public_hex = encode_public_inputs(&generated.public_signals)?;
        Ok::<_, ApiError>((proof_hex, public_hex, generated.public_signals))
    }
    .await;

    match result {
        Ok((proof_hex, public_hex, public_signals)) => {
            state.increment_proofs();
            session.record_generated(proof_hex, public_hex, public_signals);
            info!(predicted = %session.predicted_output(), "Session proof generated");
            Ok(Json(SessionResponse::new(session)))
        }
        Err(e) => {
            session.record_failure(SessionAction::Generate, &e);
            Err(e.with_session(&session))
        }
    }
}

/// Flip the low bit of the proof's last byte
/// POST /api/v1/session/corrupt-proof
async fn corrupt_proof(
    Json(mut session): Json<Session>,
) -> Result<Json<SessionResponse>, ApiError> {
    let mutated = session.corrupt_proof()?;
    Ok(Json(SessionResponse {
        mutated: Some(mutated),
        ..SessionResponse::new(session)
    }))
}

/// Increment the public inputs' last byte
/// POST /api/v1/session/corrupt-public
async fn corrupt_public(
    Json(mut session): Json<Session>,
) -> Result<Json<SessionResponse>, ApiError> {
    let mutated = session.corrupt_public()?;
    Ok(Json(SessionResponse {
        mutated: Some(mutated),
        ..SessionResponse::new(session)
    }))
}

/// Verify the session's payloads against the contract
/// POST /api/v1/session/verify
#[instrument(skip(state, request))]
async fn verify(
    State(state): State<AppState>,
    Json(request): Json<VerifySessionRequest>,
) -> Result<Json<SessionResponse>, ApiError> {
    let VerifySessionRequest {
        mut session,
        contract_id,
        source_secret,
        source_public_key,
    } = request;

    let identity = IdentityInput {
        source_secret,
        source_public_key,
    }
    .or_defaults(state.default_identity());
    let contract_id = contract_id
        .filter(|c| !c.trim().is_empty())
        .or_else(|| state.contract_id().map(str::to_string));

    session.verify_result = None;
    let verify_request = VerifyRequest {
        contract_id,
        identity,
        proof_hex: session.proof_hex.clone(),
        public_hex: session.public_hex.clone(),
    };

    match state.submitter().verify(&verify_request).await {
        Ok(outcome) => {
            state.record_verification(Some(outcome.verified));
            session.record_outcome(&outcome);
            Ok(Json(SessionResponse {
                outcome: Some(outcome),
                ..SessionResponse::new(session)
            }))
        }
        Err(e) => {
            state.record_verification(None);
            session.record_failure(SessionAction::Verify, &e);
            Err(ApiError::from(e).with_session(&session))
        }
    }
}
