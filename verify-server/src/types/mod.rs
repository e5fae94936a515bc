//! Type definitions for the Verify Server
//!
//! Request/response bodies and the error codes returned by the API.

use proof_codec::{ProofObject, PublicInputs};
use serde::{Deserialize, Serialize};

use crate::services::VerificationOutcome;
use crate::session::Session;

/// Error codes returned by the API
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    /// Request body or field failed validation
    InvalidInput,
    /// Proof or public inputs could not be canonically encoded
    EncodingFailed,
    /// Hex payload or contract return value could not be decoded
    DecodingFailed,
    /// Identity or contract configuration is missing or invalid
    ConfigurationError,
    /// Ledger RPC unreachable or returned an error
    NetworkError,
    /// Contract invocation failed during simulation
    VerifierError,
    /// Proof generation failed
    ProofGenerationFailed,
    /// Internal server error
    InternalError,
}

// ==================== Request Types ====================

/// Encode snarkjs output into canonical hex
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EncodeProofRequest {
    pub proof: ProofObject,
    pub public_signals: PublicInputs,
}

/// Verify the session's payloads; identity and contract fall back to server config
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct VerifySessionRequest {
    pub session: Session,
    pub contract_id: Option<String>,
    pub source_secret: Option<String>,
    pub source_public_key: Option<String>,
}

// ==================== Response Types ====================

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EncodeProofResponse {
    pub proof_hex: String,
    pub public_hex: String,
    /// Number of public inputs encoded
    pub public_count: usize,
}

/// Session after an action
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionResponse {
    pub session: Session,
    /// `a * b` for the session's current inputs
    pub predicted_output: String,
    /// Whether a corruption action changed the payload
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mutated: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub outcome: Option<VerificationOutcome>,
}

impl SessionResponse {
    pub fn new(session: Session) -> Self {
        Self {
            predicted_output: session.predicted_output(),
            session,
            mutated: None,
            outcome: None,
        }
    }
}

/// Error response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// Error code
    pub code: ErrorCode,
    /// Human-readable message
    pub message: String,
    /// Optional additional details
    pub details: Option<serde_json::Value>,
}

/// Server health status
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
}

/// Server status with more details
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatusResponse {
    pub status: String,
    pub version: String,
    /// Network passphrase transactions are built for
    pub network_passphrase: String,
    /// Default verifier contract, if configured
    pub contract_id: Option<String>,
    pub started_at: chrono::DateTime<chrono::Utc>,
    pub uptime_secs: u64,
    pub proofs_generated: u64,
    pub verifications: VerificationCounters,
}

/// Verification tallies since startup
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct VerificationCounters {
    pub verified: u64,
    pub rejected: u64,
    pub failed: u64,
}
