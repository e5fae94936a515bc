//! Mapping of service errors onto HTTP responses

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use proof_codec::{DecodingError, EncodingError};
use serde_json::json;
use std::fmt;

use crate::services::{ProverError, VerifyError};
use crate::session::Session;
use crate::types::{ErrorCode, ErrorResponse};

/// Error returned by route handlers
#[derive(Debug)]
pub struct ApiError {
    pub status: StatusCode,
    pub code: ErrorCode,
    pub message: String,
    pub details: Option<serde_json::Value>,
}

impl ApiError {
    pub fn new(status: StatusCode, code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            status,
            code,
            message: message.into(),
            details: None,
        }
    }

    /// Attach the session as it stands after the failure
    pub fn with_session(mut self, session: &Session) -> Self {
        self.details = serde_json::to_value(session)
            .ok()
            .map(|session| json!({ "session": session }));
        self
    }
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = ErrorResponse {
            code: self.code,
            message: self.message,
            details: self.details,
        };
        (self.status, Json(body)).into_response()
    }
}

impl From<EncodingError> for ApiError {
    fn from(e: EncodingError) -> Self {
        ApiError::new(StatusCode::BAD_REQUEST, ErrorCode::EncodingFailed, e.to_string())
    }
}

impl From<DecodingError> for ApiError {
    fn from(e: DecodingError) -> Self {
        ApiError::new(StatusCode::BAD_REQUEST, ErrorCode::DecodingFailed, e.to_string())
    }
}

impl From<ProverError> for ApiError {
    fn from(e: ProverError) -> Self {
        let status = match e {
            ProverError::InvalidInput(_) => StatusCode::BAD_REQUEST,
            ProverError::ArtifactNotFound(_) | ProverError::Spawn(_) => {
                StatusCode::SERVICE_UNAVAILABLE
            }
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        };
        let code = match e {
            ProverError::InvalidInput(_) => ErrorCode::InvalidInput,
            _ => ErrorCode::ProofGenerationFailed,
        };
        ApiError::new(status, code, e.to_string())
    }
}

impl From<VerifyError> for ApiError {
    fn from(e: VerifyError) -> Self {
        let (status, code) = match &e {
            VerifyError::Config(_) => (StatusCode::BAD_REQUEST, ErrorCode::ConfigurationError),
            VerifyError::Decoding(DecodingError::UnexpectedReturnType(_)) => {
                (StatusCode::BAD_GATEWAY, ErrorCode::DecodingFailed)
            }
            VerifyError::Decoding(_) => (StatusCode::BAD_REQUEST, ErrorCode::DecodingFailed),
            VerifyError::Network(_) => (StatusCode::BAD_GATEWAY, ErrorCode::NetworkError),
            VerifyError::Verifier(_) => (StatusCode::UNPROCESSABLE_ENTITY, ErrorCode::VerifierError),
            VerifyError::Transaction(_) => {
                (StatusCode::INTERNAL_SERVER_ERROR, ErrorCode::InternalError)
            }
        };
        ApiError::new(status, code, e.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::{ConfigError, RpcError};

    #[test]
    fn test_verify_error_mapping() {
        let config: ApiError = VerifyError::Config(ConfigError::MissingIdentity).into();
        assert_eq!(config.status, StatusCode::BAD_REQUEST);
        assert_eq!(config.code, ErrorCode::ConfigurationError);

        let network: ApiError = VerifyError::Network(RpcError::EmptyResponse).into();
        assert_eq!(network.status, StatusCode::BAD_GATEWAY);
        assert_eq!(network.code, ErrorCode::NetworkError);

        let verifier: ApiError = VerifyError::Verifier("trap".into()).into();
        assert_eq!(verifier.code, ErrorCode::VerifierError);
        assert!(verifier.message.contains("trap"));
    }

    #[test]
    fn test_with_session_details() {
        let error = ApiError::new(StatusCode::BAD_REQUEST, ErrorCode::InvalidInput, "bad")
            .with_session(&Session::default());
        let details = error.details.unwrap();
        assert_eq!(details["session"]["a"], "3");
    }
}
