//! Proof Session
//!
//! Everything a client works with between requests: the circuit inputs, the
//! current canonical payloads, the last verification result and a
//! human-readable status line. Sessions are plain values; the server keeps
//! none of them.

use num_bigint::BigInt;
use proof_codec::{clean_hex, corrupt_bit_flip, corrupt_increment, DecodingError, Scalar};
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::services::VerificationOutcome;

const INITIAL_MESSAGE: &str = "Generate a Groth16 proof, then verify it against Soroban testnet.";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Session {
    pub a: String,
    pub b: String,
    pub proof_hex: String,
    pub public_hex: String,
    pub public_signals: Vec<Scalar>,
    pub verify_result: Option<bool>,
    pub source_public_key: Option<String>,
    pub message: String,
}

impl Default for Session {
    fn default() -> Self {
        Self {
            a: "3".to_string(),
            b: "11".to_string(),
            proof_hex: String::new(),
            public_hex: String::new(),
            public_signals: Vec::new(),
            verify_result: None,
            source_public_key: None,
            message: INITIAL_MESSAGE.to_string(),
        }
    }
}

/// Session step that can fail
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionAction {
    Generate,
    Verify,
}

impl Session {
    /// Expected public output `a * b`, or "0" when either input is not an integer
    pub fn predicted_output(&self) -> String {
        match (parse_integer(&self.a), parse_integer(&self.b)) {
            (Some(a), Some(b)) => (a * b).to_string(),
            _ => "0".to_string(),
        }
    }

    /// Store freshly generated payloads
    pub fn record_generated(
        &mut self,
        proof_hex: String,
        public_hex: String,
        public_signals: Vec<Scalar>,
    ) {
        let output = public_signals
            .first()
            .map(|s| s.to_string())
            .unwrap_or_default();
        self.message = format!(
            "Proof generated for a={}, b={}. Public output c={output}.",
            self.a.trim(),
            self.b.trim()
        );
        self.proof_hex = proof_hex;
        self.public_hex = public_hex;
        self.public_signals = public_signals;
        self.verify_result = None;
    }

    /// Flip the low bit of the proof's last byte
    ///
    /// Returns false (and leaves the session untouched) when there is
    /// nothing to corrupt.
    pub fn corrupt_proof(&mut self) -> Result<bool, DecodingError> {
        if !corruptible(&self.proof_hex) {
            return Ok(false);
        }
        self.proof_hex = corrupt_bit_flip(&self.proof_hex)?;
        self.message = "Proof hex mutated. Verification should now fail or revert.".to_string();
        Ok(true)
    }

    /// Increment the public inputs' last byte
    pub fn corrupt_public(&mut self) -> Result<bool, DecodingError> {
        if !corruptible(&self.public_hex) {
            return Ok(false);
        }
        self.public_hex = corrupt_increment(&self.public_hex)?;
        self.message = "Public hex mutated. Verification should now return false.".to_string();
        Ok(true)
    }

    pub fn record_outcome(&mut self, outcome: &VerificationOutcome) {
        self.source_public_key = Some(outcome.source_public_key.clone());
        self.verify_result = Some(outcome.verified);
        self.message = if outcome.verified {
            "Contract verification returned true.".to_string()
        } else {
            "Contract verification returned false (expected after edits).".to_string()
        };
    }

    pub fn record_failure(&mut self, action: SessionAction, error: &dyn fmt::Display) {
        self.verify_result = None;
        self.message = match action {
            SessionAction::Generate => format!("Proof generation failed: {error}"),
            SessionAction::Verify => format!("Verification failed: {error}"),
        };
    }
}

fn corruptible(hex: &str) -> bool {
    !hex.is_empty() && clean_hex(hex).len() >= 2
}

fn parse_integer(value: &str) -> Option<BigInt> {
    let value = value.trim();
    if value.is_empty() {
        return Some(BigInt::default());
    }
    BigInt::parse_bytes(value.as_bytes(), 10)
}
