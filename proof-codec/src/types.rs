//! snarkjs object shapes consumed by the codec
//!
//! snarkjs writes field elements as decimal strings, but hand-written fixtures
//! and some JS callers pass plain numbers. Both are accepted and kept as text
//! so that no value ever goes through floating point.

use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;

/// A nonnegative integer in decimal form, as produced by snarkjs
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct Scalar(String);

impl Scalar {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Scalar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for Scalar {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl From<String> for Scalar {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl From<u64> for Scalar {
    fn from(value: u64) -> Self {
        Self(value.to_string())
    }
}

impl From<i64> for Scalar {
    fn from(value: i64) -> Self {
        Self(value.to_string())
    }
}

impl<'de> Deserialize<'de> for Scalar {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Raw {
            Text(String),
            Number(serde_json::Number),
        }

        Ok(match Raw::deserialize(deserializer)? {
            Raw::Text(text) => Scalar(text),
            Raw::Number(number) => Scalar(number.to_string()),
        })
    }
}

/// Groth16 proof as written to `proof.json` by snarkjs
///
/// Points are projective: a trailing `z` coordinate (always `1` / `[1, 0]` for
/// affine points) may follow `x` and `y` and is ignored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProofObject {
    pub pi_a: Vec<Scalar>,
    pub pi_b: Vec<Vec<Scalar>>,
    pub pi_c: Vec<Scalar>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub protocol: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub curve: Option<String>,
}

/// Public signals as written to `public.json`
pub type PublicInputs = Vec<Scalar>;

/// Verification key as written to `verification_key.json`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VerificationKeyObject {
    pub vk_alpha_1: Vec<Scalar>,
    pub vk_beta_2: Vec<Vec<Scalar>>,
    pub vk_gamma_2: Vec<Vec<Scalar>>,
    pub vk_delta_2: Vec<Vec<Scalar>>,
    #[serde(rename = "IC")]
    pub ic: Vec<Vec<Scalar>>,
    #[serde(rename = "nPublic")]
    pub n_public: usize,
}
