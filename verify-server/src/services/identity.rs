//! Source Identity Resolution
//!
//! Works out which Stellar account the verification transaction is built
//! for. The secret seed is only used to derive its public key: simulation
//! needs no signature, so nothing is ever signed.

use ed25519_dalek::{SigningKey, VerifyingKey};
use serde::{Deserialize, Serialize};
use stellar_strkey::ed25519::{PrivateKey, PublicKey};
use stellar_strkey::Contract;
use thiserror::Error;
use tracing::warn;

/// Marker found in the sample `.env` secrets that were never filled in
pub const PLACEHOLDER_MARKER: &str = "REPLACE_WITH";

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Provide a source secret key (S...) or source public key (G...)")]
    MissingIdentity,
    #[error("Source secret key is invalid. Provide a valid secret (S...) or leave it blank and set a source public key (G...)")]
    InvalidSecret,
    #[error("Source public key is invalid. Use a valid G... key")]
    InvalidPublicKey,
    #[error("No verifier contract id configured")]
    MissingContractId,
    #[error("Verifier contract id is invalid. Use a valid C... contract address")]
    InvalidContractId,
}

/// Caller-supplied identity material (both parts optional)
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct IdentityInput {
    pub source_secret: Option<String>,
    pub source_public_key: Option<String>,
}

/// Where the resolved address came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IdentitySource {
    DerivedFromSecret,
    SuppliedPublicKey,
}

/// Account the transaction is sourced from
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedIdentity {
    pub public_key: PublicKey,
    pub source: IdentitySource,
}

impl ResolvedIdentity {
    /// G... address of the account
    pub fn address(&self) -> String {
        self.public_key.to_string()
    }
}

impl IdentityInput {
    /// Resolve to a usable address
    ///
    /// A usable secret always wins over a supplied public key. An invalid
    /// secret falls back to the public key only when one is supplied.
    pub fn resolve(&self) -> Result<ResolvedIdentity, ConfigError> {
        let secret = trimmed(self.source_secret.as_deref());
        let public = trimmed(self.source_public_key.as_deref());

        if let Some(secret) = secret.filter(|s| !is_placeholder(s)) {
            match derive_public_key(secret) {
                Ok(public_key) => {
                    return Ok(ResolvedIdentity {
                        public_key,
                        source: IdentitySource::DerivedFromSecret,
                    })
                }
                Err(err) if public.is_none() => return Err(err),
                Err(_) => warn!("Source secret is invalid, falling back to supplied public key"),
            }
        }

        let public = public.ok_or(ConfigError::MissingIdentity)?;
        let public_key =
            PublicKey::from_string(public).map_err(|_| ConfigError::InvalidPublicKey)?;

        Ok(ResolvedIdentity {
            public_key,
            source: IdentitySource::SuppliedPublicKey,
        })
    }

    /// Fill missing parts from configured defaults
    pub fn or_defaults(self, defaults: &IdentityInput) -> IdentityInput {
        IdentityInput {
            source_secret: self
                .source_secret
                .filter(|s| !s.trim().is_empty())
                .or_else(|| defaults.source_secret.clone()),
            source_public_key: self
                .source_public_key
                .filter(|s| !s.trim().is_empty())
                .or_else(|| defaults.source_public_key.clone()),
        }
    }
}

/// True for unfilled sample credentials
pub fn is_placeholder(secret: &str) -> bool {
    secret.contains(PLACEHOLDER_MARKER)
}

/// Derive the G... public key for an S... secret seed
pub fn derive_public_key(secret: &str) -> Result<PublicKey, ConfigError> {
    let seed = PrivateKey::from_string(secret).map_err(|_| ConfigError::InvalidSecret)?;
    let signing_key = SigningKey::from_bytes(&seed.0);
    let verifying_key: VerifyingKey = signing_key.verifying_key();
    Ok(PublicKey(verifying_key.to_bytes()))
}

/// Parse the verifier contract address (C...)
pub fn resolve_contract(contract_id: Option<&str>) -> Result<Contract, ConfigError> {
    let contract_id = trimmed(contract_id).ok_or(ConfigError::MissingContractId)?;
    Contract::from_string(contract_id).map_err(|_| ConfigError::InvalidContractId)
}

fn trimmed(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}
