//! Verification Submitter
//!
//! Runs a read-only call of the verifier contract's `verify(proof, public)`
//! entry point through transaction simulation and reports the boolean result.
//!
//! Each invocation walks the same states:
//! `Idle -> IdentityResolved -> AccountLoaded -> TransactionBuilt -> Simulated -> Decoded`.
//! Any failure ends the run; it is logged with the last state reached.

use std::fmt;
use std::sync::Arc;

use proof_codec::{hex_to_bytes, DecodingError};
use serde::{Deserialize, Serialize};
use stellar_xdr::curr::ScVal;
use thiserror::Error;
use tracing::{info, instrument, warn};

use super::identity::{resolve_contract, ConfigError, IdentityInput, IdentitySource};
use super::rpc::{LedgerRpc, RpcError};
use super::transaction::{
    build_invocation, bytes_arg, Invocation, TransactionError, VERIFY_FUNCTION,
};

/// Default fee in stroops
pub const DEFAULT_BASE_FEE: u32 = 100;
/// Default validity window in seconds
pub const DEFAULT_TX_TIMEOUT_SECS: u64 = 30;

#[derive(Error, Debug)]
pub enum VerifyError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error("Invalid payload: {0}")]
    Decoding(#[from] DecodingError),
    #[error("Network error: {0}")]
    Network(#[from] RpcError),
    #[error("Verifier rejected the invocation: {0}")]
    Verifier(String),
    #[error("Transaction assembly failed: {0}")]
    Transaction(#[from] TransactionError),
}

/// Progress of a single verification run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VerifyStage {
    Idle,
    IdentityResolved,
    AccountLoaded,
    TransactionBuilt,
    Simulated,
    Decoded,
}

impl fmt::Display for VerifyStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            VerifyStage::Idle => "idle",
            VerifyStage::IdentityResolved => "identity_resolved",
            VerifyStage::AccountLoaded => "account_loaded",
            VerifyStage::TransactionBuilt => "transaction_built",
            VerifyStage::Simulated => "simulated",
            VerifyStage::Decoded => "decoded",
        };
        f.write_str(name)
    }
}

/// Inputs of one verification
#[derive(Debug, Clone, Default)]
pub struct VerifyRequest {
    pub contract_id: Option<String>,
    pub identity: IdentityInput,
    pub proof_hex: String,
    pub public_hex: String,
}

/// Result of a completed verification
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VerificationOutcome {
    pub verified: bool,
    pub source_public_key: String,
    pub identity_source: IdentitySource,
    pub transaction_hash: String,
    pub latest_ledger: u32,
}

/// Simulation-only contract caller
#[derive(Clone)]
pub struct Submitter {
    rpc: Arc<dyn LedgerRpc>,
    network_passphrase: String,
    base_fee: u32,
    tx_timeout_secs: u64,
}

impl Submitter {
    pub fn new(rpc: Arc<dyn LedgerRpc>, network_passphrase: impl Into<String>) -> Self {
        Self {
            rpc,
            network_passphrase: network_passphrase.into(),
            base_fee: DEFAULT_BASE_FEE,
            tx_timeout_secs: DEFAULT_TX_TIMEOUT_SECS,
        }
    }

    pub fn with_base_fee(mut self, base_fee: u32) -> Self {
        self.base_fee = base_fee;
        self
    }

    pub fn with_tx_timeout(mut self, secs: u64) -> Self {
        self.tx_timeout_secs = secs;
        self
    }

    pub fn network_passphrase(&self) -> &str {
        &self.network_passphrase
    }

    /// Verify a proof against the contract
    ///
    /// A well-formed payload the contract rejects yields `verified: false`,
    /// not an error.
    #[instrument(skip(self, request))]
    pub async fn verify(&self, request: &VerifyRequest) -> Result<VerificationOutcome, VerifyError> {
        let mut stage = VerifyStage::Idle;
        let result = self.run(request, &mut stage).await;

        match &result {
            Ok(outcome) => info!(
                verified = outcome.verified,
                source = %outcome.source_public_key,
                tx_hash = %outcome.transaction_hash,
                latest_ledger = outcome.latest_ledger,
                "Verification completed"
            ),
            Err(e) => warn!(%stage, error = %e, "Verification failed"),
        }

        result
    }

    async fn run(
        &self,
        request: &VerifyRequest,
        stage: &mut VerifyStage,
    ) -> Result<VerificationOutcome, VerifyError> {
        let identity = request.identity.resolve()?;
        let contract = resolve_contract(request.contract_id.as_deref())?;
        *stage = VerifyStage::IdentityResolved;

        // Payloads are opaque to the submitter but must be valid hex before
        // anything reaches the network
        let proof = hex_to_bytes(&request.proof_hex)?;
        let public = hex_to_bytes(&request.public_hex)?;

        let account = self.rpc.get_account(&identity.public_key).await?;
        *stage = VerifyStage::AccountLoaded;

        let built = build_invocation(
            Invocation {
                source: &identity.public_key,
                account_sequence: account.sequence,
                contract: &contract,
                function: VERIFY_FUNCTION,
                args: vec![bytes_arg(proof)?, bytes_arg(public)?],
                fee: self.base_fee,
                now: unix_now(),
                valid_for: self.tx_timeout_secs,
            },
            &self.network_passphrase,
        )?;
        *stage = VerifyStage::TransactionBuilt;

        let simulation = self.rpc.simulate_transaction(&built.envelope).await?;
        *stage = VerifyStage::Simulated;

        if let Some(diagnostic) = simulation.error {
            return Err(VerifyError::Verifier(diagnostic));
        }

        let verified = decode_return_value(simulation.return_value)?;
        *stage = VerifyStage::Decoded;

        Ok(VerificationOutcome {
            verified,
            source_public_key: identity.address(),
            identity_source: identity.source,
            transaction_hash: built.hash_hex(),
            latest_ledger: simulation.latest_ledger,
        })
    }
}

/// Interpret the contract's return value as the verification result
pub fn decode_return_value(value: Option<ScVal>) -> Result<bool, DecodingError> {
    match value {
        Some(ScVal::Bool(verified)) => Ok(verified),
        Some(other) => Err(DecodingError::UnexpectedReturnType(other.name().to_string())),
        None => Err(DecodingError::UnexpectedReturnType("no result".to_string())),
    }
}

fn unix_now() -> u64 {
    u64::try_from(chrono::Utc::now().timestamp()).unwrap_or_default()
}
