//! Application State
//!
//! Shared state for the verify server, accessible from all route handlers.

use chrono::{DateTime, Utc};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Instant;

use crate::config::Config;
use crate::services::{IdentityInput, LedgerRpc, ProverConfig, ProverService, Submitter};
use crate::types::VerificationCounters;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    /// Proof generation service
    prover: ProverService,
    /// Simulation-only contract caller
    submitter: Submitter,
    /// Configured verifier contract
    contract_id: Option<String>,
    /// Configured source identity
    identity: IdentityInput,
    proofs_generated: AtomicU64,
    verified: AtomicU64,
    rejected: AtomicU64,
    failed: AtomicU64,
    started_at: DateTime<Utc>,
    start_time: Instant,
}

impl AppState {
    /// Create a new application state
    pub fn new(
        prover: ProverService,
        submitter: Submitter,
        contract_id: Option<String>,
        identity: IdentityInput,
    ) -> Self {
        Self {
            inner: Arc::new(AppStateInner {
                prover,
                submitter,
                contract_id,
                identity,
                proofs_generated: AtomicU64::new(0),
                verified: AtomicU64::new(0),
                rejected: AtomicU64::new(0),
                failed: AtomicU64::new(0),
                started_at: Utc::now(),
                start_time: Instant::now(),
            }),
        }
    }

    /// Wire services from configuration around the given ledger client
    pub fn from_config(config: &Config, rpc: Arc<dyn LedgerRpc>) -> Self {
        let prover = ProverService::new(ProverConfig {
            snarkjs_bin: config.snarkjs_bin.clone(),
            circuit_wasm: config.circuit_wasm.clone(),
            proving_key: config.proving_key.clone(),
            ..ProverConfig::default()
        });
        let submitter = Submitter::new(rpc, config.network_passphrase.clone())
            .with_base_fee(config.base_fee)
            .with_tx_timeout(config.tx_timeout_secs);
        let identity = IdentityInput {
            source_secret: config.source_secret.clone(),
            source_public_key: config.source_public_key.clone(),
        };

        Self::new(prover, submitter, config.contract_id.clone(), identity)
    }

    /// Get the prover service
    pub fn prover(&self) -> &ProverService {
        &self.inner.prover
    }

    /// Get the verification submitter
    pub fn submitter(&self) -> &Submitter {
        &self.inner.submitter
    }

    /// Default contract id
    pub fn contract_id(&self) -> Option<&str> {
        self.inner.contract_id.as_deref()
    }

    /// Default source identity
    pub fn default_identity(&self) -> &IdentityInput {
        &self.inner.identity
    }

    pub fn increment_proofs(&self) {
        self.inner.proofs_generated.fetch_add(1, Ordering::Relaxed);
    }

    pub fn proofs_generated(&self) -> u64 {
        self.inner.proofs_generated.load(Ordering::Relaxed)
    }

    /// Count a finished verification (`None` for a failed run)
    pub fn record_verification(&self, verified: Option<bool>) {
        let counter = match verified {
            Some(true) => &self.inner.verified,
            Some(false) => &self.inner.rejected,
            None => &self.inner.failed,
        };
        counter.fetch_add(1, Ordering::Relaxed);
    }

    pub fn verification_counters(&self) -> VerificationCounters {
        VerificationCounters {
            verified: self.inner.verified.load(Ordering::Relaxed),
            rejected: self.inner.rejected.load(Ordering::Relaxed),
            failed: self.inner.failed.load(Ordering::Relaxed),
        }
    }

    pub fn started_at(&self) -> DateTime<Utc> {
        self.inner.started_at
    }

    /// Get server uptime in seconds
    pub fn uptime_secs(&self) -> u64 {
        self.inner.start_time.elapsed().as_secs()
    }
}
