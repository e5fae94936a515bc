//! snarkjs Prover Driver
//!
//! Generates Groth16 proofs for the `a * b = c` multiplier circuit by running
//! `snarkjs groth16 fullprove` as a subprocess. The proof itself is treated
//! as a black box: only the JSON files snarkjs writes are read back.

use num_bigint::BigUint;
use proof_codec::{ProofObject, PublicInputs};
use serde::Serialize;
use std::path::{Path, PathBuf};
use std::time::Instant;
use thiserror::Error;
use tokio::process::Command;
use tracing::{debug, error, info, instrument, warn};
use uuid::Uuid;

#[derive(Error, Debug)]
pub enum ProverError {
    #[error("Invalid input: {0}")]
    InvalidInput(String),
    #[error("Circuit artifact not found: {0}")]
    ArtifactNotFound(String),
    #[error("Failed to launch prover: {0}")]
    Spawn(String),
    #[error("Proof generation failed: {0}")]
    GenerationFailed(String),
    #[error("Prover I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Prover output is not valid JSON: {0}")]
    Output(#[from] serde_json::Error),
}

/// Prover configuration
#[derive(Debug, Clone)]
pub struct ProverConfig {
    /// snarkjs executable
    pub snarkjs_bin: PathBuf,
    /// Witness generator (circuit wasm)
    pub circuit_wasm: PathBuf,
    /// Groth16 proving key
    pub proving_key: PathBuf,
    /// Parent directory for per-request work directories
    pub work_dir: PathBuf,
}

impl Default for ProverConfig {
    fn default() -> Self {
        Self {
            snarkjs_bin: PathBuf::from("snarkjs"),
            circuit_wasm: PathBuf::from("circuits/multiplier2.wasm"),
            proving_key: PathBuf::from("proving/multiplier2_final.zkey"),
            work_dir: std::env::temp_dir(),
        }
    }
}

/// Circuit witness input
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MultiplierInput {
    pub a: String,
    pub b: String,
}

impl MultiplierInput {
    /// Trim and validate both factors as nonnegative decimal integers
    pub fn new(a: &str, b: &str) -> Result<Self, ProverError> {
        Ok(Self {
            a: decimal("a", a)?,
            b: decimal("b", b)?,
        })
    }
}

/// Proof and public signals as written by snarkjs
#[derive(Debug, Clone)]
pub struct GeneratedProof {
    pub proof: ProofObject,
    pub public_signals: PublicInputs,
    pub generation_time_ms: u64,
}

/// Groth16 prover backed by snarkjs
pub struct ProverService {
    config: ProverConfig,
}

impl ProverService {
    pub fn new(config: ProverConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ProverConfig {
        &self.config
    }

    /// Generate a proof for `a * b`
    #[instrument(skip(self, input), fields(a = %input.a, b = %input.b))]
    pub async fn generate_proof(
        &self,
        input: &MultiplierInput,
    ) -> Result<GeneratedProof, ProverError> {
        for artifact in [&self.config.circuit_wasm, &self.config.proving_key] {
            if !artifact.exists() {
                return Err(ProverError::ArtifactNotFound(artifact.display().to_string()));
            }
        }

        let start = Instant::now();
        let work_dir = self.config.work_dir.join(format!("groth16-{}", Uuid::new_v4()));
        tokio::fs::create_dir_all(&work_dir).await?;

        let result = self.run_fullprove(input, &work_dir).await;

        if let Err(e) = tokio::fs::remove_dir_all(&work_dir).await {
            warn!(error = %e, dir = %work_dir.display(), "Failed to remove prover work dir");
        }

        let (proof, public_signals) = result.inspect_err(|e| {
            error!(error = %e, "Proof generation failed");
        })?;

        let generation_time_ms = u64::try_from(start.elapsed().as_millis()).unwrap_or(u64::MAX);
        info!(
            generation_time_ms,
            public_signals = public_signals.len(),
            "Proof generated successfully"
        );

        Ok(GeneratedProof {
            proof,
            public_signals,
            generation_time_ms,
        })
    }

    async fn run_fullprove(
        &self,
        input: &MultiplierInput,
        work_dir: &Path,
    ) -> Result<(ProofObject, PublicInputs), ProverError> {
        let input_path = work_dir.join("input.json");
        let proof_path = work_dir.join("proof.json");
        let public_path = work_dir.join("public.json");

        tokio::fs::write(&input_path, serde_json::to_vec(input)?).await?;

        debug!(bin = %self.config.snarkjs_bin.display(), "Running snarkjs groth16 fullprove");
        let output = Command::new(&self.config.snarkjs_bin)
            .arg("groth16")
            .arg("fullprove")
            .arg(&input_path)
            .arg(&self.config.circuit_wasm)
            .arg(&self.config.proving_key)
            .arg(&proof_path)
            .arg(&public_path)
            .kill_on_drop(true)
            .output()
            .await
            .map_err(|e| {
                ProverError::Spawn(format!("{}: {e}", self.config.snarkjs_bin.display()))
            })?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            let stdout = String::from_utf8_lossy(&output.stdout);
            let detail = if stderr.trim().is_empty() {
                stdout.trim().to_string()
            } else {
                stderr.trim().to_string()
            };
            return Err(ProverError::GenerationFailed(format!(
                "snarkjs exited with {}: {detail}",
                output.status
            )));
        }

        let proof: ProofObject = serde_json::from_slice(&tokio::fs::read(&proof_path).await?)?;
        let public_signals: PublicInputs =
            serde_json::from_slice(&tokio::fs::read(&public_path).await?)?;

        Ok((proof, public_signals))
    }
}

fn decimal(name: &str, value: &str) -> Result<String, ProverError> {
    let value = value.trim();
    if value.is_empty() || !value.bytes().all(|b| b.is_ascii_digit()) {
        return Err(ProverError::InvalidInput(format!(
            "{name} must be a nonnegative integer, got {value:?}"
        )));
    }
    // Normalise leading zeros
    BigUint::parse_bytes(value.as_bytes(), 10)
        .map(|n| n.to_string())
        .ok_or_else(|| ProverError::InvalidInput(format!("{name} is not a valid integer")))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_input_validation() {
        let input = MultiplierInput::new(" 3 ", "0011").unwrap();
        assert_eq!(input.a, "3");
        assert_eq!(input.b, "11");

        for bad in ["", "-1", "1.5", "0x10", "abc"] {
            assert!(
                matches!(MultiplierInput::new(bad, "1"), Err(ProverError::InvalidInput(_))),
                "{bad:?} should be rejected"
            );
        }
    }

    #[tokio::test]
    async fn test_missing_artifacts() {
        let prover = ProverService::new(ProverConfig {
            circuit_wasm: PathBuf::from("/nonexistent/multiplier2.wasm"),
            ..Default::default()
        });
        let input = MultiplierInput::new("3", "11").unwrap();
        assert!(matches!(
            prover.generate_proof(&input).await,
            Err(ProverError::ArtifactNotFound(_))
        ));
    }

    #[tokio::test]
    async fn test_missing_binary_is_spawn_error() {
        let artifacts = std::env::temp_dir().join(format!("prover-test-{}", Uuid::new_v4()));
        std::fs::create_dir_all(&artifacts).unwrap();
        let wasm = artifacts.join("circuit.wasm");
        let zkey = artifacts.join("circuit.zkey");
        std::fs::write(&wasm, b"").unwrap();
        std::fs::write(&zkey, b"").unwrap();

        let prover = ProverService::new(ProverConfig {
            snarkjs_bin: artifacts.join("no-such-snarkjs"),
            circuit_wasm: wasm,
            proving_key: zkey,
            work_dir: artifacts.clone(),
        });
        let input = MultiplierInput::new("3", "11").unwrap();
        let result = prover.generate_proof(&input).await;
        assert!(matches!(result, Err(ProverError::Spawn(_))));

        // Work dir is cleaned up even on failure
        let leftovers = std::fs::read_dir(&artifacts)
            .unwrap()
            .filter_map(Result::ok)
            .filter(|e| e.file_name().to_string_lossy().starts_with("groth16-"))
            .count();
        assert_eq!(leftovers, 0);

        std::fs::remove_dir_all(&artifacts).unwrap();
    }
}
