//! Services for the Verify Server
//!
//! Contains the core logic for proof generation and on-chain verification.

pub mod identity;
pub mod prover;
pub mod rpc;
pub mod submitter;
pub mod transaction;

pub use identity::{ConfigError, IdentityInput, IdentitySource, ResolvedIdentity};
pub use prover::{MultiplierInput, ProverConfig, ProverError, ProverService};
pub use rpc::{LedgerRpc, RpcError, SorobanRpcClient};
pub use submitter::{Submitter, VerificationOutcome, VerifyError, VerifyRequest, VerifyStage};
