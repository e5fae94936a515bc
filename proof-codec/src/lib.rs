//! # Proof Codec
//!
//! Re-encodes snarkjs Groth16 output (BLS12-381) into the fixed binary layout
//! consumed by the Soroban verifier contract.
//!
//! ## Canonical Layouts
//!
//! - Proof: `A (G1, 96) || B (G2, 192) || C (G1, 96)` = 384 bytes
//! - Public inputs: `u32be(count) || count × 32-byte big-endian words`
//! - Verification key: `alpha (G1) || beta, gamma, delta (G2) || u32be(IC count) || IC (G1)`
//!
//! All encoders emit lowercase hex without a `0x` prefix. Everything here is
//! pure and stateless.

pub mod corrupt;
pub mod encode;
pub mod error;
pub mod field;
pub mod hex_utils;
pub mod layout;
pub mod types;

// Re-export commonly used items
pub use corrupt::{corrupt_bit_flip, corrupt_increment};
pub use encode::{encode_proof, encode_public_inputs, encode_verification_key};
pub use error::{DecodingError, EncodingError};
pub use hex_utils::{bytes_to_hex, clean_hex, hex_to_bytes};
pub use types::{ProofObject, PublicInputs, Scalar, VerificationKeyObject};
