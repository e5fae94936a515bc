//! Readers for the canonical layouts
//!
//! These apply the same bounds checks as the verifier contract's
//! `from_bytes` parsers, which lets callers inspect a payload offline.

use crate::error::DecodingError;
use crate::field::{FR_BYTES, G1_BYTES, G2_BYTES, LENGTH_PREFIX_BYTES, PROOF_BYTES};

/// Borrowed view of the three proof elements
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProofView<'a> {
    pub a: &'a [u8],
    pub b: &'a [u8],
    pub c: &'a [u8],
}

/// Split 384 canonical proof bytes into A (96), B (192) and C (96)
pub fn read_proof(bytes: &[u8]) -> Result<ProofView<'_>, DecodingError> {
    if bytes.len() != PROOF_BYTES {
        return Err(DecodingError::Length {
            what: "proof",
            expected: PROOF_BYTES,
            actual: bytes.len(),
        });
    }

    let (a, rest) = bytes.split_at(G1_BYTES);
    let (b, c) = rest.split_at(G2_BYTES);
    Ok(ProofView { a, b, c })
}

/// Parse canonical public-input bytes into their 32-byte words
pub fn read_public_inputs(bytes: &[u8]) -> Result<Vec<[u8; FR_BYTES]>, DecodingError> {
    let Some((prefix, body)) = bytes.split_first_chunk::<LENGTH_PREFIX_BYTES>() else {
        return Err(DecodingError::Length {
            what: "public input prefix",
            expected: LENGTH_PREFIX_BYTES,
            actual: bytes.len(),
        });
    };

    let count = u32::from_be_bytes(*prefix) as usize;
    let expected = count.checked_mul(FR_BYTES).unwrap_or(usize::MAX);
    if body.len() != expected {
        return Err(DecodingError::Length {
            what: "public inputs",
            expected,
            actual: body.len(),
        });
    }

    Ok(body
        .chunks_exact(FR_BYTES)
        .map(|chunk| {
            let mut word = [0u8; FR_BYTES];
            word.copy_from_slice(chunk);
            word
        })
        .collect())
}
