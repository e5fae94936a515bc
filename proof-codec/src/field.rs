//! Fixed-width field element and curve point encoding
//!
//! Layout expected by the Soroban BLS12-381 host functions (arkworks
//! uncompressed, big-endian):
//!
//! - Fq element: 48 bytes
//! - G1 point: x (48) || y (48) = 96 bytes
//! - G2 point: x_c0 (48) || x_c1 (48) || y_c0 (48) || y_c1 (48) = 192 bytes
//! - Fr element (public input): 32 bytes

use num_bigint::BigInt;

use crate::error::EncodingError;
use crate::types::Scalar;

/// Bytes per base-field (Fq) element
pub const FQ_BYTES: usize = 48;
/// Bytes per scalar-field (Fr) element
pub const FR_BYTES: usize = 32;
/// Bytes per uncompressed G1 point
pub const G1_BYTES: usize = 2 * FQ_BYTES;
/// Bytes per uncompressed G2 point
pub const G2_BYTES: usize = 4 * FQ_BYTES;
/// Bytes of a canonical proof: A (G1) || B (G2) || C (G1)
pub const PROOF_BYTES: usize = G1_BYTES + G2_BYTES + G1_BYTES;
/// Bytes of the big-endian element count that prefixes lists
pub const LENGTH_PREFIX_BYTES: usize = 4;

/// Encode a decimal integer as a big-endian, zero-padded `width`-byte array
pub fn encode_fixed(value: &Scalar, width: usize) -> Result<Vec<u8>, EncodingError> {
    let text = value.as_str().trim();
    let malformed = || EncodingError::Malformed(format!("not a decimal integer: {text:?}"));

    // parse_bytes tolerates `_` separators, so check the digits first
    let digits = text.strip_prefix(['+', '-']).unwrap_or(text);
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return Err(malformed());
    }
    let parsed = BigInt::parse_bytes(text.as_bytes(), 10).ok_or_else(malformed)?;

    // Negative values have no unsigned representation
    let magnitude = parsed
        .to_biguint()
        .ok_or(EncodingError::OutOfRange { width })?;

    let raw = magnitude.to_bytes_be();
    if raw.len() > width {
        return Err(EncodingError::OutOfRange { width });
    }

    let mut out = vec![0u8; width];
    out[width - raw.len()..].copy_from_slice(&raw);
    Ok(out)
}

/// Encode a base-curve point `(x, y)` into 96 bytes
pub fn encode_g1(x: &Scalar, y: &Scalar) -> Result<Vec<u8>, EncodingError> {
    let mut out = Vec::with_capacity(G1_BYTES);
    out.extend(encode_fixed(x, FQ_BYTES)?);
    out.extend(encode_fixed(y, FQ_BYTES)?);
    Ok(out)
}

/// Encode an extension-curve point `((x1, x2), (y1, y2))` into 192 bytes
///
/// snarkjs emits Fq2 limbs in Solidity order `[c1, c0]`, while the verifier
/// deserializes them as `[c0, c1]`, so each coordinate's limbs are swapped.
pub fn encode_g2(
    (x1, x2): (&Scalar, &Scalar),
    (y1, y2): (&Scalar, &Scalar),
) -> Result<Vec<u8>, EncodingError> {
    let mut out = Vec::with_capacity(G2_BYTES);
    out.extend(encode_fixed(x2, FQ_BYTES)?);
    out.extend(encode_fixed(x1, FQ_BYTES)?);
    out.extend(encode_fixed(y2, FQ_BYTES)?);
    out.extend(encode_fixed(y1, FQ_BYTES)?);
    Ok(out)
}

/// Pick `(x, y)` out of a snarkjs G1 array, ignoring a trailing `z`
pub(crate) fn g1_coords<'a>(
    point: &'a [Scalar],
    name: &str,
) -> Result<(&'a Scalar, &'a Scalar), EncodingError> {
    match point {
        [x, y, ..] => Ok((x, y)),
        _ => Err(EncodingError::Malformed(format!(
            "{name}: expected at least 2 coordinates, got {}",
            point.len()
        ))),
    }
}

type Fq2Limbs<'a> = (&'a Scalar, &'a Scalar);

/// Pick `((x1, x2), (y1, y2))` out of a snarkjs G2 array, ignoring a trailing `z`
pub(crate) fn g2_coords<'a>(
    point: &'a [Vec<Scalar>],
    name: &str,
) -> Result<(Fq2Limbs<'a>, Fq2Limbs<'a>), EncodingError> {
    let [x, y, ..] = point else {
        return Err(EncodingError::Malformed(format!(
            "{name}: expected at least 2 Fq2 coordinates, got {}",
            point.len()
        )));
    };

    let limbs = |coord: &'a [Scalar], label: &str| match coord {
        [c_a, c_b, ..] => Ok((c_a, c_b)),
        _ => Err(EncodingError::Malformed(format!(
            "{name}.{label}: Fq2 elements must have 2 limbs, got {}",
            coord.len()
        ))),
    };

    Ok((limbs(x.as_slice(), "x")?, limbs(y.as_slice(), "y")?))
}
