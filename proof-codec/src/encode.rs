//! Proof, public input and verification key encoders

use crate::error::EncodingError;
use crate::field::{
    encode_fixed, encode_g1, encode_g2, g1_coords, g2_coords, FR_BYTES, G1_BYTES, G2_BYTES,
    LENGTH_PREFIX_BYTES, PROOF_BYTES,
};
use crate::types::{ProofObject, Scalar, VerificationKeyObject};

/// Encode a snarkjs proof into the 384-byte canonical form, as lowercase hex
pub fn encode_proof(proof: &ProofObject) -> Result<String, EncodingError> {
    Ok(hex::encode(encode_proof_bytes(proof)?))
}

/// Encode a snarkjs proof into its 384 canonical bytes: A || B || C
pub fn encode_proof_bytes(proof: &ProofObject) -> Result<Vec<u8>, EncodingError> {
    let (ax, ay) = g1_coords(&proof.pi_a, "pi_a")?;
    let (bx, by) = g2_coords(&proof.pi_b, "pi_b")?;
    let (cx, cy) = g1_coords(&proof.pi_c, "pi_c")?;

    let mut out = Vec::with_capacity(PROOF_BYTES);
    out.extend(encode_g1(ax, ay)?);
    out.extend(encode_g2(bx, by)?);
    out.extend(encode_g1(cx, cy)?);
    Ok(out)
}

/// Encode public signals as a u32 big-endian count followed by 32-byte words, as lowercase hex
pub fn encode_public_inputs(signals: &[Scalar]) -> Result<String, EncodingError> {
    Ok(hex::encode(encode_public_input_bytes(signals)?))
}

/// Encode public signals into canonical bytes
pub fn encode_public_input_bytes(signals: &[Scalar]) -> Result<Vec<u8>, EncodingError> {
    let mut out = Vec::with_capacity(LENGTH_PREFIX_BYTES + signals.len() * FR_BYTES);
    out.extend(length_prefix(signals.len())?);
    for signal in signals {
        out.extend(encode_fixed(signal, FR_BYTES)?);
    }
    Ok(out)
}

/// Encode a snarkjs verification key, as lowercase hex
///
/// Layout: alpha (G1) || beta (G2) || gamma (G2) || delta (G2) || u32be(IC count) || IC (G1 each)
pub fn encode_verification_key(vk: &VerificationKeyObject) -> Result<String, EncodingError> {
    Ok(hex::encode(encode_verification_key_bytes(vk)?))
}

/// Encode a snarkjs verification key into canonical bytes
pub fn encode_verification_key_bytes(
    vk: &VerificationKeyObject,
) -> Result<Vec<u8>, EncodingError> {
    if vk.ic.is_empty() || vk.ic.len() != vk.n_public + 1 {
        return Err(EncodingError::Malformed(format!(
            "IC length {} does not match nPublic + 1 = {}",
            vk.ic.len(),
            vk.n_public + 1
        )));
    }

    let mut out = Vec::with_capacity(
        G1_BYTES + 3 * G2_BYTES + LENGTH_PREFIX_BYTES + vk.ic.len() * G1_BYTES,
    );

    let (alpha_x, alpha_y) = g1_coords(&vk.vk_alpha_1, "vk_alpha_1")?;
    out.extend(encode_g1(alpha_x, alpha_y)?);

    for (name, point) in [
        ("vk_beta_2", &vk.vk_beta_2),
        ("vk_gamma_2", &vk.vk_gamma_2),
        ("vk_delta_2", &vk.vk_delta_2),
    ] {
        let (x, y) = g2_coords(point, name)?;
        out.extend(encode_g2(x, y)?);
    }

    out.extend(length_prefix(vk.ic.len())?);
    for (i, point) in vk.ic.iter().enumerate() {
        let (x, y) = g1_coords(point, &format!("IC[{i}]"))?;
        out.extend(encode_g1(x, y)?);
    }

    Ok(out)
}

fn length_prefix(count: usize) -> Result<[u8; LENGTH_PREFIX_BYTES], EncodingError> {
    let count = u32::try_from(count).map_err(|_| EncodingError::OutOfRange {
        width: LENGTH_PREFIX_BYTES,
    })?;
    Ok(count.to_be_bytes())
}
