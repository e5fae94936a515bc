//! Controlled corruption of canonical payloads
//!
//! Both operators touch only the last byte, so the payload keeps its length
//! and layout. A verifier fed the result must reject it on the math, not on
//! the encoding.

use crate::error::DecodingError;
use crate::hex_utils::{bytes_to_hex, clean_hex, hex_to_bytes};

/// Flip the least-significant bit of the last byte
pub fn corrupt_bit_flip(hex: &str) -> Result<String, DecodingError> {
    mutate_last_byte(hex, |byte| byte ^ 0x01)
}

/// Add one (mod 256) to the last byte
pub fn corrupt_increment(hex: &str) -> Result<String, DecodingError> {
    mutate_last_byte(hex, |byte| byte.wrapping_add(1))
}

fn mutate_last_byte(hex: &str, mutate: impl Fn(u8) -> u8) -> Result<String, DecodingError> {
    if clean_hex(hex).len() < 2 {
        return Ok(hex.to_string());
    }

    let mut bytes = hex_to_bytes(hex)?;
    if let Some(last) = bytes.last_mut() {
        *last = mutate(*last);
    }
    Ok(bytes_to_hex(&bytes))
}
