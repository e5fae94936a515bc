//! Hex text handling shared by every byte-level operation

use crate::error::DecodingError;

/// Normalize user-supplied hex: trim, drop a `0x` prefix and whitespace, lowercase
pub fn clean_hex(value: &str) -> String {
    let trimmed = value.trim();
    let unprefixed = trimmed
        .strip_prefix("0x")
        .or_else(|| trimmed.strip_prefix("0X"))
        .unwrap_or(trimmed);

    unprefixed
        .chars()
        .filter(|c| !c.is_whitespace())
        .flat_map(char::to_lowercase)
        .collect()
}

/// Decode hex text into raw bytes after normalizing it
pub fn hex_to_bytes(value: &str) -> Result<Vec<u8>, DecodingError> {
    let clean = clean_hex(value);
    if clean.len() % 2 != 0 {
        return Err(DecodingError::OddLength(clean.len()));
    }

    // hex reports raw bytes, which misnames multi-byte characters
    hex::decode(&clean).map_err(|_| first_invalid_digit(&clean))
}

/// Encode raw bytes as lowercase hex without prefix
pub fn bytes_to_hex(bytes: &[u8]) -> String {
    hex::encode(bytes)
}

fn first_invalid_digit(clean: &str) -> DecodingError {
    clean
        .char_indices()
        .find(|(_, c)| !c.is_ascii_hexdigit())
        .map(|(index, character)| DecodingError::InvalidDigit { character, index })
        .unwrap_or(DecodingError::OddLength(clean.len()))
}
