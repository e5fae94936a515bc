//! Codec error taxonomy

use thiserror::Error;

/// Failure while turning decimal proof data into canonical bytes.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EncodingError {
    #[error("Malformed input: {0}")]
    Malformed(String),
    #[error("Value does not fit in {width} bytes")]
    OutOfRange { width: usize },
}

/// Failure while reading hex text or canonical bytes.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DecodingError {
    #[error("Hex string must have even length, got {0} characters")]
    OddLength(usize),
    #[error("Invalid hex character {character:?} at position {index}")]
    InvalidDigit { character: char, index: usize },
    #[error("Unexpected return type from contract: {0}")]
    UnexpectedReturnType(String),
    #[error("Invalid {what} length: expected {expected} bytes, got {actual}")]
    Length {
        what: &'static str,
        expected: usize,
        actual: usize,
    },
}

