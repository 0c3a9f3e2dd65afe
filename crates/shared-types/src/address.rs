//! # Address & Hash Text Encoding
//!
//! Conversions between the canonical binary forms and their `0x`-prefixed
//! hex representations. Input is case-insensitive; output is lowercase.

use crate::entities::{Address, Hash};
use crate::errors::EncodingError;

/// Parse a 20-byte address from hex text.
///
/// Accepts an optional `0x` prefix and either letter case. The result is
/// the canonical binary form used for hashing and comparison.
pub fn parse_address(text: &str) -> Result<Address, EncodingError> {
    let stripped = text.trim();
    let stripped = stripped
        .strip_prefix("0x")
        .or_else(|| stripped.strip_prefix("0X"))
        .unwrap_or(stripped);

    let bytes = hex::decode(stripped).map_err(|_| EncodingError::InvalidHex {
        input: text.to_string(),
    })?;

    Address::try_from(bytes.as_slice()).map_err(|_| EncodingError::InvalidLength {
        expected: 20,
        got: bytes.len(),
    })
}

/// Parse a 32-byte hash from hex text (optional `0x` prefix).
pub fn parse_hash(text: &str) -> Result<Hash, EncodingError> {
    let stripped = text.trim();
    let stripped = stripped
        .strip_prefix("0x")
        .or_else(|| stripped.strip_prefix("0X"))
        .unwrap_or(stripped);

    let bytes = hex::decode(stripped).map_err(|_| EncodingError::InvalidHex {
        input: text.to_string(),
    })?;

    Hash::try_from(bytes.as_slice()).map_err(|_| EncodingError::InvalidLength {
        expected: 32,
        got: bytes.len(),
    })
}

/// Format an address as `0x`-prefixed lowercase hex.
pub fn format_address(address: &Address) -> String {
    format!("0x{}", hex::encode(address))
}

/// Format a hash as `0x`-prefixed lowercase hex.
pub fn format_hash(hash: &Hash) -> String {
    format!("0x{}", hex::encode(hash))
}
