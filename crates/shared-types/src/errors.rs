//! # Error Types
//!
//! Errors for textual encoding of the shared primitive types.

use thiserror::Error;

/// Errors when parsing addresses or hashes from hex text.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum EncodingError {
    /// Input is not valid hexadecimal.
    #[error("Invalid hex input: {input}")]
    InvalidHex {
        /// The offending input text.
        input: String,
    },

    /// Decoded byte length does not match the target type.
    #[error("Invalid length: expected {expected} bytes, got {got}")]
    InvalidLength {
        /// Required byte length.
        expected: usize,
        /// Actual decoded length.
        got: usize,
    },
}
