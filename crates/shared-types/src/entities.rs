//! # Core Domain Types
//!
//! Primitive types for the token genesis distribution:
//!
//! - **Identity**: `Address` (20-byte account identifier)
//! - **Commitment**: `Hash` (32-byte Keccak-256 output)
//! - **Quantities**: `U256` token amounts (re-exported from
//!   `primitive-types` for use across all crates)

// Re-export U256/U512 from primitive-types for use across all crates.
// U512 is the intermediate width for exact mul-then-div token arithmetic.
pub use primitive_types::{U256, U512};

/// A 32-byte hash (Keccak-256).
pub type Hash = [u8; 32];

/// A 20-byte Ethereum-style account address.
///
/// All address fields use the raw binary form; textual hex is only a
/// presentation format (see [`crate::address`]).
pub type Address = [u8; 20];

/// The all-zero address. Never a valid recipient.
pub const NULL_ADDRESS: Address = [0u8; 20];

/// The all-zero hash.
pub const ZERO_HASH: Hash = [0u8; 32];
