//! # Shared Types Crate
//!
//! This crate contains the primitive domain types shared across the
//! GenesisDrop crates: addresses, hashes, token quantities, and their
//! textual encodings.
//!
//! ## Design Principles
//!
//! - **Single Source of Truth**: All cross-crate primitive types are
//!   defined here.
//! - **Canonical binary form**: Addresses are 20 raw bytes; textual hex is
//!   case-insensitive on input and lowercase on output. Hashing always
//!   operates on the binary form.

pub mod address;
pub mod entities;
pub mod errors;

pub use address::{format_address, format_hash, parse_address, parse_hash};
pub use entities::*;
pub use errors::*;
