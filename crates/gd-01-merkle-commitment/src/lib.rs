//! # GD-01 Merkle Commitment
//!
//! Deterministic Merkle commitments over a recipient address set.
//!
//! ## Purpose
//!
//! Commit a closed set of 20-byte addresses to a single 32-byte root and
//! produce per-address inclusion proofs, such that any two implementations
//! building from the same set arrive at a bit-identical root. The root is
//! the load-bearing invariant of the distribution scheme: an authoritative
//! ledger stores it once, and every claim is checked against it.
//!
//! ## Construction rules
//!
//! - Input addresses are deduplicated by raw value; empty textual records
//!   are discarded before hashing.
//! - Leaves are `keccak256(address)` sorted ascending by raw hash bytes.
//!   The sort has no semantic meaning beyond determinism.
//! - Layers pair adjacent nodes; an unpaired tail node carries up to the
//!   next layer unchanged (it is never hashed against a synthetic zero).
//! - Sibling pairs are hashed in byte-sorted order, so verification does
//!   not depend on left/right position.
//!
//! ## Module Structure
//!
//! - `tree` - tree construction, roots, proof generation
//! - `proof` - the combine rule and proof verification
//! - `batch` - packing many proofs into one transportable encoding

#![warn(missing_docs)]

pub mod batch;
pub mod errors;
pub mod proof;
pub mod tree;

pub use batch::BatchProofCodec;
pub use errors::MerkleError;
pub use proof::{combine_hashes, verify_proof, Proof};
pub use tree::{MerkleTree, EMPTY_TREE_ROOT};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
