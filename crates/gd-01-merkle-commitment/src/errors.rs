//! Merkle commitment error types.

use shared_types::{Address, EncodingError};
use thiserror::Error;

/// Errors from tree construction, proof generation, and batch decoding.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum MerkleError {
    /// Membership was requested against the empty-tree sentinel.
    #[error("Cannot prove membership against an empty tree")]
    EmptyTree,

    /// The address is not part of the committed set.
    #[error("Address 0x{} does not exist in the Merkle tree", hex::encode(.address))]
    AddressNotFound {
        /// The address whose leaf was not found.
        address: Address,
    },

    /// The packed batch encoding is structurally invalid.
    #[error("Malformed batch proof encoding: {reason}")]
    MalformedBatch {
        /// What the decoder tripped over.
        reason: String,
    },

    /// Decoded proof count disagrees with the recipient count.
    #[error("Batch holds {proofs} proofs for {recipients} recipients")]
    BatchCountMismatch {
        /// Number of recipients supplied alongside the batch.
        recipients: usize,
        /// Number of proofs actually decodable from the batch.
        proofs: usize,
    },

    /// A textual address record failed to parse.
    #[error("Invalid address record: {0}")]
    InvalidRecord(#[from] EncodingError),
}
