//! # Inclusion Proofs
//!
//! The canonical combine rule and proof verification.
//!
//! A proof is the ordered sequence of sibling hashes from leaf to root:
//! `proof[0]` pairs with the leaf itself, `proof[k]` pairs with the node
//! `k` levels up. Verification folds the leaf through the sequence and
//! compares the result to the expected root.

use serde::{Deserialize, Serialize};
use shared_crypto::KeccakHasher;
use shared_types::{Address, Hash};

use crate::errors::MerkleError;

/// An inclusion proof: sibling hashes ordered root-ward.
#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct Proof(Vec<Hash>);

impl Proof {
    /// Wrap an ordered sibling sequence.
    pub fn new(siblings: Vec<Hash>) -> Self {
        Self(siblings)
    }

    /// The sibling hashes, leaf-adjacent first.
    pub fn siblings(&self) -> &[Hash] {
        &self.0
    }

    /// Number of siblings (tree depth walked).
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// True for the zero-length proof of a single-leaf tree.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Encode as `0x`-prefixed concatenated hex, 32 bytes per sibling.
    pub fn to_hex(&self) -> String {
        let mut out = String::with_capacity(2 + self.0.len() * 64);
        out.push_str("0x");
        for sibling in &self.0 {
            out.push_str(&hex::encode(sibling));
        }
        out
    }

    /// Decode from the hex form produced by [`Proof::to_hex`].
    pub fn from_hex(text: &str) -> Result<Self, MerkleError> {
        let stripped = text.strip_prefix("0x").unwrap_or(text);
        let bytes = hex::decode(stripped).map_err(|_| MerkleError::MalformedBatch {
            reason: "proof hex contains non-hex digits".to_string(),
        })?;

        if bytes.len() % 32 != 0 {
            return Err(MerkleError::MalformedBatch {
                reason: format!("proof byte length {} is not a multiple of 32", bytes.len()),
            });
        }

        let siblings = bytes
            .chunks_exact(32)
            .map(|chunk| {
                let mut hash = [0u8; 32];
                hash.copy_from_slice(chunk);
                hash
            })
            .collect();

        Ok(Self(siblings))
    }
}

/// Combine two sibling hashes into their parent.
///
/// The pair is concatenated in ascending byte order before hashing, so the
/// result is independent of which side each node sat on in the tree. This
/// makes proofs insensitive to tree structure; it trades a small amount of
/// protection against second-preimage structuring for implementation
/// simplicity, and is an accepted design tradeoff that the ledger-side
/// verifier replicates exactly.
pub fn combine_hashes(a: &Hash, b: &Hash) -> Hash {
    let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
    let mut hasher = KeccakHasher::new();
    hasher.update(lo);
    hasher.update(hi);
    hasher.finalize()
}

/// Verify an inclusion proof for `address` against `root`.
///
/// Folds `keccak256(address)` through the sibling sequence with
/// [`combine_hashes`]; succeeds iff the final value equals `root`. An
/// empty proof is valid only when the leaf itself is the root.
pub fn verify_proof(address: &Address, proof: &Proof, root: &Hash) -> bool {
    let mut current = shared_crypto::hash_address(address);

    for sibling in proof.siblings() {
        current = combine_hashes(&current, sibling);
    }

    current == *root
}
