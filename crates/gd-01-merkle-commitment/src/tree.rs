//! # Merkle Tree Construction
//!
//! Builds the committed recipient set: dedupe, hash, sort, then pairwise
//! layers up to the root.
//!
//! # Determinism
//!
//! For a fixed address set the root is bit-identical across runs and
//! across implementations, regardless of input order. Everything else in
//! the distribution scheme leans on this property.

use std::collections::BTreeSet;

use shared_crypto::hash_address;
use shared_types::{format_hash, parse_address, Address, Hash, ZERO_HASH};

use crate::errors::MerkleError;
use crate::proof::{combine_hashes, Proof};

/// Canonical root of the tree over the empty address set.
///
/// An explicit placeholder value, not an error: building from no
/// addresses succeeds, and only proving membership against it fails.
pub const EMPTY_TREE_ROOT: Hash = ZERO_HASH;

/// A Merkle tree over a deduplicated, sorted set of address leaves.
///
/// Layer 0 is the sorted leaf set; each subsequent layer halves the
/// previous (rounded up) until a single node remains. An odd layer's
/// unpaired tail propagates unchanged.
#[derive(Clone, Debug)]
pub struct MerkleTree {
    layers: Vec<Vec<Hash>>,
}

impl MerkleTree {
    /// Build a tree from an address collection.
    ///
    /// Duplicates are collapsed by raw address value before hashing, so
    /// the committed set has set semantics.
    pub fn new<I>(addresses: I) -> Self
    where
        I: IntoIterator<Item = Address>,
    {
        let unique: BTreeSet<Address> = addresses.into_iter().collect();

        let mut leaves: Vec<Hash> = unique.iter().map(hash_address).collect();
        leaves.sort_unstable();

        Self {
            layers: Self::build_layers(leaves),
        }
    }

    /// Build a tree from textual address records.
    ///
    /// Records are trimmed; empty records are discarded; hex case is
    /// canonicalized by parsing into binary. Malformed records fail the
    /// whole build rather than being skipped.
    pub fn from_text_records<'a, I>(records: I) -> Result<Self, MerkleError>
    where
        I: IntoIterator<Item = &'a str>,
    {
        let mut addresses = Vec::new();

        for record in records {
            let record = record.trim();
            if record.is_empty() {
                continue;
            }
            addresses.push(parse_address(record)?);
        }

        Ok(Self::new(addresses))
    }

    fn build_layers(leaves: Vec<Hash>) -> Vec<Vec<Hash>> {
        let mut layers = vec![leaves];

        while layers
            .last()
            .map(|layer| layer.len() > 1)
            .unwrap_or(false)
        {
            let prev = &layers[layers.len() - 1];
            let mut next = Vec::with_capacity((prev.len() + 1) / 2);

            for pair in prev.chunks(2) {
                match pair {
                    [left, right] => next.push(combine_hashes(left, right)),
                    // Unpaired tail carries up unchanged.
                    [single] => next.push(*single),
                    _ => unreachable!("chunks(2) yields 1- or 2-element slices"),
                }
            }

            layers.push(next);
        }

        layers
    }

    /// The root commitment. The empty tree yields [`EMPTY_TREE_ROOT`].
    pub fn root(&self) -> Hash {
        match self.layers.last().and_then(|layer| layer.first()) {
            Some(root) => *root,
            None => EMPTY_TREE_ROOT,
        }
    }

    /// The root as `0x`-prefixed lowercase hex.
    pub fn hex_root(&self) -> String {
        format_hash(&self.root())
    }

    /// Number of committed leaves (unique addresses).
    pub fn num_leaves(&self) -> usize {
        self.layers.first().map(Vec::len).unwrap_or(0)
    }

    /// True when no addresses were committed.
    pub fn is_empty(&self) -> bool {
        self.num_leaves() == 0
    }

    /// Whether the address's leaf is part of the committed set.
    pub fn contains(&self, address: &Address) -> bool {
        self.leaf_index(address).is_some()
    }

    fn leaf_index(&self, address: &Address) -> Option<usize> {
        let leaf = hash_address(address);
        self.layers
            .first()
            .and_then(|leaves| leaves.binary_search(&leaf).ok())
    }

    /// Generate the inclusion proof for `address`.
    ///
    /// Walks layers bottom-up collecting each pair sibling (`idx ^ 1`);
    /// an out-of-range sibling (odd tail) contributes no element. Fails
    /// with [`MerkleError::EmptyTree`] on the sentinel tree and
    /// [`MerkleError::AddressNotFound`] when the leaf is absent.
    pub fn proof_of(&self, address: &Address) -> Result<Proof, MerkleError> {
        if self.is_empty() {
            return Err(MerkleError::EmptyTree);
        }

        let mut idx = self
            .leaf_index(address)
            .ok_or(MerkleError::AddressNotFound { address: *address })?;

        let mut siblings = Vec::new();

        // The last layer is the root; it has no sibling to contribute.
        for layer in &self.layers[..self.layers.len() - 1] {
            let sibling_idx = idx ^ 1;
            if sibling_idx < layer.len() {
                siblings.push(layer[sibling_idx]);
            }
            idx /= 2;
        }

        Ok(Proof::new(siblings))
    }
}
