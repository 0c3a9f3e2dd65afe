//! # Batch Proof Codec
//!
//! Packs many variable-length inclusion proofs into one transportable
//! byte string, for claims covering multiple recipients in one pass.
//!
//! ## Wire layout
//!
//! ```text
//! u32 (BE) proof count
//! repeated per proof:
//!   u32 (BE) sibling count
//!   sibling hashes, 32 bytes each
//! ```
//!
//! The layout preserves each proof's exact sibling sequence and length,
//! so `decode(encode(x)) == x` for every valid proof set.

use shared_types::Hash;

use crate::errors::MerkleError;
use crate::proof::Proof;

const COUNT_WIDTH: usize = 4;
const HASH_WIDTH: usize = 32;

/// Packs and unpacks proof batches.
pub struct BatchProofCodec;

impl BatchProofCodec {
    /// Pack proofs into the length-prefixed wire form.
    pub fn encode(proofs: &[Proof]) -> Vec<u8> {
        let payload: usize = proofs
            .iter()
            .map(|p| COUNT_WIDTH + p.len() * HASH_WIDTH)
            .sum();
        let mut out = Vec::with_capacity(COUNT_WIDTH + payload);

        out.extend_from_slice(&(proofs.len() as u32).to_be_bytes());
        for proof in proofs {
            out.extend_from_slice(&(proof.len() as u32).to_be_bytes());
            for sibling in proof.siblings() {
                out.extend_from_slice(sibling);
            }
        }

        out
    }

    /// Unpack a wire-form batch back into individual proofs.
    ///
    /// Fails with [`MerkleError::MalformedBatch`] on truncation or
    /// trailing bytes.
    pub fn decode(bytes: &[u8]) -> Result<Vec<Proof>, MerkleError> {
        let mut cursor = Cursor::new(bytes);

        let count = cursor.read_u32()? as usize;
        let mut proofs = Vec::with_capacity(count);

        for _ in 0..count {
            let siblings_len = cursor.read_u32()? as usize;
            let mut siblings: Vec<Hash> = Vec::with_capacity(siblings_len);
            for _ in 0..siblings_len {
                siblings.push(cursor.read_hash()?);
            }
            proofs.push(Proof::new(siblings));
        }

        if !cursor.is_exhausted() {
            return Err(MerkleError::MalformedBatch {
                reason: format!("{} trailing bytes after last proof", cursor.remaining()),
            });
        }

        Ok(proofs)
    }

    /// Decode a batch that must hold exactly one proof per recipient.
    ///
    /// Fails with [`MerkleError::BatchCountMismatch`] when the decoded
    /// count disagrees with `recipients`.
    pub fn decode_for_recipients(
        bytes: &[u8],
        recipients: usize,
    ) -> Result<Vec<Proof>, MerkleError> {
        let proofs = Self::decode(bytes)?;

        if proofs.len() != recipients {
            return Err(MerkleError::BatchCountMismatch {
                recipients,
                proofs: proofs.len(),
            });
        }

        Ok(proofs)
    }

    /// Pack proofs and render as `0x`-prefixed hex.
    pub fn encode_hex(proofs: &[Proof]) -> String {
        format!("0x{}", hex::encode(Self::encode(proofs)))
    }

    /// Decode the hex form produced by [`BatchProofCodec::encode_hex`].
    pub fn decode_hex(text: &str) -> Result<Vec<Proof>, MerkleError> {
        let stripped = text.strip_prefix("0x").unwrap_or(text);
        let bytes = hex::decode(stripped).map_err(|_| MerkleError::MalformedBatch {
            reason: "batch hex contains non-hex digits".to_string(),
        })?;
        Self::decode(&bytes)
    }
}

/// Minimal forward-only reader over the wire form.
struct Cursor<'a> {
    bytes: &'a [u8],
    pos: usize,
}

impl<'a> Cursor<'a> {
    fn new(bytes: &'a [u8]) -> Self {
        Self { bytes, pos: 0 }
    }

    fn take(&mut self, n: usize) -> Result<&'a [u8], MerkleError> {
        let end = self.pos.checked_add(n).ok_or_else(|| MerkleError::MalformedBatch {
            reason: "length overflow".to_string(),
        })?;
        if end > self.bytes.len() {
            return Err(MerkleError::MalformedBatch {
                reason: format!(
                    "truncated: needed {} bytes at offset {}, only {} remain",
                    n,
                    self.pos,
                    self.bytes.len() - self.pos
                ),
            });
        }
        let slice = &self.bytes[self.pos..end];
        self.pos = end;
        Ok(slice)
    }

    fn read_u32(&mut self) -> Result<u32, MerkleError> {
        let bytes = self.take(COUNT_WIDTH)?;
        let mut buf = [0u8; COUNT_WIDTH];
        buf.copy_from_slice(bytes);
        Ok(u32::from_be_bytes(buf))
    }

    fn read_hash(&mut self) -> Result<Hash, MerkleError> {
        let bytes = self.take(HASH_WIDTH)?;
        let mut hash = [0u8; HASH_WIDTH];
        hash.copy_from_slice(bytes);
        Ok(hash)
    }

    fn is_exhausted(&self) -> bool {
        self.pos == self.bytes.len()
    }

    fn remaining(&self) -> usize {
        self.bytes.len() - self.pos
    }
}
