//! # Domain Errors
//!
//! The claim error taxonomy. Three families, distinguishable by type:
//!
//! - [`StructuralError`]: malformed input; fatal, never retried.
//! - [`ValidationError`]: a precondition does not hold; actionable and
//!   non-retryable until ledger state changes.
//! - [`ExternalError`]: collaborator (ledger read / submission) failures
//!   outside the engine.
//!
//! Every variant carries the compared values so a caller can diagnose a
//! failure without re-deriving state.

use gd_01_merkle_commitment::MerkleError;
use shared_types::{Address, Hash, U256};
use thiserror::Error;

/// Precondition failures surfaced by the ordered claim checks.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ValidationError {
    /// The local tree and the ledger disagree on the recipient count.
    #[error("Local tree commits {local} recipients but ledger expects {ledger}")]
    RecipientCountMismatch {
        /// Leaves in the locally built tree.
        local: u64,
        /// Recipient count the ledger was deployed with.
        ledger: u64,
    },

    /// The locally generated root does not match the ledger's root.
    #[error(
        "Locally generated root 0x{} does not match ledger root 0x{}",
        hex::encode(.local),
        hex::encode(.ledger)
    )]
    RootMismatch {
        /// Root of the locally built tree.
        local: Hash,
        /// Root stored in the ledger.
        ledger: Hash,
    },

    /// The recipient is not part of the committed genesis set.
    #[error("Recipient 0x{} was not included in the genesis set", hex::encode(.recipient))]
    ProofNotFound {
        /// The absent recipient.
        recipient: Address,
    },

    /// The proof exists but does not hash up to the root.
    #[error("Merkle proof for recipient 0x{} failed verification", hex::encode(.recipient))]
    ProofInvalid {
        /// The recipient whose proof failed.
        recipient: Address,
    },

    /// The ledger's generation period has not been opened.
    #[error("Generation period has not started")]
    GenerationNotStarted,

    /// The ledger cannot fund the allocation.
    #[error("Ledger balance {balance} is below the required allocation {required}")]
    InsufficientLedgerBalance {
        /// Ledger token balance at snapshot time.
        balance: U256,
        /// Tokens the claim would draw.
        required: U256,
    },

    /// The recipient's allocation was already generated.
    #[error("Allocation for recipient 0x{} has already been generated", hex::encode(.recipient))]
    AlreadyGenerated {
        /// The already-claimed recipient.
        recipient: Address,
    },

    /// A third-party claim was attempted before the caller window opened.
    #[error("Caller claims open at block {start_block}, current block is {current_block}")]
    OutsideCallerWindow {
        /// Block at snapshot time.
        current_block: u64,
        /// First block of the caller window.
        start_block: u64,
    },
}

/// Malformed or inconsistent input. Always fatal.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum StructuralError {
    /// Parallel recipient/proof lists of different length.
    #[error("Recipient count {recipients} does not match proof count {proofs}")]
    CountMismatch {
        /// Supplied recipients.
        recipients: usize,
        /// Supplied proofs.
        proofs: usize,
    },

    /// A batch larger than the engine accepts.
    #[error("Batch of {size} recipients exceeds the configured maximum {max}")]
    BatchTooLarge {
        /// Supplied batch size.
        size: usize,
        /// Configured maximum.
        max: usize,
    },

    /// Tree or codec failure from the commitment layer.
    #[error(transparent)]
    Merkle(#[from] MerkleError),
}

/// Collaborator failures outside the engine.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ExternalError {
    /// A ledger accessor failed.
    #[error("Ledger read failed: {reason}")]
    LedgerRead {
        /// Underlying failure description.
        reason: String,
    },

    /// The signer/broadcaster rejected or lost the submission.
    #[error("Claim submission failed: {reason}")]
    Submission {
        /// Underlying failure description.
        reason: String,
    },
}

/// Top-level claim error: the three families, distinguishable by variant.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ClaimError {
    /// A precondition does not hold.
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// Malformed input.
    #[error(transparent)]
    Structural(#[from] StructuralError),

    /// Collaborator failure.
    #[error(transparent)]
    External(#[from] ExternalError),
}

impl From<MerkleError> for ClaimError {
    fn from(err: MerkleError) -> Self {
        Self::Structural(StructuralError::Merkle(err))
    }
}
