//! # Outbound Ports
//!
//! Traits for the engine's external collaborators: the authoritative
//! ledger (read-only) and the transaction signer/broadcaster (an opaque
//! sink for claim instructions).

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use shared_types::{Address, Hash, U256};
use std::collections::HashSet;

use gd_01_merkle_commitment::Proof;

use crate::domain::{ExternalError, LedgerSnapshot};

/// Read-only accessors over the authoritative ledger - outbound port.
///
/// One accessor per piece of contract state; [`fetch_snapshot`] composes
/// them into a consistent [`LedgerSnapshot`] for a validation pass.
#[async_trait]
pub trait LedgerReader: Send + Sync {
    /// The Merkle root the distribution was deployed with.
    async fn genesis_root(&self) -> Result<Hash, ExternalError>;

    /// Total token supply of the distribution.
    async fn total_genesis_tokens(&self) -> Result<U256, ExternalError>;

    /// Number of committed recipients.
    async fn total_genesis_recipients(&self) -> Result<u64, ExternalError>;

    /// Snapshot eligibility threshold.
    async fn balance_threshold(&self) -> Result<U256, ExternalError>;

    /// Block the recipient snapshot was taken at.
    async fn genesis_block(&self) -> Result<u64, ExternalError>;

    /// First block of the caller allocation window.
    async fn caller_allocation_start_block(&self) -> Result<u64, ExternalError>;

    /// End block of the caller allocation window ramp.
    async fn caller_allocation_end_block(&self) -> Result<u64, ExternalError>;

    /// Whether the generation period has been opened.
    async fn started(&self) -> Result<bool, ExternalError>;

    /// Whether the recipient's allocation has been generated.
    async fn generated(&self, recipient: Address) -> Result<bool, ExternalError>;

    /// Current block height.
    async fn current_block(&self) -> Result<u64, ExternalError>;

    /// Token balance of an account.
    async fn token_balance(&self, account: Address) -> Result<U256, ExternalError>;

    /// The ledger's own account address (claim instruction target).
    fn ledger_address(&self) -> Address;
}

/// Assemble a consistent snapshot for one validation pass.
///
/// The `generated` flags are materialized for `recipients` only, since
/// the ledger exposes per-address lookups. Explicit construction, no
/// caching: every pass fetches fresh.
pub async fn fetch_snapshot<L>(
    reader: &L,
    recipients: &[Address],
) -> Result<LedgerSnapshot, ExternalError>
where
    L: LedgerReader + ?Sized,
{
    let mut generated = HashSet::new();
    for recipient in recipients {
        if reader.generated(*recipient).await? {
            generated.insert(*recipient);
        }
    }

    let ledger_balance = reader.token_balance(reader.ledger_address()).await?;

    Ok(LedgerSnapshot {
        root: reader.genesis_root().await?,
        total_genesis_tokens: reader.total_genesis_tokens().await?,
        total_genesis_recipients: reader.total_genesis_recipients().await?,
        balance_threshold: reader.balance_threshold().await?,
        genesis_block: reader.genesis_block().await?,
        caller_allocation_start_block: reader.caller_allocation_start_block().await?,
        caller_allocation_end_block: reader.caller_allocation_end_block().await?,
        started: reader.started().await?,
        generated,
        ledger_balance,
        current_block: reader.current_block().await?,
    })
}

/// A claim instruction for the external signer/broadcaster.
///
/// The payload is target-specific call data; the engine treats it as
/// opaque bytes whose exact wire format belongs to the ledger interface.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct ClaimCall {
    /// The ledger account the instruction executes against.
    pub target: Address,
    /// Encoded call data.
    pub payload: Vec<u8>,
}

impl ClaimCall {
    /// Encode a single-recipient claim: recipient bytes then the proof's
    /// sibling sequence.
    pub fn single(target: Address, recipient: Address, proof: &Proof) -> Self {
        let mut payload = Vec::with_capacity(20 + proof.len() * 32);
        payload.extend_from_slice(&recipient);
        for sibling in proof.siblings() {
            payload.extend_from_slice(sibling);
        }
        Self { target, payload }
    }

    /// Encode a batch claim: recipient count, recipient bytes, then the
    /// packed proof encoding.
    pub fn batch(target: Address, recipients: &[Address], packed_proofs: &[u8]) -> Self {
        let mut payload =
            Vec::with_capacity(4 + recipients.len() * 20 + packed_proofs.len());
        payload.extend_from_slice(&(recipients.len() as u32).to_be_bytes());
        for recipient in recipients {
            payload.extend_from_slice(recipient);
        }
        payload.extend_from_slice(packed_proofs);
        Self { target, payload }
    }
}

/// Handle returned as soon as a claim instruction is accepted for
/// broadcast.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct Submitted {
    /// Opaque submission handle (transaction hash or equivalent).
    pub handle: String,
}

/// Terminal result of a submission, obtained by polling after
/// [`Submitted`].
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub enum SubmissionOutcome {
    /// The instruction executed on the ledger.
    Confirmed {
        /// Block the instruction landed in.
        block: u64,
    },
    /// The instruction was rejected or dropped.
    Failed {
        /// Ledger- or transport-level reason.
        reason: String,
    },
}

/// Transaction signer/broadcaster - outbound port.
///
/// Two explicit, sequential results: `submit` hands back a handle, and
/// `confirm` resolves it by blocking or polling. No callbacks.
#[async_trait]
pub trait ClaimSubmitter: Send + Sync {
    /// Sign and broadcast a claim instruction.
    async fn submit(&self, call: ClaimCall) -> Result<Submitted, ExternalError>;

    /// Resolve a previous submission to its terminal outcome.
    async fn confirm(&self, submitted: &Submitted) -> Result<SubmissionOutcome, ExternalError>;
}

// =============================================================================
// Mock Implementations for Testing
// =============================================================================

/// Mock submitter for testing.
///
/// Records every submitted call and resolves confirmations according to
/// its toggles.
#[derive(Default)]
pub struct MockSubmitter {
    /// Fail `submit` outright?
    pub fail_submit: bool,
    /// Resolve confirmations as `Failed`?
    pub fail_confirm: bool,
    pub(crate) calls: parking_lot::Mutex<Vec<ClaimCall>>,
}

impl MockSubmitter {
    /// A submitter that accepts and confirms everything.
    pub fn new() -> Self {
        Self::default()
    }

    /// Calls submitted so far.
    pub fn submitted_calls(&self) -> Vec<ClaimCall> {
        self.calls.lock().clone()
    }
}

#[async_trait]
impl ClaimSubmitter for MockSubmitter {
    async fn submit(&self, call: ClaimCall) -> Result<Submitted, ExternalError> {
        if self.fail_submit {
            return Err(ExternalError::Submission {
                reason: "mock submit failure".to_string(),
            });
        }

        let mut calls = self.calls.lock();
        calls.push(call);
        Ok(Submitted {
            handle: format!("mock-submission-{}", calls.len()),
        })
    }

    async fn confirm(&self, _submitted: &Submitted) -> Result<SubmissionOutcome, ExternalError> {
        if self.fail_confirm {
            return Ok(SubmissionOutcome::Failed {
                reason: "mock revert".to_string(),
            });
        }
        Ok(SubmissionOutcome::Confirmed { block: 0 })
    }
}
