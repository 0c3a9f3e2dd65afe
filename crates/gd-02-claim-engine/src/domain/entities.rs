//! # Domain Entities
//!
//! Immutable value types for claim validation and batching.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};
use shared_types::{Address, Hash, U256};

/// Read-only view of the ledger state, fetched at a single point in time.
///
/// A snapshot is consistent for the duration of one validation pass;
/// nothing in the engine re-reads the ledger mid-pass. The `generated`
/// set covers the recipients the snapshot was fetched for.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct LedgerSnapshot {
    /// Merkle root the ledger committed to at deployment.
    pub root: Hash,
    /// Total token supply of the distribution.
    pub total_genesis_tokens: U256,
    /// Number of committed recipients.
    pub total_genesis_recipients: u64,
    /// Snapshot eligibility threshold (recorded state only).
    pub balance_threshold: U256,
    /// Block the recipient snapshot was taken at.
    pub genesis_block: u64,
    /// First block of the caller allocation window.
    pub caller_allocation_start_block: u64,
    /// Last block of the caller allocation window ramp.
    pub caller_allocation_end_block: u64,
    /// Whether the generation period has been opened.
    pub started: bool,
    /// Recipients whose allocation is already generated, among those the
    /// snapshot was fetched for.
    pub generated: HashSet<Address>,
    /// Token balance held by the ledger at snapshot time.
    pub ledger_balance: U256,
    /// Block height at snapshot time.
    pub current_block: u64,
}

impl LedgerSnapshot {
    /// Fixed per-recipient allocation: `total / recipients`, floored.
    pub fn tokens_per_allocation(&self) -> U256 {
        if self.total_genesis_recipients == 0 {
            return U256::zero();
        }
        self.total_genesis_tokens / U256::from(self.total_genesis_recipients)
    }

    /// Whether the recipient's allocation was generated as of the snapshot.
    pub fn is_generated(&self, recipient: &Address) -> bool {
        self.generated.contains(recipient)
    }
}

/// Caller share of one allocation as an exact fraction in [0, 1].
///
/// Kept as an integer pair so no floating point enters token arithmetic.
/// Invariant: `elapsed <= window` and `window > 0`.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct ShareRatio {
    /// Blocks elapsed inside the caller window, clamped to the window.
    pub elapsed: u64,
    /// Caller window length in blocks.
    pub window: u64,
}

impl ShareRatio {
    /// The zero share (before the window opens).
    pub fn zero(window: u64) -> Self {
        Self { elapsed: 0, window }
    }

    /// The full share (at or past the window end).
    pub fn full(window: u64) -> Self {
        Self {
            elapsed: window,
            window,
        }
    }

    /// True before the window opens.
    pub fn is_zero(&self) -> bool {
        self.elapsed == 0
    }

    /// True at or past the window end.
    pub fn is_full(&self) -> bool {
        self.elapsed == self.window
    }
}

/// Outcome of one validated claim. Never mutated once produced; this is
/// the terminal artifact handed to the external signer/broadcaster.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct ClaimResult {
    /// The recipient whose allocation is claimed.
    pub recipient: Address,
    /// The account executing the claim.
    pub caller: Address,
    /// Tokens owed to the recipient.
    pub recipient_token_amount: U256,
    /// Tokens owed to the caller for executing the claim.
    pub caller_token_amount: U256,
    /// Block the split was computed at.
    pub block: u64,
}

impl ClaimResult {
    /// The full allocation: recipient and caller legs summed.
    pub fn total(&self) -> U256 {
        self.recipient_token_amount + self.caller_token_amount
    }

    /// Whether the recipient claimed for themselves.
    pub fn is_self_claim(&self) -> bool {
        self.recipient == self.caller
    }
}

/// One recipient's credit inside a batch claim.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct RecipientCredit {
    /// The credited recipient.
    pub recipient: Address,
    /// The recipient's leg of the split.
    pub amount: U256,
}

/// Aggregate outcome of a batch claim.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct BatchClaimOutcome {
    /// The account executing the batch.
    pub caller: Address,
    /// Aggregate caller share across all accepted recipients.
    pub caller_token_amount: U256,
    /// Individual recipient credits, in input order.
    pub credits: Vec<RecipientCredit>,
    /// Recipients skipped because their allocation was already generated.
    pub skipped: Vec<Address>,
    /// The shared block all splits were computed at.
    pub block: u64,
}

impl BatchClaimOutcome {
    /// An outcome with no credits and no skips.
    pub fn empty(caller: Address, block: u64) -> Self {
        Self {
            caller,
            caller_token_amount: U256::zero(),
            credits: Vec::new(),
            skipped: Vec::new(),
            block,
        }
    }

    /// Number of allocations the batch would generate.
    pub fn claimed_count(&self) -> usize {
        self.credits.len()
    }

    /// Total tokens the batch would move: all credits plus the caller leg.
    pub fn total_distributed(&self) -> U256 {
        self.credits
            .iter()
            .fold(self.caller_token_amount, |acc, credit| acc + credit.amount)
    }
}
