//! # Domain Invariants
//!
//! The individual claim preconditions as checkable functions. The
//! validation pipeline sequences them; each returns the typed error its
//! check surfaces.

use shared_types::{Address, Hash, U256};

use super::entities::LedgerSnapshot;
use super::errors::ValidationError;

/// Invariant: the local tree covers exactly the ledger's recipient set.
pub fn invariant_recipient_count(local: usize, ledger: u64) -> Result<(), ValidationError> {
    if local as u64 != ledger {
        return Err(ValidationError::RecipientCountMismatch {
            local: local as u64,
            ledger,
        });
    }
    Ok(())
}

/// Invariant: the locally generated root matches the committed root.
pub fn invariant_root_match(local: Hash, ledger: Hash) -> Result<(), ValidationError> {
    if local != ledger {
        return Err(ValidationError::RootMismatch { local, ledger });
    }
    Ok(())
}

/// Invariant: the generation period has been opened.
pub fn invariant_started(started: bool) -> Result<(), ValidationError> {
    if !started {
        return Err(ValidationError::GenerationNotStarted);
    }
    Ok(())
}

/// Invariant: the ledger can fund the allocation being claimed.
pub fn invariant_ledger_balance(balance: U256, required: U256) -> Result<(), ValidationError> {
    if balance < required {
        return Err(ValidationError::InsufficientLedgerBalance { balance, required });
    }
    Ok(())
}

/// Invariant: the recipient's allocation has not been generated yet.
pub fn invariant_not_generated(
    snapshot: &LedgerSnapshot,
    recipient: Address,
) -> Result<(), ValidationError> {
    if snapshot.is_generated(&recipient) {
        return Err(ValidationError::AlreadyGenerated { recipient });
    }
    Ok(())
}

/// Invariant: third-party claims only inside the caller window.
///
/// Self-claims are exempt; a recipient may claim their own allocation at
/// any block after generation starts.
pub fn invariant_caller_window(
    recipient: Address,
    caller: Address,
    current_block: u64,
    start_block: u64,
) -> Result<(), ValidationError> {
    if caller != recipient && current_block < start_block {
        return Err(ValidationError::OutsideCallerWindow {
            current_block,
            start_block,
        });
    }
    Ok(())
}

/// Invariant: a split never mints or burns: the two legs sum exactly to
/// the allocation.
pub fn invariant_split_exact(
    recipient_amount: U256,
    caller_amount: U256,
    allocation: U256,
) -> bool {
    recipient_amount + caller_amount == allocation
}
