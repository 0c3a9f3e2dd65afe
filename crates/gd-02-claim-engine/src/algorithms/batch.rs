//! # Batch Claim Orchestration
//!
//! Drives the per-recipient checks and the vesting split across many
//! recipients against one shared ledger snapshot, aggregating the
//! caller's total share.
//!
//! Recipients whose allocation is already generated are skipped silently;
//! this tolerates races where another actor claims between batch
//! construction and submission, and makes re-running a batch idempotent.
//! An invalid proof for a non-skipped recipient fails the whole batch.

use gd_01_merkle_commitment::{verify_proof, Proof};
use shared_types::{format_address, Address};
use std::collections::HashSet;

use crate::algorithms::vesting::split;
use crate::domain::{
    invariant_ledger_balance, invariant_started, BatchClaimOutcome, ClaimError, LedgerSnapshot,
    RecipientCredit, StructuralError, ValidationError,
};

/// Orchestrate a batch claim for `caller` over parallel recipient/proof
/// lists against one consistent snapshot.
///
/// Contract:
/// - the lists must be the same length (`CountMismatch` otherwise); both
///   empty is valid and yields an all-zero outcome
/// - the batch path is caller-executed, so `started` and the caller
///   window gate the whole batch
/// - duplicates are not deduplicated: the first occurrence claims, later
///   occurrences take the generated-skip path
/// - every split uses the snapshot's single `current_block`
pub fn orchestrate_batch(
    snapshot: &LedgerSnapshot,
    caller: Address,
    recipients: &[Address],
    proofs: &[Proof],
) -> Result<BatchClaimOutcome, ClaimError> {
    if recipients.len() != proofs.len() {
        return Err(StructuralError::CountMismatch {
            recipients: recipients.len(),
            proofs: proofs.len(),
        }
        .into());
    }

    let mut outcome = BatchClaimOutcome::empty(caller, snapshot.current_block);

    if recipients.is_empty() {
        return Ok(outcome);
    }

    invariant_started(snapshot.started)?;

    if snapshot.current_block < snapshot.caller_allocation_start_block {
        return Err(ValidationError::OutsideCallerWindow {
            current_block: snapshot.current_block,
            start_block: snapshot.caller_allocation_start_block,
        }
        .into());
    }

    let tokens_per_allocation = snapshot.tokens_per_allocation();
    let mut remaining_balance = snapshot.ledger_balance;
    // Tracks recipients accepted earlier in this batch, so a duplicate
    // entry sees the same generated-skip the ledger would apply.
    let mut accepted: HashSet<Address> = HashSet::new();

    for (recipient, proof) in recipients.iter().zip(proofs) {
        if snapshot.is_generated(recipient) || accepted.contains(recipient) {
            tracing::warn!(
                recipient = %format_address(recipient),
                "allocation already generated, skipping"
            );
            outcome.skipped.push(*recipient);
            continue;
        }

        if !verify_proof(recipient, proof, &snapshot.root) {
            return Err(ValidationError::ProofInvalid {
                recipient: *recipient,
            }
            .into());
        }

        invariant_ledger_balance(remaining_balance, tokens_per_allocation)?;
        remaining_balance = remaining_balance - tokens_per_allocation;

        let (recipient_amount, caller_amount) = split(
            tokens_per_allocation,
            *recipient,
            caller,
            snapshot.current_block,
            snapshot.caller_allocation_start_block,
            snapshot.caller_allocation_end_block,
        );

        outcome.caller_token_amount = outcome.caller_token_amount + caller_amount;
        outcome.credits.push(RecipientCredit {
            recipient: *recipient,
            amount: recipient_amount,
        });
        accepted.insert(*recipient);
    }

    tracing::info!(
        caller = %format_address(&caller),
        claimed = outcome.claimed_count(),
        skipped = outcome.skipped.len(),
        caller_tokens = %outcome.caller_token_amount,
        block = outcome.block,
        "batch claim orchestrated"
    );

    Ok(outcome)
}
