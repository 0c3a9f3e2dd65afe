//! # Claim Validation
//!
//! The ordered precondition pipeline for a single claim. Checks run in a
//! fixed order and short-circuit on the first failure; the order matters
//! for user-facing diagnostics, not correctness.
//!
//! On success the pipeline returns the predicted [`ClaimResult`] and the
//! proof to submit. It marks nothing as claimed; that is the
//! authoritative ledger's job, performed atomically when the claim
//! instruction executes there.

use gd_01_merkle_commitment::{verify_proof, MerkleError, MerkleTree, Proof};
use shared_types::{format_address, Address};

use crate::algorithms::vesting::split;
use crate::domain::{
    invariant_caller_window, invariant_ledger_balance, invariant_not_generated,
    invariant_recipient_count, invariant_root_match, invariant_started, ClaimError, ClaimResult,
    LedgerSnapshot, ValidationError,
};

/// Validate a claim for `recipient`, executed by `caller`, against one
/// consistent ledger snapshot.
///
/// Check order:
/// 1. local leaf count vs ledger recipient count
/// 2. local root vs ledger root
/// 3. recipient membership and proof verification (distinguishable
///    failures: absent from the tree vs hash mismatch)
/// 4. generation period started
/// 5. ledger balance covers one allocation
/// 6. allocation not already generated
/// 7. for third-party callers, the caller window is open
pub fn validate_claim(
    tree: &MerkleTree,
    snapshot: &LedgerSnapshot,
    recipient: Address,
    caller: Address,
) -> Result<(ClaimResult, Proof), ClaimError> {
    invariant_recipient_count(tree.num_leaves(), snapshot.total_genesis_recipients)?;
    invariant_root_match(tree.root(), snapshot.root)?;

    let proof = tree.proof_of(&recipient).map_err(|err| match err {
        MerkleError::AddressNotFound { address } => {
            ClaimError::from(ValidationError::ProofNotFound { recipient: address })
        }
        other => ClaimError::from(other),
    })?;

    if !verify_proof(&recipient, &proof, &snapshot.root) {
        return Err(ValidationError::ProofInvalid { recipient }.into());
    }

    invariant_started(snapshot.started)?;

    let tokens_per_allocation = snapshot.tokens_per_allocation();
    invariant_ledger_balance(snapshot.ledger_balance, tokens_per_allocation)?;
    invariant_not_generated(snapshot, recipient)?;
    invariant_caller_window(
        recipient,
        caller,
        snapshot.current_block,
        snapshot.caller_allocation_start_block,
    )?;

    let (recipient_token_amount, caller_token_amount) = split(
        tokens_per_allocation,
        recipient,
        caller,
        snapshot.current_block,
        snapshot.caller_allocation_start_block,
        snapshot.caller_allocation_end_block,
    );

    tracing::info!(
        recipient = %format_address(&recipient),
        caller = %format_address(&caller),
        recipient_tokens = %recipient_token_amount,
        caller_tokens = %caller_token_amount,
        block = snapshot.current_block,
        "claim validated"
    );

    Ok((
        ClaimResult {
            recipient,
            caller,
            recipient_token_amount,
            caller_token_amount,
            block: snapshot.current_block,
        },
        proof,
    ))
}
