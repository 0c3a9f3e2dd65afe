//! # Batch Claim Flows
//!
//! Multi-recipient claims: aggregation, generated-skips, atomicity, and
//! idempotent re-runs against the in-memory authoritative ledger.

#[cfg(test)]
mod tests {
    use crate::integration::fixtures::*;

    use gd_01_merkle_commitment::{BatchProofCodec, MerkleError, MerkleTree, Proof};
    use gd_02_claim_engine::{
        orchestrate_batch, ClaimApi, ClaimError, StructuralError, SubmissionOutcome,
        ValidationError,
    };
    use shared_types::{Address, U256};

    fn packed_proofs(tree: &MerkleTree, recipients: &[Address]) -> Vec<u8> {
        let proofs: Vec<Proof> = recipients
            .iter()
            .map(|r| tree.proof_of(r).unwrap())
            .collect();
        BatchProofCodec::encode(&proofs)
    }

    // =========================================================================
    // PRECONDITIONS
    // =========================================================================

    #[test]
    fn test_batch_fails_if_not_started() {
        let (ledger, tree) = deploy_unstarted();
        advance_into_window(&ledger, 10);
        let batch = mock_accounts();
        let packed = packed_proofs(&tree, &batch);

        let err = ledger
            .execute_multi_generate(CALLER, &batch, &packed)
            .unwrap_err();
        assert!(matches!(
            err,
            ClaimError::Validation(ValidationError::GenerationNotStarted)
        ));
    }

    #[test]
    fn test_batch_fails_before_caller_window() {
        let (ledger, tree) = deploy_started();
        let batch = mock_accounts();
        let packed = packed_proofs(&tree, &batch);

        let err = ledger
            .execute_multi_generate(CALLER, &batch, &packed)
            .unwrap_err();
        assert!(matches!(
            err,
            ClaimError::Validation(ValidationError::OutsideCallerWindow { .. })
        ));
    }

    #[test]
    fn test_batch_fails_with_foreign_proofs() {
        let (ledger, tree) = deploy_started();
        advance_into_window(&ledger, 10);
        let batch = mock_accounts();
        // Proofs for the right recipients, shifted by one position.
        let mut rotated = batch.clone();
        rotated.rotate_left(1);
        let packed = packed_proofs(&tree, &rotated);

        let err = ledger
            .execute_multi_generate(CALLER, &batch, &packed)
            .unwrap_err();
        assert!(matches!(
            err,
            ClaimError::Validation(ValidationError::ProofInvalid { .. })
        ));
    }

    #[test]
    fn test_batch_fails_if_more_proofs_than_recipients() {
        let (ledger, tree) = deploy_started();
        advance_into_window(&ledger, 10);
        let batch = mock_accounts();
        let extra: Vec<Address> = mock_accounts();
        let packed = packed_proofs(&tree, &extra);

        let err = ledger
            .execute_multi_generate(CALLER, &batch[..9], &packed)
            .unwrap_err();
        assert!(matches!(
            err,
            ClaimError::Structural(StructuralError::Merkle(MerkleError::BatchCountMismatch {
                recipients: 9,
                proofs: 10
            }))
        ));
    }

    #[test]
    fn test_batch_fails_if_fewer_proofs_than_recipients() {
        let (ledger, tree) = deploy_started();
        advance_into_window(&ledger, 10);
        let batch = mock_accounts();
        let packed = packed_proofs(&tree, &batch[..9]);

        let err = ledger
            .execute_multi_generate(CALLER, &batch, &packed)
            .unwrap_err();
        assert!(matches!(
            err,
            ClaimError::Structural(StructuralError::Merkle(MerkleError::BatchCountMismatch {
                recipients: 10,
                proofs: 9
            }))
        ));
    }

    #[test]
    fn test_batch_fails_zero_proofs_nonzero_recipients() {
        let (ledger, tree) = deploy_started();
        advance_into_window(&ledger, 10);
        let batch = mock_accounts();
        let packed = packed_proofs(&tree, &[]);

        assert!(ledger.execute_multi_generate(CALLER, &batch, &packed).is_err());
    }

    #[test]
    fn test_batch_fails_nonzero_proofs_zero_recipients() {
        let (ledger, tree) = deploy_started();
        advance_into_window(&ledger, 10);
        let packed = packed_proofs(&tree, &mock_accounts());

        assert!(ledger.execute_multi_generate(CALLER, &[], &packed).is_err());
    }

    #[test]
    fn test_empty_batch_succeeds_with_zero_transfer() {
        let (ledger, tree) = deploy_started();
        advance_into_window(&ledger, 10);
        let packed = packed_proofs(&tree, &[]);

        let outcome = ledger.execute_multi_generate(CALLER, &[], &packed).unwrap();
        assert_eq!(outcome.claimed_count(), 0);
        assert_eq!(outcome.total_distributed(), U256::zero());
        assert_eq!(ledger.balance_of(&CALLER), U256::zero());
        assert_eq!(ledger.balance_of(&LEDGER), U256::from(TOTAL_GENESIS_TOKENS));
    }

    // =========================================================================
    // AGGREGATION
    // =========================================================================

    #[test]
    fn test_full_batch_pays_caller_per_recipient() {
        let (ledger, tree) = deploy_started();
        advance_into_window(&ledger, 40);
        let batch = mock_accounts();
        let packed = packed_proofs(&tree, &batch);

        let outcome = ledger.execute_multi_generate(CALLER, &batch, &packed).unwrap();

        let per_claim_caller = 400_000u64;
        assert_eq!(outcome.claimed_count(), 10);
        assert_eq!(
            ledger.balance_of(&CALLER),
            U256::from(10 * per_claim_caller)
        );
        for recipient in &batch {
            assert_eq!(
                ledger.balance_of(recipient),
                U256::from(TOKENS_PER_ALLOCATION - per_claim_caller)
            );
        }
        assert_eq!(ledger.balance_of(&LEDGER), U256::zero());
    }

    #[test]
    fn test_batch_leaves_unrelated_ledger_funds_untouched() {
        let (ledger, tree) = deploy_started();
        advance_into_window(&ledger, 40);
        // Extra funds beyond the genesis supply sit in the ledger account.
        ledger.mint(LEDGER, U256::from(10_000u64));

        let batch = mock_accounts();
        let packed = packed_proofs(&tree, &batch);
        ledger.execute_multi_generate(CALLER, &batch, &packed).unwrap();

        assert_eq!(ledger.balance_of(&LEDGER), U256::from(10_000u64));
    }

    // =========================================================================
    // PARTIAL STALENESS & IDEMPOTENCE
    // =========================================================================

    #[test]
    fn test_rerun_of_fully_generated_batch_is_noop() {
        let (ledger, tree) = deploy_started();
        advance_into_window(&ledger, 40);
        let batch = mock_accounts();
        let packed = packed_proofs(&tree, &batch);

        ledger.execute_multi_generate(CALLER, &batch, &packed).unwrap();
        let caller_balance = ledger.balance_of(&CALLER);

        let rerun = ledger.execute_multi_generate(CALLER, &batch, &packed).unwrap();
        assert_eq!(rerun.claimed_count(), 0);
        assert_eq!(rerun.skipped.len(), 10);
        assert_eq!(ledger.balance_of(&CALLER), caller_balance);
    }

    #[test]
    fn test_partially_generated_batch_claims_remainder() {
        let (ledger, tree) = deploy_started();
        advance_into_window(&ledger, 40);
        let batch = mock_accounts();

        // First 8 recipients claim through another actor.
        let first_eight = &batch[..8];
        let packed_eight = packed_proofs(&tree, first_eight);
        ledger
            .execute_multi_generate([0xDD; 20], first_eight, &packed_eight)
            .unwrap();

        // The full batch now only nets the caller the last 2 allocations.
        let packed_all = packed_proofs(&tree, &batch);
        let outcome = ledger.execute_multi_generate(CALLER, &batch, &packed_all).unwrap();

        assert_eq!(outcome.claimed_count(), 2);
        assert_eq!(outcome.skipped.len(), 8);
        assert_eq!(ledger.balance_of(&CALLER), U256::from(2 * 400_000u64));
    }

    #[test]
    fn test_duplicate_recipient_in_batch_claims_once() {
        let (ledger, tree) = deploy_started();
        advance_into_window(&ledger, 40);
        let recipient = mock_accounts()[0];
        let batch = vec![recipient, recipient];
        let packed = packed_proofs(&tree, &batch);

        let outcome = ledger.execute_multi_generate(CALLER, &batch, &packed).unwrap();
        assert_eq!(outcome.claimed_count(), 1);
        assert_eq!(outcome.skipped, vec![recipient]);
        assert_eq!(
            ledger.balance_of(&recipient),
            U256::from(TOKENS_PER_ALLOCATION - 400_000)
        );
    }

    // =========================================================================
    // SERVICE-LEVEL CHOREOGRAPHY
    // =========================================================================

    #[tokio::test]
    async fn test_service_batch_prediction_matches_execution() {
        init_test_logging();
        let (ledger, tree) = deploy_started();
        advance_into_window(&ledger, 40);
        let batch = mock_accounts();
        let (service, submitter) = service_for(CALLER, ledger.clone(), tree.clone());

        let (predicted, submission) = service.multi_generate(&batch).await.unwrap();
        assert!(matches!(submission, SubmissionOutcome::Confirmed { .. }));
        assert_eq!(submitter.submitted_calls().len(), 1);

        let packed = packed_proofs(&tree, &batch);
        let executed = ledger.execute_multi_generate(CALLER, &batch, &packed).unwrap();

        // The engine predicted what the ledger then did.
        assert_eq!(predicted.caller_token_amount, executed.caller_token_amount);
        assert_eq!(predicted.credits, executed.credits);
        assert!(executed.skipped.is_empty());
    }

    #[tokio::test]
    async fn test_service_batch_tolerates_race() {
        let (ledger, tree) = deploy_started();
        advance_into_window(&ledger, 40);
        let batch = mock_accounts();

        // Another actor claims the first recipient between batch
        // construction and validation.
        let proof = tree.proof_of(&batch[0]).unwrap();
        ledger.execute_generate(batch[0], batch[0], &proof).unwrap();

        let (service, _) = service_for(CALLER, ledger, tree);
        let (outcome, _) = service.multi_generate(&batch).await.unwrap();

        assert_eq!(outcome.claimed_count(), 9);
        assert_eq!(outcome.skipped, vec![batch[0]]);
    }

    // =========================================================================
    // PURE ORCHESTRATION AGAINST A SNAPSHOT
    // =========================================================================

    #[test]
    fn test_orchestrate_against_frozen_snapshot() {
        let (ledger, tree) = deploy_started();
        advance_into_window(&ledger, 50);
        let batch = mock_accounts();
        let proofs: Vec<Proof> = batch.iter().map(|r| tree.proof_of(r).unwrap()).collect();

        let snapshot = ledger.snapshot_for(&batch);
        let outcome = orchestrate_batch(&snapshot, CALLER, &batch, &proofs).unwrap();

        // 50% through the window: the split is an even halves.
        assert_eq!(outcome.caller_token_amount, U256::from(10 * 500_000u64));
        assert_eq!(outcome.total_distributed(), U256::from(TOTAL_GENESIS_TOKENS));
        // Orchestration alone moved nothing on the ledger.
        assert_eq!(ledger.balance_of(&LEDGER), U256::from(TOTAL_GENESIS_TOKENS));
    }
}
