//! # Claim Service
//!
//! Application service wiring the local tree, ledger snapshots, the
//! validation pipeline, and the submitter into one claim workflow.
//!
//! All collaborators are injected at construction time; the service
//! holds no lazily initialized handles and no hidden caches.

use std::sync::Arc;

use async_trait::async_trait;
use shared_types::{format_address, Address};

use gd_01_merkle_commitment::{BatchProofCodec, MerkleError, MerkleTree, Proof};

use crate::algorithms::batch::orchestrate_batch;
use crate::algorithms::validation::validate_claim;
use crate::config::EngineConfig;
use crate::domain::{
    BatchClaimOutcome, ClaimError, ClaimResult, StructuralError, ValidationError,
};
use crate::ports::inbound::ClaimApi;
use crate::ports::outbound::{
    fetch_snapshot, ClaimCall, ClaimSubmitter, LedgerReader, SubmissionOutcome,
};

/// Claim Service - validates claims and hands instructions to the
/// submitter.
pub struct ClaimService<L: LedgerReader, S: ClaimSubmitter> {
    /// Configuration.
    config: EngineConfig,
    /// The account executing claims.
    caller: Address,
    /// Local tree over the recipient list snapshot.
    tree: MerkleTree,
    /// Authoritative ledger reader.
    ledger: Arc<L>,
    /// Transaction signer/broadcaster.
    submitter: Arc<S>,
}

impl<L: LedgerReader, S: ClaimSubmitter> ClaimService<L, S> {
    /// Create a new claim service. Every collaborator is constructed
    /// up front.
    pub fn new(
        config: EngineConfig,
        caller: Address,
        tree: MerkleTree,
        ledger: Arc<L>,
        submitter: Arc<S>,
    ) -> Self {
        Self {
            config,
            caller,
            tree,
            ledger,
            submitter,
        }
    }

    /// The local recipient tree.
    pub fn tree(&self) -> &MerkleTree {
        &self.tree
    }

    /// The configured caller account.
    pub fn caller(&self) -> Address {
        self.caller
    }

    /// Derive and pack the proofs for a batch of recipients.
    pub fn batch_proofs(&self, recipients: &[Address]) -> Result<Vec<u8>, ClaimError> {
        let proofs = self.derive_proofs(recipients)?;
        Ok(BatchProofCodec::encode(&proofs))
    }

    fn derive_proofs(&self, recipients: &[Address]) -> Result<Vec<Proof>, ClaimError> {
        recipients
            .iter()
            .map(|recipient| {
                self.tree.proof_of(recipient).map_err(|err| match err {
                    MerkleError::AddressNotFound { address } => {
                        ClaimError::from(ValidationError::ProofNotFound { recipient: address })
                    }
                    other => ClaimError::from(other),
                })
            })
            .collect()
    }

    fn check_batch_size(&self, size: usize) -> Result<(), ClaimError> {
        if size > self.config.max_batch_size {
            return Err(StructuralError::BatchTooLarge {
                size,
                max: self.config.max_batch_size,
            }
            .into());
        }
        Ok(())
    }

    async fn submit_and_confirm(
        &self,
        call: ClaimCall,
    ) -> Result<SubmissionOutcome, ClaimError> {
        let submitted = self.submitter.submit(call).await?;
        tracing::info!(handle = %submitted.handle, "claim instruction submitted");

        let outcome = self.submitter.confirm(&submitted).await?;
        if let SubmissionOutcome::Failed { reason } = &outcome {
            tracing::warn!(handle = %submitted.handle, reason = %reason, "submission failed");
        }
        Ok(outcome)
    }

    /// Validate and submit a batch claim from a pre-packed proof
    /// encoding (as produced by [`ClaimService::batch_proofs`] or an
    /// external prover).
    pub async fn multi_generate_packed(
        &self,
        recipients: &[Address],
        packed_proofs: &[u8],
    ) -> Result<(BatchClaimOutcome, SubmissionOutcome), ClaimError> {
        self.check_batch_size(recipients.len())?;

        let proofs = BatchProofCodec::decode_for_recipients(packed_proofs, recipients.len())?;
        let snapshot = fetch_snapshot(self.ledger.as_ref(), recipients).await?;
        let outcome = orchestrate_batch(&snapshot, self.caller, recipients, &proofs)?;

        let call = ClaimCall::batch(self.ledger.ledger_address(), recipients, packed_proofs);
        let submission = self.submit_and_confirm(call).await?;

        Ok((outcome, submission))
    }
}

#[async_trait]
impl<L: LedgerReader, S: ClaimSubmitter> ClaimApi for ClaimService<L, S> {
    async fn validate(&self, recipient: Address) -> Result<ClaimResult, ClaimError> {
        let snapshot = fetch_snapshot(self.ledger.as_ref(), &[recipient]).await?;
        let (result, _proof) = validate_claim(&self.tree, &snapshot, recipient, self.caller)?;
        Ok(result)
    }

    async fn generate(
        &self,
        recipient: Address,
    ) -> Result<(ClaimResult, SubmissionOutcome), ClaimError> {
        let snapshot = fetch_snapshot(self.ledger.as_ref(), &[recipient]).await?;
        let (result, proof) = validate_claim(&self.tree, &snapshot, recipient, self.caller)?;

        tracing::info!(
            recipient = %format_address(&recipient),
            caller = %format_address(&self.caller),
            "submitting claim"
        );

        let call = ClaimCall::single(self.ledger.ledger_address(), recipient, &proof);
        let submission = self.submit_and_confirm(call).await?;

        Ok((result, submission))
    }

    async fn multi_generate(
        &self,
        recipients: &[Address],
    ) -> Result<(BatchClaimOutcome, SubmissionOutcome), ClaimError> {
        self.check_batch_size(recipients.len())?;

        let proofs = self.derive_proofs(recipients)?;
        let snapshot = fetch_snapshot(self.ledger.as_ref(), recipients).await?;
        let outcome = orchestrate_batch(&snapshot, self.caller, recipients, &proofs)?;

        let packed = BatchProofCodec::encode(&proofs);
        let call = ClaimCall::batch(self.ledger.ledger_address(), recipients, &packed);
        let submission = self.submit_and_confirm(call).await?;

        Ok((outcome, submission))
    }
}
