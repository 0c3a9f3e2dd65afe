//! # Inbound Ports
//!
//! The API the claim engine exposes to its drivers (CLI, tooling).

use async_trait::async_trait;
use shared_types::Address;

use crate::domain::{BatchClaimOutcome, ClaimError, ClaimResult};
use crate::ports::outbound::SubmissionOutcome;

/// Claim engine API - inbound port.
#[async_trait]
pub trait ClaimApi {
    /// Run the full validation pipeline for one recipient without
    /// submitting anything.
    async fn validate(&self, recipient: Address) -> Result<ClaimResult, ClaimError>;

    /// Validate and submit a single-recipient claim, returning the
    /// predicted split and the submission's terminal outcome.
    async fn generate(
        &self,
        recipient: Address,
    ) -> Result<(ClaimResult, SubmissionOutcome), ClaimError>;

    /// Validate and submit a batch claim over many recipients.
    async fn multi_generate(
        &self,
        recipients: &[Address],
    ) -> Result<(BatchClaimOutcome, SubmissionOutcome), ClaimError>;
}
