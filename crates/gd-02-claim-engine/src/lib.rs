//! # GD-02 Claim Engine
//!
//! Validation and accounting for genesis token claims.
//!
//! ## Purpose
//!
//! Decide, off-chain, whether a claim against the genesis distribution
//! would be accepted by the authoritative ledger, and predict the exact
//! token split it would produce:
//! - the ordered precondition checks for a single recipient claim
//! - the linear time-decaying recipient/caller split, in exact integer
//!   arithmetic
//! - the batched variant that aggregates a caller's share across many
//!   recipients while tolerating races on already-claimed allocations
//!
//! The engine is advisory: it never marks anything as claimed. The ledger
//! is the arbiter, and the engine's job is to agree with it bit for bit.
//!
//! ## Module Structure
//!
//! ```text
//! gd-02-claim-engine/
//! ├── domain/          # ClaimResult, LedgerSnapshot, errors, invariants
//! ├── algorithms/      # Vesting split, claim validation, batch orchestration
//! ├── ports/           # API traits (inbound) + ledger/submitter traits (outbound)
//! ├── adapters/        # In-memory authoritative ledger replica
//! ├── application/     # ClaimService orchestrating everything
//! └── config.rs        # GenesisParams validation + EngineConfig
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod adapters;
pub mod algorithms;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;

// Re-exports
pub use algorithms::{caller_share_at_block, orchestrate_batch, split, validate_claim};
pub use application::ClaimService;
pub use config::{EngineConfig, GenesisParams, GenesisParamsError};
pub use domain::{
    invariant_split_exact, BatchClaimOutcome, ClaimError, ClaimResult, ExternalError,
    LedgerSnapshot, RecipientCredit, ShareRatio, StructuralError, ValidationError,
};
pub use ports::{
    fetch_snapshot, ClaimApi, ClaimCall, ClaimSubmitter, LedgerReader, MockSubmitter, Submitted,
    SubmissionOutcome,
};
pub use adapters::{InMemoryLedger, LedgerAdapterError};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
