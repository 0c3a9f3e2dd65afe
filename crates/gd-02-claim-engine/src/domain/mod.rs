//! # Domain Layer
//!
//! Value objects, errors, and invariants for claim validation.

pub mod entities;
pub mod errors;
pub mod invariants;

pub use entities::{
    BatchClaimOutcome, ClaimResult, LedgerSnapshot, RecipientCredit, ShareRatio,
};
pub use errors::{ClaimError, ExternalError, StructuralError, ValidationError};
pub use invariants::{
    invariant_caller_window, invariant_ledger_balance, invariant_not_generated,
    invariant_recipient_count, invariant_root_match, invariant_split_exact, invariant_started,
};
