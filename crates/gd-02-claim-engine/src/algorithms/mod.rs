//! # Algorithms
//!
//! Pure claim logic: the vesting split, the ordered validation pipeline,
//! and batch orchestration. Everything here is synchronous, side-effect
//! free, and deterministic for a fixed snapshot.

pub mod batch;
pub mod validation;
pub mod vesting;

pub use batch::orchestrate_batch;
pub use validation::validate_claim;
pub use vesting::{caller_share_at_block, split};
