//! # Ports
//!
//! Inbound API traits and outbound dependency traits, hexagonal style.

pub mod inbound;
pub mod outbound;

pub use inbound::ClaimApi;
pub use outbound::{
    fetch_snapshot, ClaimCall, ClaimSubmitter, LedgerReader, MockSubmitter, Submitted,
    SubmissionOutcome,
};
