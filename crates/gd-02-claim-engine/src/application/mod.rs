//! # Application Layer
//!
//! The service orchestrating tree, snapshot, validation, and submission.

pub mod service;

pub use service::ClaimService;
