//! # Engine Configuration
//!
//! Genesis deployment parameters and their validation rules, plus the
//! engine's own knobs.

use serde::{Deserialize, Serialize};
use shared_types::{Hash, U256};
use thiserror::Error;

/// Parameters a genesis distribution is deployed with.
///
/// These are fixed for the lifetime of a distribution; the ledger stores
/// them and the engine reads them back through snapshots. Validation
/// mirrors the rules the ledger enforces at deployment time.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct GenesisParams {
    /// Merkle root committing the recipient set.
    pub genesis_root: Hash,
    /// Total token supply to distribute.
    pub total_genesis_tokens: U256,
    /// Number of committed recipients.
    pub total_genesis_recipients: u64,
    /// Minimum balance an account needed to be included in the genesis
    /// snapshot. Recorded state only; claim validation never consults it.
    pub balance_threshold: U256,
    /// Block the recipient snapshot was taken at.
    pub genesis_block: u64,
    /// First block at which third-party callers may claim on behalf of
    /// recipients.
    pub caller_allocation_start_block: u64,
    /// Block at which the caller's share reaches the full allocation.
    pub caller_allocation_end_block: u64,
}

impl GenesisParams {
    /// Validate the parameter set against the deployment-time block.
    pub fn validate(&self, current_block: u64) -> Result<(), GenesisParamsError> {
        if self.total_genesis_recipients == 0 {
            return Err(GenesisParamsError::ZeroRecipients);
        }

        if self.genesis_block > current_block {
            return Err(GenesisParamsError::GenesisBlockInFuture {
                genesis_block: self.genesis_block,
                current_block,
            });
        }

        if self.caller_allocation_start_block <= current_block {
            return Err(GenesisParamsError::CallerWindowOpensTooEarly {
                start_block: self.caller_allocation_start_block,
                current_block,
            });
        }

        if self.caller_allocation_end_block <= self.caller_allocation_start_block {
            return Err(GenesisParamsError::EmptyCallerWindow {
                start_block: self.caller_allocation_start_block,
                end_block: self.caller_allocation_end_block,
            });
        }

        Ok(())
    }

    /// Fixed per-recipient allocation: `total / recipients`, floored.
    pub fn tokens_per_allocation(&self) -> U256 {
        if self.total_genesis_recipients == 0 {
            return U256::zero();
        }
        self.total_genesis_tokens / U256::from(self.total_genesis_recipients)
    }
}

/// Rejected genesis parameter sets.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum GenesisParamsError {
    /// A distribution needs at least one recipient.
    #[error("Total genesis recipients must be greater than zero")]
    ZeroRecipients,

    /// The snapshot block cannot be in the future.
    #[error("Genesis block {genesis_block} is after current block {current_block}")]
    GenesisBlockInFuture {
        /// Configured snapshot block.
        genesis_block: u64,
        /// Block at validation time.
        current_block: u64,
    },

    /// The caller window must open strictly after deployment.
    #[error("Caller window start {start_block} must be after current block {current_block}")]
    CallerWindowOpensTooEarly {
        /// Configured window start.
        start_block: u64,
        /// Block at validation time.
        current_block: u64,
    },

    /// The caller window must span at least one block.
    #[error("Caller window end {end_block} must be after start {start_block}")]
    EmptyCallerWindow {
        /// Configured window start.
        start_block: u64,
        /// Configured window end.
        end_block: u64,
    },
}

/// Claim engine configuration.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct EngineConfig {
    /// Maximum recipients accepted in one batch claim.
    pub max_batch_size: usize,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            max_batch_size: 100,
        }
    }
}

impl EngineConfig {
    /// Create a config for testing (smaller values).
    pub fn for_testing() -> Self {
        Self { max_batch_size: 16 }
    }
}
