//! # In-Memory Ledger
//!
//! An authoritative ledger replica: the state machine that actually marks
//! allocations as generated and moves token balances, driven by the same
//! split and verification rules the engine predicts with.
//!
//! The integration suite runs claims against this adapter to prove the
//! engine's off-chain predictions match the authoritative outcome
//! bit for bit. It also implements [`LedgerReader`], so a [`crate::ClaimService`]
//! can be pointed at it directly.

use std::collections::{HashMap, HashSet};

use async_trait::async_trait;
use parking_lot::RwLock;
use shared_types::{Address, Hash, U256};
use thiserror::Error;

use gd_01_merkle_commitment::{verify_proof, BatchProofCodec, Proof};

use crate::algorithms::batch::orchestrate_batch;
use crate::algorithms::vesting::split;
use crate::config::{GenesisParams, GenesisParamsError};
use crate::domain::{
    invariant_caller_window, invariant_ledger_balance, invariant_started, BatchClaimOutcome,
    ClaimError, ClaimResult, LedgerSnapshot, ValidationError,
};
use crate::ports::outbound::LedgerReader;

/// Failures of the ledger's own lifecycle operations.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum LedgerAdapterError {
    /// `start` was called twice.
    #[error("Generation period has already started")]
    AlreadyStarted,

    /// `start` was called before the distribution was funded.
    #[error("Ledger funding {balance} is below the genesis supply {required}")]
    InsufficientFunding {
        /// Current ledger token balance.
        balance: U256,
        /// Supply the distribution must hold before starting.
        required: U256,
    },

    /// The deployment parameters were rejected.
    #[error(transparent)]
    InvalidParams(#[from] GenesisParamsError),
}

struct LedgerState {
    params: GenesisParams,
    started: bool,
    generated: HashSet<Address>,
    balances: HashMap<Address, U256>,
    current_block: u64,
}

impl LedgerState {
    fn balance_of(&self, account: &Address) -> U256 {
        self.balances.get(account).copied().unwrap_or_default()
    }

    fn credit(&mut self, account: Address, amount: U256) {
        let entry = self.balances.entry(account).or_insert_with(U256::zero);
        *entry = *entry + amount;
    }

    fn debit(&mut self, account: Address, amount: U256) {
        let entry = self.balances.entry(account).or_insert_with(U256::zero);
        *entry = *entry - amount;
    }

    fn snapshot_for(&self, ledger: Address, recipients: &[Address]) -> LedgerSnapshot {
        let generated = recipients
            .iter()
            .filter(|r| self.generated.contains(*r))
            .copied()
            .collect();

        LedgerSnapshot {
            root: self.params.genesis_root,
            total_genesis_tokens: self.params.total_genesis_tokens,
            total_genesis_recipients: self.params.total_genesis_recipients,
            balance_threshold: self.params.balance_threshold,
            genesis_block: self.params.genesis_block,
            caller_allocation_start_block: self.params.caller_allocation_start_block,
            caller_allocation_end_block: self.params.caller_allocation_end_block,
            started: self.started,
            generated,
            ledger_balance: self.balance_of(&ledger),
            current_block: self.current_block,
        }
    }
}

/// In-memory authoritative ledger.
pub struct InMemoryLedger {
    address: Address,
    state: RwLock<LedgerState>,
}

impl InMemoryLedger {
    /// Deploy a distribution with validated parameters.
    pub fn new(
        address: Address,
        params: GenesisParams,
        current_block: u64,
    ) -> Result<Self, LedgerAdapterError> {
        params.validate(current_block)?;

        Ok(Self {
            address,
            state: RwLock::new(LedgerState {
                params,
                started: false,
                generated: HashSet::new(),
                balances: HashMap::new(),
                current_block,
            }),
        })
    }

    /// Mint tokens to an account (test-token faucet).
    pub fn mint(&self, to: Address, amount: U256) {
        self.state.write().credit(to, amount);
    }

    /// Open the generation period. Requires the ledger to hold the full
    /// genesis supply.
    pub fn start(&self) -> Result<(), LedgerAdapterError> {
        let mut state = self.state.write();

        if state.started {
            return Err(LedgerAdapterError::AlreadyStarted);
        }

        let balance = state.balance_of(&self.address);
        if balance < state.params.total_genesis_tokens {
            return Err(LedgerAdapterError::InsufficientFunding {
                balance,
                required: state.params.total_genesis_tokens,
            });
        }

        state.started = true;
        Ok(())
    }

    /// Advance the chain by `blocks`.
    pub fn advance_blocks(&self, blocks: u64) {
        self.state.write().current_block += blocks;
    }

    /// Advance the chain to `block` if it is ahead of the current height.
    pub fn wait_until_block(&self, block: u64) {
        let mut state = self.state.write();
        if block > state.current_block {
            state.current_block = block;
        }
    }

    /// Current block height.
    pub fn block_height(&self) -> u64 {
        self.state.read().current_block
    }

    /// Token balance of an account.
    pub fn balance_of(&self, account: &Address) -> U256 {
        self.state.read().balance_of(account)
    }

    /// Whether a recipient's allocation has been generated.
    pub fn is_generated(&self, recipient: &Address) -> bool {
        self.state.read().generated.contains(recipient)
    }

    /// Execute a single claim: verify, split, mark generated, and move
    /// balances atomically.
    pub fn execute_generate(
        &self,
        caller: Address,
        recipient: Address,
        proof: &Proof,
    ) -> Result<ClaimResult, ClaimError> {
        let mut state = self.state.write();

        if !verify_proof(&recipient, proof, &state.params.genesis_root) {
            return Err(ValidationError::ProofInvalid { recipient }.into());
        }
        invariant_started(state.started)?;

        let tokens_per_allocation = state.params.tokens_per_allocation();
        invariant_ledger_balance(state.balance_of(&self.address), tokens_per_allocation)?;

        if state.generated.contains(&recipient) {
            return Err(ValidationError::AlreadyGenerated { recipient }.into());
        }
        invariant_caller_window(
            recipient,
            caller,
            state.current_block,
            state.params.caller_allocation_start_block,
        )?;

        let (recipient_token_amount, caller_token_amount) = split(
            tokens_per_allocation,
            recipient,
            caller,
            state.current_block,
            state.params.caller_allocation_start_block,
            state.params.caller_allocation_end_block,
        );

        state.generated.insert(recipient);
        state.debit(self.address, tokens_per_allocation);
        state.credit(recipient, recipient_token_amount);
        state.credit(caller, caller_token_amount);

        Ok(ClaimResult {
            recipient,
            caller,
            recipient_token_amount,
            caller_token_amount,
            block: state.current_block,
        })
    }

    /// Execute a batch claim from its packed proof encoding.
    ///
    /// The batch either applies in full (minus generated-skips) or not at
    /// all: the outcome is computed against a snapshot first, then
    /// committed, so a failing proof mid-batch leaves no partial state.
    pub fn execute_multi_generate(
        &self,
        caller: Address,
        recipients: &[Address],
        packed_proofs: &[u8],
    ) -> Result<BatchClaimOutcome, ClaimError> {
        let proofs: Vec<Proof> =
            BatchProofCodec::decode_for_recipients(packed_proofs, recipients.len())?;

        let mut state = self.state.write();
        let snapshot = state.snapshot_for(self.address, recipients);
        let outcome = orchestrate_batch(&snapshot, caller, recipients, &proofs)?;

        for credit in &outcome.credits {
            state.generated.insert(credit.recipient);
            state.credit(credit.recipient, credit.amount);
        }
        state.credit(caller, outcome.caller_token_amount);
        state.debit(self.address, outcome.total_distributed());

        Ok(outcome)
    }

    /// One consistent read of the full ledger state for `recipients`.
    pub fn snapshot_for(&self, recipients: &[Address]) -> LedgerSnapshot {
        self.state.read().snapshot_for(self.address, recipients)
    }
}

#[async_trait]
impl LedgerReader for InMemoryLedger {
    async fn genesis_root(&self) -> Result<Hash, crate::domain::ExternalError> {
        Ok(self.state.read().params.genesis_root)
    }

    async fn total_genesis_tokens(&self) -> Result<U256, crate::domain::ExternalError> {
        Ok(self.state.read().params.total_genesis_tokens)
    }

    async fn total_genesis_recipients(&self) -> Result<u64, crate::domain::ExternalError> {
        Ok(self.state.read().params.total_genesis_recipients)
    }

    async fn balance_threshold(&self) -> Result<U256, crate::domain::ExternalError> {
        Ok(self.state.read().params.balance_threshold)
    }

    async fn genesis_block(&self) -> Result<u64, crate::domain::ExternalError> {
        Ok(self.state.read().params.genesis_block)
    }

    async fn caller_allocation_start_block(&self) -> Result<u64, crate::domain::ExternalError> {
        Ok(self.state.read().params.caller_allocation_start_block)
    }

    async fn caller_allocation_end_block(&self) -> Result<u64, crate::domain::ExternalError> {
        Ok(self.state.read().params.caller_allocation_end_block)
    }

    async fn started(&self) -> Result<bool, crate::domain::ExternalError> {
        Ok(self.state.read().started)
    }

    async fn generated(&self, recipient: Address) -> Result<bool, crate::domain::ExternalError> {
        Ok(self.state.read().generated.contains(&recipient))
    }

    async fn current_block(&self) -> Result<u64, crate::domain::ExternalError> {
        Ok(self.state.read().current_block)
    }

    async fn token_balance(&self, account: Address) -> Result<U256, crate::domain::ExternalError> {
        Ok(self.state.read().balance_of(&account))
    }

    fn ledger_address(&self) -> Address {
        self.address
    }
}
