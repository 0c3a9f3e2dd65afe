//! # Test Fixtures
//!
//! Shared deployment helpers mirroring a full distribution lifecycle:
//! mock recipient accounts, a funded in-memory ledger, and a claim
//! service pointed at it.

use std::sync::{Arc, Once};

use gd_01_merkle_commitment::MerkleTree;
use gd_02_claim_engine::{
    ClaimService, EngineConfig, GenesisParams, InMemoryLedger, MockSubmitter,
};
use gd_telemetry::TelemetryConfig;
use shared_types::{Address, U256};

static INIT_LOGGING: Once = Once::new();

/// Install the tracing subscriber once for the whole test binary.
///
/// Honors `GD_LOG_LEVEL`/`RUST_LOG`, so a failing flow can be re-run
/// with claim-by-claim logging.
pub fn init_test_logging() {
    INIT_LOGGING.call_once(|| {
        let _ = gd_telemetry::init_telemetry(&TelemetryConfig::from_env());
    });
}

/// Ledger contract account.
pub const LEDGER: Address = [0xFE; 20];

/// Third-party caller account.
pub const CALLER: Address = [0xCC; 20];

/// Total supply across the distribution.
pub const TOTAL_GENESIS_TOKENS: u64 = 10_000_000;

/// Committed recipient count.
pub const TOTAL_GENESIS_RECIPIENTS: u64 = 10;

/// Allocation per recipient.
pub const TOKENS_PER_ALLOCATION: u64 = TOTAL_GENESIS_TOKENS / TOTAL_GENESIS_RECIPIENTS;

/// Blocks between deployment and the caller window opening.
pub const BLOCKS_TO_CALLER_CLIFF: u64 = 10;

/// Length of the caller allocation ramp.
pub const CALLER_ALLOCATION_PERIOD: u64 = 100;

/// Mock recipient accounts, `0x..01` through `0x..0a`.
///
/// Starts at 1 because the null address is never a valid recipient.
pub fn mock_accounts() -> Vec<Address> {
    (1..=TOTAL_GENESIS_RECIPIENTS as u8)
        .map(|n| {
            let mut account = [0u8; 20];
            account[19] = n;
            account
        })
        .collect()
}

/// Genesis parameters over the mock accounts, deployed at block 0.
pub fn genesis_params(tree: &MerkleTree) -> GenesisParams {
    GenesisParams {
        genesis_root: tree.root(),
        total_genesis_tokens: U256::from(TOTAL_GENESIS_TOKENS),
        total_genesis_recipients: TOTAL_GENESIS_RECIPIENTS,
        balance_threshold: U256::from(1_000u64),
        genesis_block: 0,
        caller_allocation_start_block: BLOCKS_TO_CALLER_CLIFF + 1,
        caller_allocation_end_block: BLOCKS_TO_CALLER_CLIFF + CALLER_ALLOCATION_PERIOD + 1,
    }
}

/// Deploy a funded, started ledger over the mock accounts.
pub fn deploy_started() -> (Arc<InMemoryLedger>, MerkleTree) {
    let tree = MerkleTree::new(mock_accounts());
    let ledger = Arc::new(
        InMemoryLedger::new(LEDGER, genesis_params(&tree), 0).expect("valid genesis params"),
    );
    ledger.mint(LEDGER, U256::from(TOTAL_GENESIS_TOKENS));
    ledger.start().expect("funded ledger starts");
    (ledger, tree)
}

/// Deploy a funded ledger that has NOT been started yet.
pub fn deploy_unstarted() -> (Arc<InMemoryLedger>, MerkleTree) {
    let tree = MerkleTree::new(mock_accounts());
    let ledger = Arc::new(
        InMemoryLedger::new(LEDGER, genesis_params(&tree), 0).expect("valid genesis params"),
    );
    ledger.mint(LEDGER, U256::from(TOTAL_GENESIS_TOKENS));
    (ledger, tree)
}

/// A claim service for `caller` over a started deployment.
pub fn service_for(
    caller: Address,
    ledger: Arc<InMemoryLedger>,
    tree: MerkleTree,
) -> (
    ClaimService<InMemoryLedger, MockSubmitter>,
    Arc<MockSubmitter>,
) {
    let submitter = Arc::new(MockSubmitter::new());
    let service = ClaimService::new(
        EngineConfig::default(),
        caller,
        tree,
        ledger,
        submitter.clone(),
    );
    (service, submitter)
}

/// Advance the chain into the caller window, `percent` of the way
/// through the ramp.
pub fn advance_into_window(ledger: &InMemoryLedger, percent: u64) {
    let start = BLOCKS_TO_CALLER_CLIFF + 1;
    ledger.wait_until_block(start + CALLER_ALLOCATION_PERIOD * percent / 100);
}
