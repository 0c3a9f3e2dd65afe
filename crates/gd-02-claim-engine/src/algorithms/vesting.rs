//! # Vesting Split
//!
//! Divides one fixed allocation between recipient and caller as a linear
//! function of the current block.
//!
//! # Algorithm
//!
//! - Before the caller window opens, the caller share is zero.
//! - At or past the window end, the caller takes the full allocation.
//! - Inside the window it ramps linearly: `(current - start) / (end - start)`.
//!
//! All arithmetic is exact integer math. The multiplication widens to 512
//! bits before the floor division, so the result matches the ledger's own
//! integer arithmetic at any token magnitude.

use shared_types::{Address, U256, U512};

use crate::domain::ShareRatio;

/// Caller share of an allocation at `current_block`, clamped to [0, 1].
pub fn caller_share_at_block(current_block: u64, start_block: u64, end_block: u64) -> ShareRatio {
    let window = end_block.saturating_sub(start_block).max(1);

    if current_block < start_block {
        ShareRatio::zero(window)
    } else if current_block >= end_block {
        ShareRatio::full(window)
    } else {
        ShareRatio {
            elapsed: current_block - start_block,
            window,
        }
    }
}

/// Split an allocation between recipient and caller at `current_block`.
///
/// Self-claims (`caller == recipient`) always take the full allocation
/// with a zero caller share, regardless of block. Otherwise the caller
/// leg is floored and the recipient leg is derived by subtraction, so
/// `recipient + caller == tokens_per_allocation` holds exactly for every
/// block.
pub fn split(
    tokens_per_allocation: U256,
    recipient: Address,
    caller: Address,
    current_block: u64,
    start_block: u64,
    end_block: u64,
) -> (U256, U256) {
    if caller == recipient {
        return (tokens_per_allocation, U256::zero());
    }

    let share = caller_share_at_block(current_block, start_block, end_block);
    let caller_amount = mul_div_floor(tokens_per_allocation, share.elapsed, share.window);

    (tokens_per_allocation - caller_amount, caller_amount)
}

/// `floor(amount * numerator / denominator)` with a 512-bit intermediate.
///
/// `numerator <= denominator`, so the quotient always fits back into 256
/// bits; the high half of the wide quotient is provably zero.
fn mul_div_floor(amount: U256, numerator: u64, denominator: u64) -> U256 {
    let wide = amount.full_mul(U256::from(numerator)) / U512::from(denominator);

    let mut bytes = [0u8; 64];
    wide.to_big_endian(&mut bytes);
    let mut low = [0u8; 32];
    low.copy_from_slice(&bytes[32..]);
    U256::from_big_endian(&low)
}
