//! Overflow-safe accrual arithmetic.
//!
//! Rewards are simple interest: `principal * rate_bps * seconds` over
//! `10_000 * SECONDS_PER_YEAR`, with every factor multiplied before the single
//! floor division. The product is held in an `I256` so any `i128` principal
//! fits: 127 + 32 + 49 bits stays far inside 256.

use lending_errors::ContractError;
use soroban_sdk::{Env, I256};

pub const SECONDS_PER_DAY: u64 = 86_400;
pub const SECONDS_PER_YEAR: u64 = 365 * SECONDS_PER_DAY;
pub const BPS_DENOMINATOR: u32 = 10_000;

/// Seconds of accrual a round has earned at `now`: the time since
/// `start_time`, stopped at the end of the tenure.
#[inline]
#[must_use]
pub fn capped_elapsed(now: u64, start_time: u64, tenure_days: u32) -> u64 {
    // u32::MAX days in seconds still fits u64.
    let tenure_secs = u64::from(tenure_days) * SECONDS_PER_DAY;
    now.saturating_sub(start_time).min(tenure_secs)
}

/// Simple interest on `principal` at `rate_bps` for `elapsed_secs`, rounded down.
pub fn accrue(
    e: &Env,
    principal: i128,
    rate_bps: u32,
    elapsed_secs: u64,
) -> Result<i128, ContractError> {
    if principal <= 0 || rate_bps == 0 || elapsed_secs == 0 {
        return Ok(0);
    }

    let numerator = I256::from_i128(e, principal)
        .mul(&I256::from_i128(e, i128::from(rate_bps)))
        .mul(&I256::from_i128(e, i128::from(elapsed_secs)));
    let denominator = I256::from_i128(
        e,
        i128::from(BPS_DENOMINATOR) * i128::from(SECONDS_PER_YEAR),
    );

    numerator
        .div(&denominator)
        .to_i128()
        .ok_or(ContractError::Overflow)
}

/// Checked `i128` addition.
#[inline]
pub fn add_i128(a: i128, b: i128) -> Result<i128, ContractError> {
    a.checked_add(b).ok_or(ContractError::Overflow)
}
