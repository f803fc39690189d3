//! Constant-product quoting.
//!
//! Every product is taken in 256-bit space, so amounts and reserves far past
//! what an `i128` product could hold still quote exactly.

use lending_errors::ContractError;
use soroban_sdk::{Env, I256};

pub const BPS_DENOMINATOR: u32 = 10_000;

/// Output of selling `amount_in` into a pool holding `reserve_in`/`reserve_out`:
/// `in * (10_000 - fee) * r_out / (r_in * 10_000 + in * (10_000 - fee))`.
pub fn amount_out(
    e: &Env,
    amount_in: i128,
    reserve_in: i128,
    reserve_out: i128,
    fee_bps: u32,
) -> Result<i128, ContractError> {
    if amount_in < 0 {
        return Err(ContractError::OracleUnavailable);
    }
    if reserve_in <= 0 || reserve_out <= 0 {
        return Err(ContractError::OracleUnavailable);
    }
    if fee_bps >= BPS_DENOMINATOR {
        return Err(ContractError::InvalidRoute);
    }
    if amount_in == 0 {
        return Ok(0);
    }

    let fee_factor = I256::from_i128(e, i128::from(BPS_DENOMINATOR - fee_bps));
    let in_with_fee = I256::from_i128(e, amount_in).mul(&fee_factor);
    let numerator = in_with_fee.mul(&I256::from_i128(e, reserve_out));
    let denominator = I256::from_i128(e, reserve_in)
        .mul(&I256::from_i128(e, i128::from(BPS_DENOMINATOR)))
        .add(&in_with_fee);

    // r_out > 0 and the denominator exceeds in_with_fee, so the quotient is
    // strictly below r_out and always fits i128.
    numerator
        .div(&denominator)
        .to_i128()
        .ok_or(ContractError::Overflow)
}
