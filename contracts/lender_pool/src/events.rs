use soroban_sdk::{Address, Env, Symbol};

use crate::types::{BonusRateMode, Settlement};

/// Emitted once when the pool is initialized.
///
/// # Topics
/// * `Symbol` - "pool_initialized"
///
/// # Data
/// * `Address` - The pool asset
/// * `u32` - Stable rate in bps
/// * `BonusRateMode` - Where bonus rates come from
pub fn emit_pool_initialized(e: &Env, token: &Address, stable_rate_bps: u32, mode: BonusRateMode) {
    let topics = (Symbol::new(e, "pool_initialized"),);
    e.events()
        .publish(topics, (token.clone(), stable_rate_bps, mode));
}

/// Emitted when a lender opens a round.
///
/// # Topics
/// * `Symbol` - "round_opened"
/// * `Address` - The lender
///
/// # Data
/// * `u32` - Round index
/// * `i128` - Principal
/// * `u32` - Bonus rate in bps
/// * `u32` - Tenure in days
/// * `bool` - Trade eligibility
pub fn emit_round_opened(
    e: &Env,
    lender: &Address,
    index: u32,
    principal: i128,
    bonus_rate_bps: u32,
    tenure_days: u32,
    trade_eligible: bool,
) {
    let topics = (Symbol::new(e, "round_opened"), lender.clone());
    let data = (index, principal, bonus_rate_bps, tenure_days, trade_eligible);
    e.events().publish(topics, data);
}

/// Emitted for every round settled by `withdraw_all`.
///
/// # Topics
/// * `Symbol` - "round_withdrawn"
/// * `Address` - The lender
///
/// # Data
/// * `u32` - Round index
/// * `i128` - Principal returned
/// * `i128` - Stable reward
/// * `i128` - Bonus reward
/// * `i128` - Trade reward (trade token units)
pub fn emit_round_withdrawn(
    e: &Env,
    lender: &Address,
    index: u32,
    principal: i128,
    stable: i128,
    bonus: i128,
    trade: i128,
) {
    let topics = (Symbol::new(e, "round_withdrawn"), lender.clone());
    e.events()
        .publish(topics, (index, principal, stable, bonus, trade));
}

/// Emitted once per `withdraw_all` with the paid totals.
pub fn emit_lender_settled(e: &Env, lender: &Address, settlement: &Settlement) {
    let topics = (Symbol::new(e, "lender_settled"), lender.clone());
    e.events().publish(topics, settlement.clone());
}

pub fn emit_minimum_deposit_set(e: &Env, amount: i128) {
    e.events()
        .publish((Symbol::new(e, "min_deposit_set"),), amount);
}

/// Emitted when the operator rewires a collaborator.
///
/// # Topics
/// * `Symbol` - "reward_system_set", "price_oracle_set" or "trade_token_set"
///
/// # Data
/// * `Address` - The new collaborator
pub fn emit_collaborator_set(e: &Env, name: &str, address: &Address) {
    e.events().publish((Symbol::new(e, name),), address.clone());
}
