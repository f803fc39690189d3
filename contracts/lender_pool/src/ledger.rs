//! Per-lender round storage.
//!
//! Rounds live at `Round(lender, index)` with a separate counter, so indices
//! are assigned once and a settled round keeps its slot forever.
//!
//! Every read and write of a lender entry extends its TTL far enough to cover
//! the round's whole tenure plus a grace window, capped at the network maximum,
//! so principal in custody never becomes unreachable before maturity.

use crate::types::{DataKey, Round};
use lending_errors::ContractError;
use soroban_sdk::{Address, Env};

/// Ledgers per day at 5 s per ledger.
pub const DAY_IN_LEDGERS: u32 = 17_280;

/// Contract instance TTL (~30 days), refreshed at most once a day.
pub const INSTANCE_BUMP_TARGET: u32 = 30 * DAY_IN_LEDGERS;
pub const INSTANCE_BUMP_THRESHOLD: u32 = INSTANCE_BUMP_TARGET - DAY_IN_LEDGERS;

/// Days a lender entry stays live past the end of a tenure.
pub const ROUND_GRACE_DAYS: u32 = 30;

/// Extend the pool instance (config and admin) and its code.
pub fn bump_instance(e: &Env) {
    e.storage()
        .instance()
        .extend_ttl(INSTANCE_BUMP_THRESHOLD, INSTANCE_BUMP_TARGET);
}

/// TTL in ledgers that keeps a round live through `tenure_days` plus grace.
pub fn round_ttl(tenure_days: u32) -> u32 {
    tenure_days
        .saturating_add(ROUND_GRACE_DAYS)
        .saturating_mul(DAY_IN_LEDGERS)
}

fn bump_entry(e: &Env, key: &DataKey, ttl: u32) {
    let ttl = ttl.min(e.storage().max_ttl());
    e.storage()
        .persistent()
        .extend_ttl(key, ttl.saturating_sub(DAY_IN_LEDGERS), ttl);
}

pub fn round_count(e: &Env, lender: &Address) -> u32 {
    let key = DataKey::RoundCount(lender.clone());
    match e.storage().persistent().get(&key) {
        Some(count) => {
            bump_entry(e, &key, round_ttl(0));
            count
        }
        None => 0,
    }
}

pub fn load_round(e: &Env, lender: &Address, index: u32) -> Result<Round, ContractError> {
    let key = DataKey::Round(lender.clone(), index);
    let round: Round = e
        .storage()
        .persistent()
        .get(&key)
        .ok_or(ContractError::RoundNotFound)?;
    bump_entry(e, &key, round_ttl(round.tenure_days));
    Ok(round)
}

/// Overwrite an existing round. Only `withdraw_all` calls this, to flip
/// `withdrawn`.
pub fn store_round(e: &Env, lender: &Address, index: u32, round: &Round) {
    let key = DataKey::Round(lender.clone(), index);
    e.storage().persistent().set(&key, round);
    bump_entry(e, &key, round_ttl(round.tenure_days));
}

/// Append `round` and return its index. The counter is extended as far as
/// the new round, so it never expires before any round it indexes.
pub fn push_round(e: &Env, lender: &Address, round: &Round) -> Result<u32, ContractError> {
    let index = round_count(e, lender);
    let next = index.checked_add(1).ok_or(ContractError::Overflow)?;
    store_round(e, lender, index, round);

    let key = DataKey::RoundCount(lender.clone());
    e.storage().persistent().set(&key, &next);
    bump_entry(e, &key, round_ttl(round.tenure_days));
    Ok(index)
}
