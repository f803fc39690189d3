#![no_std]

//! # Trade Oracle Contract
//!
//! Converts an amount of a lender pool's asset into the equivalent amount of
//! the trade reward token, quoting the live reserves of the AMM pairs on a
//! configured route (e.g. stable -> wrapped native -> trade token).
//!
//! The oracle keeps no price state. Each `convert` reads reserves at call
//! time, so two calls around a swap return different quotes. Degenerate
//! markets (empty route, drained reserves, zero output) fail with
//! `OracleUnavailable` instead of quoting a fallback rate.

mod quote;
mod types;

pub use quote::amount_out;
pub use types::{Hop, Route};

use lending_errors::ContractError;
use soroban_sdk::{contract, contractclient, contractimpl, log, Address, Env, Symbol, Vec};
use types::DataKey;

/// Refresh the instance TTL once it drops to about a day (at 5 s per ledger).
const BUMP_THRESHOLD: u32 = 17_280;
/// TTL after a refresh (~30 days).
const BUMP_TARGET: u32 = 518_400;

/// Read contract of an AMM pair: reserves of its first and second asset.
#[contractclient(name = "LiquidityPairClient")]
pub trait LiquidityPair {
    fn get_reserves(env: Env) -> (i128, i128);
}

fn require_admin(e: &Env, caller: &Address) -> Result<(), ContractError> {
    let admin: Address = e
        .storage()
        .instance()
        .get(&DataKey::Admin)
        .ok_or(ContractError::NotInitialized)?;
    caller.require_auth();
    if *caller != admin {
        return Err(ContractError::Unauthorized);
    }
    Ok(())
}

fn store_route(e: &Env, fee_bps: u32, hops: Vec<Hop>) -> Result<Route, ContractError> {
    if hops.is_empty() || fee_bps >= quote::BPS_DENOMINATOR {
        return Err(ContractError::InvalidRoute);
    }
    let route = Route { fee_bps, hops };
    e.storage().instance().set(&DataKey::Route, &route);
    e.storage().instance().extend_ttl(BUMP_THRESHOLD, BUMP_TARGET);
    e.events()
        .publish((Symbol::new(e, "route_set"),), (route.fee_bps, route.hops.len()));
    Ok(route)
}

fn reserves_for(e: &Env, hop: &Hop) -> Result<(i128, i128), ContractError> {
    let reserves = match LiquidityPairClient::new(e, &hop.pair).try_get_reserves() {
        Ok(Ok(reserves)) => reserves,
        _ => {
            log!(e, "pair reserves unavailable", hop.pair);
            return Err(ContractError::OracleUnavailable);
        }
    };
    if hop.zero_for_one {
        Ok(reserves)
    } else {
        Ok((reserves.1, reserves.0))
    }
}

#[contract]
pub struct TradeOracle;

#[contractimpl]
impl TradeOracle {
    /// One-time setup of the operator and the conversion route.
    pub fn initialize(
        e: Env,
        admin: Address,
        fee_bps: u32,
        hops: Vec<Hop>,
    ) -> Result<(), ContractError> {
        if e.storage().instance().has(&DataKey::Admin) {
            return Err(ContractError::AlreadyInitialized);
        }
        admin.require_auth();
        e.storage().instance().set(&DataKey::Admin, &admin);
        store_route(&e, fee_bps, hops)?;
        Ok(())
    }

    /// Replace the conversion route. Takes effect on the next quote.
    pub fn set_route(
        e: Env,
        admin: Address,
        fee_bps: u32,
        hops: Vec<Hop>,
    ) -> Result<Route, ContractError> {
        require_admin(&e, &admin)?;
        store_route(&e, fee_bps, hops)
    }

    pub fn get_route(e: Env) -> Result<Route, ContractError> {
        let route = e
            .storage()
            .instance()
            .get(&DataKey::Route)
            .ok_or(ContractError::NotInitialized)?;
        e.storage().instance().extend_ttl(BUMP_THRESHOLD, BUMP_TARGET);
        Ok(route)
    }

    /// Quote `amount` of the pool asset in trade-token units along the route.
    ///
    /// # Errors
    /// * `OracleUnavailable` - pair call failed, a reserve is empty, the input
    ///   is negative, or a positive input quotes to zero
    pub fn convert(e: Env, amount: i128) -> Result<i128, ContractError> {
        let route = Self::get_route(e.clone())?;
        if route.hops.is_empty() || amount < 0 {
            return Err(ContractError::OracleUnavailable);
        }
        if amount == 0 {
            return Ok(0);
        }

        let mut running = amount;
        for hop in route.hops.iter() {
            let (reserve_in, reserve_out) = reserves_for(&e, &hop)?;
            running = amount_out(&e, running, reserve_in, reserve_out, route.fee_bps)?;
            if running == 0 {
                log!(&e, "degenerate quote", amount, hop.pair);
                return Err(ContractError::OracleUnavailable);
            }
        }
        Ok(running)
    }
}
