//! Clients for the contracts the pool consumes but does not own: the bonus
//! rate registry and the trade-token price oracle. Both are wired by address
//! through the admin surface, so tests can register deterministic stand-ins.

use crate::types::PoolConfig;
use lending_errors::ContractError;
use soroban_sdk::{contractclient, log, Address, Env};

/// Read side of the bonus-rate registry.
#[contractclient(name = "RateRegistryClient")]
pub trait RateRegistry {
    fn get_user_bonus_apy(env: Env, lender: Address) -> u32;
}

/// Converts an amount of the pool asset into trade-token units at the live
/// market price.
#[contractclient(name = "PriceOracleClient")]
pub trait PriceOracle {
    fn convert(env: Env, amount: i128) -> i128;
}

/// Bonus rate registered for `lender` in the configured reward system.
/// A failed lookup is an error, never a zero rate.
pub fn registry_bonus_rate(
    e: &Env,
    config: &PoolConfig,
    lender: &Address,
) -> Result<u32, ContractError> {
    let registry = config
        .reward_system
        .as_ref()
        .ok_or(ContractError::RewardSystemNotSet)?;
    match RateRegistryClient::new(e, registry).try_get_user_bonus_apy(lender) {
        Ok(Ok(bps)) => Ok(bps),
        _ => {
            log!(e, "bonus rate lookup failed", registry.clone(), lender.clone());
            Err(ContractError::RegistryUnavailable)
        }
    }
}

/// Quote `bonus` in trade-token units. Never substitutes a fallback: a
/// missing oracle, a failed call or a non-positive quote is an error.
pub fn convert_to_trade(e: &Env, config: &PoolConfig, bonus: i128) -> Result<i128, ContractError> {
    if bonus == 0 {
        return Ok(0);
    }
    let Some(oracle) = config.price_oracle.as_ref() else {
        log!(e, "price oracle not configured");
        return Err(ContractError::OracleUnavailable);
    };

    match PriceOracleClient::new(e, oracle).try_convert(&bonus) {
        Ok(Ok(quote)) if quote > 0 => Ok(quote),
        _ => {
            log!(e, "trade conversion failed", oracle.clone(), bonus);
            Err(ContractError::OracleUnavailable)
        }
    }
}
