#![no_std]

//! # Reward System Contract
//!
//! Holds the bonus APY (in basis points) granted to each lender. Lender pools
//! running in registry mode read the rate when a round is opened; the rate is
//! then frozen on the round, so later updates never touch open rounds.
//!
//! ## Features
//! - Admin-controlled rate assignment
//! - Pure lookup with a zero default for unknown lenders
//! - Events for every rate change

use lending_errors::ContractError;
use soroban_sdk::{contract, contractimpl, contracttype, Address, Env, Symbol};

/// Refresh a TTL once it drops to about a day (at 5 s per ledger).
const BUMP_THRESHOLD: u32 = 17_280;
/// TTL after a refresh (~30 days).
const BUMP_TARGET: u32 = 518_400;

/// Storage keys for the reward system contract
#[contracttype]
#[derive(Clone)]
enum DataKey {
    /// Operator address
    Admin,
    /// Lender -> bonus APY in bps
    BonusApy(Address),
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
    e.storage().instance().extend_ttl(BUMP_THRESHOLD, BUMP_TARGET);
    Ok(())
}

#[contract]
pub struct RewardSystem;

#[contractimpl]
impl RewardSystem {
    /// Initialize the registry with its operator.
    ///
    /// # Errors
    /// * `AlreadyInitialized` if called twice
    pub fn initialize(e: Env, admin: Address) -> Result<(), ContractError> {
        if e.storage().instance().has(&DataKey::Admin) {
            return Err(ContractError::AlreadyInitialized);
        }

        admin.require_auth();
        e.storage().instance().set(&DataKey::Admin, &admin);
        e.storage().instance().extend_ttl(BUMP_THRESHOLD, BUMP_TARGET);

        e.events()
            .publish((Symbol::new(&e, "registry_initialized"),), admin);
        Ok(())
    }

    /// Set the bonus APY for `lender`.
    ///
    /// # Arguments
    /// * `admin` - Operator address (must authorize)
    /// * `lender` - Lender receiving the rate
    /// * `bps` - Annual rate in basis points (100 = 1%)
    ///
    /// # Events
    /// Emits `bonus_apy_set` with `(lender, bps)`
    pub fn set_user_bonus_apy(
        e: Env,
        admin: Address,
        lender: Address,
        bps: u32,
    ) -> Result<(), ContractError> {
        require_admin(&e, &admin)?;

        let key = DataKey::BonusApy(lender.clone());
        e.storage().persistent().set(&key, &bps);
        e.storage()
            .persistent()
            .extend_ttl(&key, BUMP_THRESHOLD, BUMP_TARGET);

        e.events()
            .publish((Symbol::new(&e, "bonus_apy_set"), lender), bps);
        Ok(())
    }

    /// Bonus APY registered for `lender`, or 0 when none was set.
    pub fn get_user_bonus_apy(e: Env, lender: Address) -> u32 {
        if e.storage().instance().has(&DataKey::Admin) {
            e.storage().instance().extend_ttl(BUMP_THRESHOLD, BUMP_TARGET);
        }
        let key = DataKey::BonusApy(lender);
        match e.storage().persistent().get(&key) {
            Some(bps) => {
                e.storage()
                    .persistent()
                    .extend_ttl(&key, BUMP_THRESHOLD, BUMP_TARGET);
                bps
            }
            None => 0,
        }
    }

    pub fn get_admin(e: Env) -> Result<Address, ContractError> {
        e.storage()
            .instance()
            .get(&DataKey::Admin)
            .ok_or(ContractError::NotInitialized)
    }

    /// Hand the operator role to `new_admin`.
    ///
    /// # Events
    /// Emits `admin_transferred` with the new admin address
    pub fn transfer_admin(e: Env, admin: Address, new_admin: Address) -> Result<(), ContractError> {
        require_admin(&e, &admin)?;

        e.storage().instance().set(&DataKey::Admin, &new_admin);

        e.events()
            .publish((Symbol::new(&e, "admin_transferred"),), new_admin);
        Ok(())
    }
}
