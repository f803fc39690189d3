//! Lender Pool Contract
//!
//! Lenders deposit the pool asset in discrete *rounds*. Each round earns two
//! independent simple-interest streams on its principal: the pool-wide stable
//! rate and the round's own bonus rate. Trade-eligible rounds additionally
//! earn their bonus amount converted into the trade token at the live oracle
//! price.
//!
//! ## Key design decisions
//!
//! - **Append-only rounds**: a lender's rounds are indexed from 0 and never
//!   removed; settlement only flips `withdrawn`.
//! - **Reward plateau**: accrual stops at the tenure boundary, but withdrawal
//!   is never locked.
//! - **Integer math**: multiply-then-divide in 256-bit space, no floats.
//! - **Fail closed**: an unavailable or degenerate trade quote aborts the call
//!   instead of paying zero.
//! - **Checks-Effects-Interactions**: rounds are marked withdrawn before any
//!   token leaves the pool.
//! - **Single operator**: every configuration write is gated on the admin.

#![no_std]

mod collaborators;
mod events;
mod ledger;
pub mod math;
mod token_integration;
mod types;

pub use collaborators::{PriceOracle, PriceOracleClient, RateRegistry, RateRegistryClient};
pub use lending_errors::ContractError;
pub use types::{BonusRateMode, DataKey, LenderPosition, PoolConfig, Round, Settlement};

use soroban_sdk::{contract, contractimpl, Address, Env};


#[cfg(test)]
mod test_rewards;

// ─── Helpers ───────────────────────────────────────────────────────────────

/// Load the config and keep the pool instance alive.
fn load_config(e: &Env) -> Result<PoolConfig, ContractError> {
    let config = e
        .storage()
        .instance()
        .get(&DataKey::Config)
        .ok_or(ContractError::NotInitialized)?;
    ledger::bump_instance(e);
    Ok(config)
}

fn save_config(e: &Env, config: &PoolConfig) {
    e.storage().instance().set(&DataKey::Config, config);
}

/// Authorize `caller` as the operator and return the current config.
fn require_admin(e: &Env, caller: &Address) -> Result<PoolConfig, ContractError> {
    let stored: Address = e
        .storage()
        .instance()
        .get(&DataKey::Admin)
        .ok_or(ContractError::NotInitialized)?;
    caller.require_auth();
    if stored != *caller {
        return Err(ContractError::Unauthorized);
    }
    load_config(e)
}

/// Stable and bonus reward of `round` at `now`. Both are zero once settled.
fn accrued_rewards(
    e: &Env,
    config: &PoolConfig,
    round: &Round,
    now: u64,
) -> Result<(i128, i128), ContractError> {
    if round.withdrawn {
        return Ok((0, 0));
    }
    let elapsed = math::capped_elapsed(now, round.start_time, round.tenure_days);
    let stable = math::accrue(e, round.principal, config.stable_rate_bps, elapsed)?;
    let bonus = math::accrue(e, round.principal, round.bonus_rate_bps, elapsed)?;
    Ok((stable, bonus))
}

fn open_round(
    e: &Env,
    config: &PoolConfig,
    lender: &Address,
    amount: i128,
    bonus_rate_bps: u32,
    tenure_days: u32,
    trade_eligible: bool,
) -> Result<u32, ContractError> {
    token_integration::transfer_into_contract(e, &config.token, lender, amount)?;

    let round = Round {
        principal: amount,
        bonus_rate_bps,
        tenure_days,
        start_time: e.ledger().timestamp(),
        trade_eligible,
        withdrawn: false,
    };
    let index = ledger::push_round(e, lender, &round)?;

    events::emit_round_opened(
        e,
        lender,
        index,
        amount,
        bonus_rate_bps,
        tenure_days,
        trade_eligible,
    );
    Ok(index)
}

/// Deposit policy shared by both round-opening entry points.
fn validate_deposit(
    config: &PoolConfig,
    amount: i128,
    tenure_days: u32,
) -> Result<(), ContractError> {
    if amount <= 0 {
        return Err(ContractError::InvalidAmount);
    }
    if amount < config.minimum_deposit {
        return Err(ContractError::BelowMinimumDeposit);
    }
    if tenure_days == 0 {
        return Err(ContractError::InvalidTenure);
    }
    Ok(())
}

// ─── Contract ──────────────────────────────────────────────────────────────

#[contract]
pub struct LenderPool;

#[contractimpl]
impl LenderPool {
    // ── Admin setup ────────────────────────────────────────────────────────

    /// One-time initialization with the pool asset and its stable rate.
    /// The minimum deposit starts at 0 and no collaborator is wired.
    pub fn initialize(
        e: Env,
        admin: Address,
        token: Address,
        stable_rate_bps: u32,
        bonus_rate_mode: BonusRateMode,
    ) -> Result<(), ContractError> {
        if e.storage().instance().has(&DataKey::Admin) {
            return Err(ContractError::AlreadyInitialized);
        }
        admin.require_auth();

        let config = PoolConfig {
            token: token.clone(),
            stable_rate_bps,
            minimum_deposit: 0,
            bonus_rate_mode,
            reward_system: None,
            price_oracle: None,
            trade_token: None,
        };
        e.storage().instance().set(&DataKey::Admin, &admin);
        save_config(&e, &config);
        ledger::bump_instance(&e);

        events::emit_pool_initialized(&e, &token, stable_rate_bps, bonus_rate_mode);
        Ok(())
    }

    /// Set the minimum principal for rounds opened from now on.
    /// Rounds already open are unaffected.
    pub fn set_minimum_deposit(e: Env, admin: Address, amount: i128) -> Result<(), ContractError> {
        let mut config = require_admin(&e, &admin)?;
        if amount < 0 {
            return Err(ContractError::InvalidAmount);
        }
        config.minimum_deposit = amount;
        save_config(&e, &config);
        events::emit_minimum_deposit_set(&e, amount);
        Ok(())
    }

    /// Wire the bonus-rate registry used by `new_registry_round`.
    pub fn set_reward_system_contract(
        e: Env,
        admin: Address,
        reward_system: Address,
    ) -> Result<(), ContractError> {
        let mut config = require_admin(&e, &admin)?;
        config.reward_system = Some(reward_system.clone());
        save_config(&e, &config);
        events::emit_collaborator_set(&e, "reward_system_set", &reward_system);
        Ok(())
    }

    /// Wire the oracle that prices trade rewards.
    pub fn set_price_oracle(e: Env, admin: Address, oracle: Address) -> Result<(), ContractError> {
        let mut config = require_admin(&e, &admin)?;
        config.price_oracle = Some(oracle.clone());
        save_config(&e, &config);
        events::emit_collaborator_set(&e, "price_oracle_set", &oracle);
        Ok(())
    }

    /// Set the asset trade rewards are paid in.
    pub fn set_trade_token(e: Env, admin: Address, token: Address) -> Result<(), ContractError> {
        let mut config = require_admin(&e, &admin)?;
        config.trade_token = Some(token.clone());
        save_config(&e, &config);
        events::emit_collaborator_set(&e, "trade_token_set", &token);
        Ok(())
    }

    // ── Round lifecycle ────────────────────────────────────────────────────

    /// Open a round with a caller-supplied bonus rate and return its index.
    ///
    /// Requirements:
    /// - Pool runs in `CallerSupplied` mode
    /// - `amount` > 0 and `amount` >= minimum deposit
    /// - `tenure_days` > 0
    /// - `lender` has approved the pool to spend `amount`
    pub fn new_round(
        e: Env,
        lender: Address,
        amount: i128,
        bonus_rate_bps: u32,
        tenure_days: u32,
        trade_eligible: bool,
    ) -> Result<u32, ContractError> {
        lender.require_auth();
        let config = load_config(&e)?;
        if config.bonus_rate_mode != BonusRateMode::CallerSupplied {
            return Err(ContractError::BonusRateModeMismatch);
        }
        validate_deposit(&config, amount, tenure_days)?;
        open_round(
            &e,
            &config,
            &lender,
            amount,
            bonus_rate_bps,
            tenure_days,
            trade_eligible,
        )
    }

    /// Open a round whose bonus rate is the lender's current registry rate.
    /// Same requirements as `new_round`, in `Registry` mode.
    pub fn new_registry_round(
        e: Env,
        lender: Address,
        amount: i128,
        tenure_days: u32,
        trade_eligible: bool,
    ) -> Result<u32, ContractError> {
        lender.require_auth();
        let config = load_config(&e)?;
        if config.bonus_rate_mode != BonusRateMode::Registry {
            return Err(ContractError::BonusRateModeMismatch);
        }
        validate_deposit(&config, amount, tenure_days)?;
        let bonus_rate_bps = collaborators::registry_bonus_rate(&e, &config, &lender)?;
        open_round(
            &e,
            &config,
            &lender,
            amount,
            bonus_rate_bps,
            tenure_days,
            trade_eligible,
        )
    }

    /// Settle every open round of `lender`: principal plus stable and bonus
    /// rewards in the pool asset, trade rewards in the trade token.
    ///
    /// Rounds still inside their tenure are settled too, with the reward
    /// earned so far. Fails without touching any round if there is nothing
    /// to settle, a trade quote is unavailable, or custody is short.
    pub fn withdraw_all(e: Env, lender: Address) -> Result<Settlement, ContractError> {
        lender.require_auth();
        let config = load_config(&e)?;
        let now = e.ledger().timestamp();

        let mut settlement = Settlement {
            rounds_settled: 0,
            principal: 0,
            stable_reward: 0,
            bonus_reward: 0,
            trade_reward: 0,
        };

        for index in 0..ledger::round_count(&e, &lender) {
            let mut round = ledger::load_round(&e, &lender, index)?;
            if round.withdrawn {
                continue;
            }

            let (stable, bonus) = accrued_rewards(&e, &config, &round, now)?;
            let trade = if round.trade_eligible {
                collaborators::convert_to_trade(&e, &config, bonus)?
            } else {
                0
            };

            // CEI: mark settled before any transfer.
            round.withdrawn = true;
            ledger::store_round(&e, &lender, index, &round);

            settlement.rounds_settled += 1;
            settlement.principal = math::add_i128(settlement.principal, round.principal)?;
            settlement.stable_reward = math::add_i128(settlement.stable_reward, stable)?;
            settlement.bonus_reward = math::add_i128(settlement.bonus_reward, bonus)?;
            settlement.trade_reward = math::add_i128(settlement.trade_reward, trade)?;

            events::emit_round_withdrawn(&e, &lender, index, round.principal, stable, bonus, trade);
        }

        if settlement.rounds_settled == 0 {
            return Err(ContractError::NothingToWithdraw);
        }

        let payout = math::add_i128(
            settlement.principal,
            math::add_i128(settlement.stable_reward, settlement.bonus_reward)?,
        )?;
        token_integration::transfer_from_contract(&e, &config.token, &lender, payout)?;

        if settlement.trade_reward > 0 {
            let trade_token = config
                .trade_token
                .as_ref()
                .ok_or(ContractError::TradeTokenNotSet)?;
            token_integration::transfer_from_contract(
                &e,
                trade_token,
                &lender,
                settlement.trade_reward,
            )?;
        }

        events::emit_lender_settled(&e, &lender, &settlement);
        Ok(settlement)
    }

    // ── Reward queries ─────────────────────────────────────────────────────

    /// Stable-rate reward earned so far by round `round_index` of `lender`.
    pub fn stable_reward_of(
        e: Env,
        round_index: u32,
        lender: Address,
    ) -> Result<i128, ContractError> {
        let config = load_config(&e)?;
        let round = ledger::load_round(&e, &lender, round_index)?;
        let (stable, _) = accrued_rewards(&e, &config, &round, e.ledger().timestamp())?;
        Ok(stable)
    }

    /// Bonus-rate reward earned so far by round `round_index` of `lender`.
    pub fn bonus_reward_of(
        e: Env,
        round_index: u32,
        lender: Address,
    ) -> Result<i128, ContractError> {
        let config = load_config(&e)?;
        let round = ledger::load_round(&e, &lender, round_index)?;
        let (_, bonus) = accrued_rewards(&e, &config, &round, e.ledger().timestamp())?;
        Ok(bonus)
    }

    /// Bonus reward of a trade-eligible round priced in the trade token.
    /// Quoted live, so consecutive calls follow the market.
    pub fn trade_reward_of(
        e: Env,
        round_index: u32,
        lender: Address,
    ) -> Result<i128, ContractError> {
        let config = load_config(&e)?;
        let round = ledger::load_round(&e, &lender, round_index)?;
        if !round.trade_eligible || round.withdrawn {
            return Ok(0);
        }
        let (_, bonus) = accrued_rewards(&e, &config, &round, e.ledger().timestamp())?;
        collaborators::convert_to_trade(&e, &config, bonus)
    }

    /// Principal and rewards accrued so far across every unsettled round of
    /// `lender`: what `withdraw_all` would pay in the pool asset right now.
    pub fn position_of(e: Env, lender: Address) -> Result<LenderPosition, ContractError> {
        let config = load_config(&e)?;
        let now = e.ledger().timestamp();
        let mut position = LenderPosition {
            open_rounds: 0,
            principal: 0,
            stable_reward: 0,
            bonus_reward: 0,
        };

        for index in 0..ledger::round_count(&e, &lender) {
            let round = ledger::load_round(&e, &lender, index)?;
            if round.withdrawn {
                continue;
            }
            let (stable, bonus) = accrued_rewards(&e, &config, &round, now)?;
            position.open_rounds += 1;
            position.principal = math::add_i128(position.principal, round.principal)?;
            position.stable_reward = math::add_i128(position.stable_reward, stable)?;
            position.bonus_reward = math::add_i128(position.bonus_reward, bonus)?;
        }
        Ok(position)
    }

    // ── Queries ────────────────────────────────────────────────────────────

    pub fn get_round(e: Env, lender: Address, round_index: u32) -> Result<Round, ContractError> {
        ledger::load_round(&e, &lender, round_index)
    }

    /// Number of rounds ever opened by `lender`, settled ones included.
    pub fn get_number_of_rounds(e: Env, lender: Address) -> u32 {
        ledger::round_count(&e, &lender)
    }

    /// Principal `lender` still has in the pool across unsettled rounds.
    pub fn get_amount_lent(e: Env, lender: Address) -> Result<i128, ContractError> {
        let mut total = 0_i128;
        for index in 0..ledger::round_count(&e, &lender) {
            let round = ledger::load_round(&e, &lender, index)?;
            if !round.withdrawn {
                total = math::add_i128(total, round.principal)?;
            }
        }
        Ok(total)
    }

    /// Returns `true` once the round's tenure has fully elapsed.
    pub fn is_round_matured(
        e: Env,
        lender: Address,
        round_index: u32,
    ) -> Result<bool, ContractError> {
        Ok(Self::get_round_time_remaining(e, lender, round_index)? == 0)
    }

    /// Seconds until the round stops accruing. Returns 0 if already matured.
    pub fn get_round_time_remaining(
        e: Env,
        lender: Address,
        round_index: u32,
    ) -> Result<u64, ContractError> {
        let round = ledger::load_round(&e, &lender, round_index)?;
        let tenure_secs = u64::from(round.tenure_days) * math::SECONDS_PER_DAY;
        let maturity = round.start_time.saturating_add(tenure_secs);
        Ok(maturity.saturating_sub(e.ledger().timestamp()))
    }

    pub fn get_config(e: Env) -> Result<PoolConfig, ContractError> {
        load_config(&e)
    }

    pub fn get_admin(e: Env) -> Result<Address, ContractError> {
        e.storage()
            .instance()
            .get(&DataKey::Admin)
            .ok_or(ContractError::NotInitialized)
    }

    pub fn get_minimum_deposit(e: Env) -> Result<i128, ContractError> {
        Ok(load_config(&e)?.minimum_deposit)
    }

    pub fn get_stable_rate(e: Env) -> Result<u32, ContractError> {
        Ok(load_config(&e)?.stable_rate_bps)
    }
}
