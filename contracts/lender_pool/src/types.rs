use soroban_sdk::{contracttype, Address};

// ─── Round state ───────────────────────────────────────────────────────────

/// One lending commitment. Created once, read many times, settled once.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Round {
    /// Deposited amount in the pool asset's smallest unit.
    pub principal: i128,
    /// Bonus annual rate in basis points, frozen at creation.
    pub bonus_rate_bps: u32,
    /// Window in days after which reward growth stops.
    pub tenure_days: u32,
    /// Ledger timestamp at creation.
    pub start_time: u64,
    /// Whether the bonus reward is also paid out in the trade token.
    pub trade_eligible: bool,
    /// true once `withdraw_all` has settled the round.
    pub withdrawn: bool,
}

// ─── Pool configuration ────────────────────────────────────────────────────

/// Where a new round's bonus rate comes from.
#[contracttype]
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum BonusRateMode {
    /// The lender passes the rate to `new_round`.
    CallerSupplied,
    /// The rate is read from the reward system by `new_registry_round`.
    Registry,
}

/// Pool-wide settings, written only by the operator.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct PoolConfig {
    /// Asset lenders deposit and are repaid in.
    pub token: Address,
    /// Stable annual rate in basis points applied to every round.
    pub stable_rate_bps: u32,
    /// Smallest accepted round principal.
    pub minimum_deposit: i128,
    pub bonus_rate_mode: BonusRateMode,
    pub reward_system: Option<Address>,
    pub price_oracle: Option<Address>,
    /// Asset trade rewards are paid in.
    pub trade_token: Option<Address>,
}

// ─── Settlement ────────────────────────────────────────────────────────────

/// Totals paid out by one `withdraw_all` call.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Settlement {
    pub rounds_settled: u32,
    pub principal: i128,
    pub stable_reward: i128,
    pub bonus_reward: i128,
    /// Paid in the trade token, separately from the other three.
    pub trade_reward: i128,
}

/// Running totals over a lender's unsettled rounds at the current time.
/// Trade rewards are left out: they depend on a live quote per round.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct LenderPosition {
    pub open_rounds: u32,
    pub principal: i128,
    pub stable_reward: i128,
    pub bonus_reward: i128,
}

// ─── Storage keys ──────────────────────────────────────────────────────────

#[contracttype]
pub enum DataKey {
    /// Operator address.
    Admin,
    /// PoolConfig.
    Config,
    /// Number of rounds ever opened by a lender.
    RoundCount(Address),
    /// Round at (lender, index).
    Round(Address, u32),
}
