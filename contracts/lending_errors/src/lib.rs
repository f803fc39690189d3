#![no_std]

use soroban_sdk::contracterror;

/// @title  ErrorCategory
/// @notice Groups errors by domain for monitoring and off-chain handling.
/// @dev    Consumers should switch on this value first, then on the specific
///         `ContractError` code.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ErrorCategory {
    /// Contract setup and initialization errors (codes 1-99).
    Initialization,
    /// Caller identity and permission errors (codes 100-199).
    Authorization,
    /// Round lifecycle and deposit policy errors (codes 200-299).
    Round,
    /// Trade-reward conversion errors (codes 300-399).
    Oracle,
    /// Bonus-rate registry errors (codes 400-499).
    Registry,
    /// Safe-math errors (codes 700-799).
    Arithmetic,
}

/// @title  ContractError
/// @notice Error enum shared by the lender pool, reward system and trade oracle.
/// @dev    Codes are wire-stable. Never renumber a variant after deployment.
///         Append new variants at the end of their category block only.
///
/// Error Code Layout:
///   1  -  99  : Initialization
///   100 - 199 : Authorization
///   200 - 299 : Round
///   300 - 399 : Oracle
///   400 - 499 : Registry
///   700 - 799 : Arithmetic
#[contracterror]
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
#[repr(u32)]
pub enum ContractError {
    // --- Initialization (1-99) ---
    /// Contract has not been initialized yet.
    /// Contracts: pool, reward_system, trade_oracle
    NotInitialized = 1,

    /// Contract has already been initialized and cannot be re-initialized.
    /// Contracts: pool, reward_system, trade_oracle
    AlreadyInitialized = 2,

    // --- Authorization (100-199) ---
    /// Caller is not the configured operator.
    /// Contracts: pool, reward_system, trade_oracle
    Unauthorized = 100,

    // --- Round (200-299) ---
    /// Deposit amount is under the pool's minimum deposit.
    /// Contracts: pool
    BelowMinimumDeposit = 200,

    /// Amount argument is zero or negative where a positive value is required.
    /// Contracts: pool
    InvalidAmount = 201,

    /// Round tenure must be at least one day.
    /// Contracts: pool
    InvalidTenure = 202,

    /// No round exists at the given index for this lender.
    /// Contracts: pool
    RoundNotFound = 203,

    /// Lender has no round left to settle.
    /// Contracts: pool
    NothingToWithdraw = 204,

    /// Lender has not approved the pool for the deposit amount.
    /// Contracts: pool
    InsufficientAllowance = 205,

    /// Pool custody does not cover the settlement.
    /// Contracts: pool
    InsufficientLiquidity = 206,

    /// The round-opening entry point does not match the pool's bonus-rate mode.
    /// Contracts: pool
    BonusRateModeMismatch = 207,

    // --- Oracle (300-399) ---
    /// Trade-reward conversion failed or produced a degenerate quote.
    /// Contracts: pool, trade_oracle
    OracleUnavailable = 300,

    /// A trade reward is owed but no trade token is configured.
    /// Contracts: pool
    TradeTokenNotSet = 301,

    /// Route fee is outside 0-9999 bps.
    /// Contracts: trade_oracle
    InvalidRoute = 302,

    // --- Registry (400-499) ---
    /// Pool runs in registry mode but no reward system is wired.
    /// Contracts: pool
    RewardSystemNotSet = 400,

    /// Call into the reward system failed.
    /// Contracts: pool
    RegistryUnavailable = 401,

    // --- Arithmetic (700-799) ---
    /// Result of a checked computation does not fit its target type.
    /// Contracts: pool, trade_oracle
    Overflow = 700,
}

/// @title  ErrorExt
/// @notice Provides category() and description() on every ContractError variant.
pub trait ErrorExt {
    /// @return The ErrorCategory bucket this error belongs to.
    fn category(&self) -> ErrorCategory;

    /// @return A static string description safe for logging or display.
    fn description(&self) -> &'static str;
}

impl ErrorExt for ContractError {
    fn category(&self) -> ErrorCategory {
        match self {
            ContractError::NotInitialized | ContractError::AlreadyInitialized => {
                ErrorCategory::Initialization
            }
            ContractError::Unauthorized => ErrorCategory::Authorization,

            ContractError::BelowMinimumDeposit
            | ContractError::InvalidAmount
            | ContractError::InvalidTenure
            | ContractError::RoundNotFound
            | ContractError::NothingToWithdraw
            | ContractError::InsufficientAllowance
            | ContractError::InsufficientLiquidity
            | ContractError::BonusRateModeMismatch => ErrorCategory::Round,

            ContractError::OracleUnavailable
            | ContractError::TradeTokenNotSet
            | ContractError::InvalidRoute => ErrorCategory::Oracle,

            ContractError::RewardSystemNotSet | ContractError::RegistryUnavailable => {
                ErrorCategory::Registry
            }

            ContractError::Overflow => ErrorCategory::Arithmetic,
        }
    }

    fn description(&self) -> &'static str {
        match self {
            ContractError::NotInitialized => "Contract has not been initialized",
            ContractError::AlreadyInitialized => "Contract has already been initialized",
            ContractError::Unauthorized => "Caller is not the operator",
            ContractError::BelowMinimumDeposit => "Amount is lower than the minimum deposit",
            ContractError::InvalidAmount => "Amount must be strictly positive",
            ContractError::InvalidTenure => "Tenure must be at least one day",
            ContractError::RoundNotFound => "No round found at the given index",
            ContractError::NothingToWithdraw => "Lender has no round left to withdraw",
            ContractError::InsufficientAllowance => "Token allowance is lower than the amount",
            ContractError::InsufficientLiquidity => "Pool balance does not cover the settlement",
            ContractError::BonusRateModeMismatch => {
                "Entry point does not match the pool bonus-rate mode"
            }
            ContractError::OracleUnavailable => "Trade reward conversion is unavailable",
            ContractError::TradeTokenNotSet => "Trade token has not been configured",
            ContractError::InvalidRoute => "Oracle route fee is out of range",
            ContractError::RewardSystemNotSet => "Reward system contract has not been set",
            ContractError::RegistryUnavailable => "Reward system call failed",
            ContractError::Overflow => "Integer overflow in checked arithmetic",
        }
    }
}
