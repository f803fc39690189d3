//! Token custody helpers.
//! Centralizes allowance checks and transfers for the pool asset and the
//! trade token.

use lending_errors::ContractError;
use soroban_sdk::token::TokenClient;
use soroban_sdk::{Address, Env};

/// @notice Fails unless `owner` has approved the pool for at least `amount`.
pub fn require_allowance(
    e: &Env,
    token: &Address,
    owner: &Address,
    amount: i128,
) -> Result<(), ContractError> {
    let contract = e.current_contract_address();
    let allowance = TokenClient::new(e, token).allowance(owner, &contract);
    if allowance < amount {
        return Err(ContractError::InsufficientAllowance);
    }
    Ok(())
}

/// @notice Pulls `amount` of `token` from `owner` into pool custody.
/// @dev Requires prior approval for the pool as spender.
pub fn transfer_into_contract(
    e: &Env,
    token: &Address,
    owner: &Address,
    amount: i128,
) -> Result<(), ContractError> {
    if amount < 0 {
        return Err(ContractError::InvalidAmount);
    }
    if amount == 0 {
        return Ok(());
    }

    require_allowance(e, token, owner, amount)?;
    let contract = e.current_contract_address();
    TokenClient::new(e, token).transfer_from(&contract, owner, &contract, &amount);
    Ok(())
}

/// @notice Pays `amount` of `token` from pool custody to `recipient`.
pub fn transfer_from_contract(
    e: &Env,
    token: &Address,
    recipient: &Address,
    amount: i128,
) -> Result<(), ContractError> {
    if amount < 0 {
        return Err(ContractError::InvalidAmount);
    }
    if amount == 0 {
        return Ok(());
    }

    let client = TokenClient::new(e, token);
    let contract = e.current_contract_address();
    if client.balance(&contract) < amount {
        return Err(ContractError::InsufficientLiquidity);
    }
    client.transfer(&contract, recipient, &amount);
    Ok(())
}
