//! Tests for stable and bonus accrual: observed scenarios, plateau and
//! monotonicity.

#![cfg(test)]

use crate::test_helpers::*;
use crate::ContractError;
use soroban_sdk::testutils::Address as _;
use soroban_sdk::{Address, Env};

/// Reward at the tenure cap: `principal * rate * tenure_days / (10_000 * 365)`.
fn capped_reward(principal: i128, rate_bps: u32, tenure_days: u32) -> i128 {
    principal * rate_bps as i128 * tenure_days as i128 / (10_000 * 365)
}

#[test]
fn test_rewards_zero_at_creation() {
    let e = Env::default();
    let (client, _admin, lender, _token, _cid) = setup(&e, 500);
    client.new_round(&lender, &(1_000 * USDT), &1_000, &30, &true);

    assert_eq!(client.stable_reward_of(&0, &lender), 0);
    assert_eq!(client.bonus_reward_of(&0, &lender), 0);
}

#[test]
fn test_scenario_five_percent_pool_after_thirty_one_days() {
    let e = Env::default();
    let (client, _admin, lender, _token, _cid) = setup(&e, 500);
    client.new_round(&lender, &(1_000 * USDT), &1_000, &30, &true);

    advance(&e, 31 * ONE_DAY);

    assert_eq!(client.stable_reward_of(&0, &lender), 4_109_589);
    assert_eq!(client.bonus_reward_of(&0, &lender), 8_219_178);
}

#[test]
fn test_scenario_small_lender_in_five_percent_pool() {
    let e = Env::default();
    let (client, _admin, lender, _token, _cid) = setup(&e, 500);
    client.new_round(&lender, &(100 * USDT), &800, &30, &true);

    assert_eq!(client.stable_reward_of(&0, &lender), 0);
    advance(&e, 31 * ONE_DAY);

    assert_eq!(client.stable_reward_of(&0, &lender), 410_958);
    assert_eq!(client.bonus_reward_of(&0, &lender), 657_534);
}

#[test]
fn test_scenario_eight_percent_pool_after_sixty_days() {
    let e = Env::default();
    let (client, admin, lender, _token, _cid) = setup(&e, 800);
    client.set_minimum_deposit(&admin, &(1_000 * USDT));
    client.new_round(&lender, &(5_000 * USDT), &700, &60, &false);

    advance(&e, 60 * ONE_DAY);

    assert_eq!(client.stable_reward_of(&0, &lender), 65_753_424);
    assert_eq!(client.bonus_reward_of(&0, &lender), 57_534_246);
}

#[test]
fn test_scenario_eighteen_decimal_asset() {
    let e = Env::default();
    let (client, admin, _lender, token, cid) = setup(&e, 600);
    let one = 1_000_000_000_000_000_000_i128;
    let lender = funded_lender(&e, &token, &cid, 500 * one);
    client.set_minimum_deposit(&admin, &(100 * one));
    client.new_round(&lender, &(500 * one), &1_100, &30, &false);
    assert_eq!(balance(&e, &token, &lender), 0);

    advance(&e, 31 * ONE_DAY);

    assert_eq!(client.stable_reward_of(&0, &lender), 2_465_753_424_657_534_246);
    assert_eq!(client.bonus_reward_of(&0, &lender), 4_520_547_945_205_479_452);
}

#[test]
fn test_reward_plateaus_at_tenure() {
    let e = Env::default();
    let (client, _admin, lender, _token, _cid) = setup(&e, 500);
    client.new_round(&lender, &(1_000 * USDT), &1_000, &30, &false);
    let expected_stable = capped_reward(1_000 * USDT, 500, 30);
    let expected_bonus = capped_reward(1_000 * USDT, 1_000, 30);

    for days in [30_u64, 31, 90, 365, 3_650] {
        set_time(&e, days * ONE_DAY);
        assert_eq!(client.stable_reward_of(&0, &lender), expected_stable);
        assert_eq!(client.bonus_reward_of(&0, &lender), expected_bonus);
    }
}

#[test]
fn test_reward_monotonic_until_cap() {
    let e = Env::default();
    let (client, _admin, lender, _token, _cid) = setup(&e, 500);
    client.new_round(&lender, &(777 * USDT), &1_234, &45, &false);

    let mut last_stable = 0;
    let mut last_bonus = 0;
    let mut t = 0_u64;
    while t <= 60 * ONE_DAY {
        set_time(&e, t);
        let stable = client.stable_reward_of(&0, &lender);
        let bonus = client.bonus_reward_of(&0, &lender);
        assert!(stable >= last_stable);
        assert!(bonus >= last_bonus);
        last_stable = stable;
        last_bonus = bonus;
        t += ONE_DAY / 4;
    }
    assert_eq!(last_stable, capped_reward(777 * USDT, 500, 45));
}

#[test]
fn test_partial_tenure_accrues_pro_rata() {
    let e = Env::default();
    let (client, _admin, lender, _token, _cid) = setup(&e, 500);
    client.new_round(&lender, &(1_000 * USDT), &1_000, &30, &false);

    advance(&e, 15 * ONE_DAY);

    assert_eq!(
        client.stable_reward_of(&0, &lender),
        capped_reward(1_000 * USDT, 500, 15)
    );
}

#[test]
fn test_four_rounds_are_independent() {
    let e = Env::default();
    let (client, _admin, lender, _token, _cid) = setup(&e, 500);
    let params: [(i128, u32, u32); 4] = [
        (1_000 * USDT, 1_000, 30),
        (1_100 * USDT, 1_100, 31),
        (1_200 * USDT, 1_200, 32),
        (1_300 * USDT, 1_300, 33),
    ];
    for (amount, bonus, tenure) in params {
        client.new_round(&lender, &amount, &bonus, &tenure, &false);
    }

    advance(&e, 40 * ONE_DAY);

    for (index, (amount, bonus, tenure)) in params.iter().enumerate() {
        let index = index as u32;
        assert_eq!(
            client.stable_reward_of(&index, &lender),
            capped_reward(*amount, 500, *tenure)
        );
        assert_eq!(
            client.bonus_reward_of(&index, &lender),
            capped_reward(*amount, *bonus, *tenure)
        );
    }
}

#[test]
fn test_rounds_started_at_different_times() {
    let e = Env::default();
    set_time(&e, 0);
    let (client, _admin, lender, _token, _cid) = setup(&e, 500);
    client.new_round(&lender, &(1_000 * USDT), &0, &30, &false);
    set_time(&e, 10 * ONE_DAY);
    client.new_round(&lender, &(1_000 * USDT), &0, &30, &false);

    set_time(&e, 20 * ONE_DAY);

    assert_eq!(
        client.stable_reward_of(&0, &lender),
        capped_reward(1_000 * USDT, 500, 20)
    );
    assert_eq!(
        client.stable_reward_of(&1, &lender),
        capped_reward(1_000 * USDT, 500, 10)
    );
    // Zero bonus rate accrues nothing.
    assert_eq!(client.bonus_reward_of(&1, &lender), 0);
}

#[test]
fn test_reward_query_for_missing_round() {
    let e = Env::default();
    let (client, _admin, lender, _token, _cid) = setup(&e, 500);
    assert_eq!(
        client.try_stable_reward_of(&0, &lender),
        Err(Ok(ContractError::RoundNotFound))
    );
    assert_eq!(
        client.try_bonus_reward_of(&3, &lender),
        Err(Ok(ContractError::RoundNotFound))
    );
}

#[test]
fn test_max_principal_does_not_overflow_intermediate() {
    let e = Env::default();
    let (client, _admin, _lender, token, cid) = setup(&e, 500);
    let principal = i128::MAX - DEFAULT_MINT - POOL_RESERVE;
    let whale = funded_lender(&e, &token, &cid, principal);
    client.new_round(&whale, &principal, &10_000, &365, &false);

    advance(&e, 365 * ONE_DAY);

    // A full year at 5% and 100%: the year factors cancel exactly.
    assert_eq!(client.stable_reward_of(&0, &whale), principal / 20);
    assert_eq!(client.bonus_reward_of(&0, &whale), principal);
}

#[test]
fn test_unrepresentable_reward_reports_overflow() {
    let e = Env::default();
    let (client, _admin, _lender, token, cid) = setup(&e, 500);
    let principal = i128::MAX - DEFAULT_MINT - POOL_RESERVE;
    let whale = funded_lender(&e, &token, &cid, principal);
    client.new_round(&whale, &principal, &u32::MAX, &365, &false);

    advance(&e, 365 * ONE_DAY);

    assert_eq!(
        client.try_bonus_reward_of(&0, &whale),
        Err(Ok(ContractError::Overflow))
    );
}

#[test]
fn test_position_sums_open_rounds() {
    let e = Env::default();
    let (client, _admin, lender, _token, _cid) = setup(&e, 500);
    client.new_round(&lender, &(1_000 * USDT), &1_000, &30, &false);
    client.new_round(&lender, &(5_000 * USDT), &700, &60, &true);

    advance(&e, 31 * ONE_DAY);
    let position = client.position_of(&lender);

    assert_eq!(position.open_rounds, 2);
    assert_eq!(position.principal, 6_000 * USDT);
    assert_eq!(
        position.stable_reward,
        client.stable_reward_of(&0, &lender) + client.stable_reward_of(&1, &lender)
    );
    assert_eq!(
        position.bonus_reward,
        client.bonus_reward_of(&0, &lender) + client.bonus_reward_of(&1, &lender)
    );
}

#[test]
fn test_position_matches_next_settlement() {
    let e = Env::default();
    let (client, _admin, lender, _token, _cid) = setup(&e, 500);
    client.new_round(&lender, &(1_000 * USDT), &1_000, &30, &false);
    client.new_round(&lender, &(2_000 * USDT), &0, &90, &false);
    advance(&e, 45 * ONE_DAY);

    let position = client.position_of(&lender);
    let settlement = client.withdraw_all(&lender);

    assert_eq!(position.open_rounds, settlement.rounds_settled);
    assert_eq!(position.principal, settlement.principal);
    assert_eq!(position.stable_reward, settlement.stable_reward);
    assert_eq!(position.bonus_reward, settlement.bonus_reward);
}

#[test]
fn test_position_skips_settled_rounds() {
    let e = Env::default();
    let (client, _admin, lender, _token, _cid) = setup(&e, 500);
    client.new_round(&lender, &(1_000 * USDT), &1_000, &30, &false);
    advance(&e, 31 * ONE_DAY);
    client.withdraw_all(&lender);
    client.new_round(&lender, &(500 * USDT), &0, &30, &false);

    let position = client.position_of(&lender);
    assert_eq!(position.open_rounds, 1);
    assert_eq!(position.principal, 500 * USDT);
    assert_eq!(position.stable_reward, 0);
    assert_eq!(position.bonus_reward, 0);
}

#[test]
fn test_position_of_unknown_lender_is_empty() {
    let e = Env::default();
    let (client, _admin, _lender, _token, _cid) = setup(&e, 500);
    let stranger = Address::generate(&e);

    let position = client.position_of(&stranger);
    assert_eq!(position.open_rounds, 0);
    assert_eq!(position.principal, 0);
}
