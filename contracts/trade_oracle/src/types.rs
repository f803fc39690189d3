use soroban_sdk::{contracttype, Address, Vec};

/// One leg of a conversion path.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Hop {
    /// AMM pair contract exposing `get_reserves() -> (i128, i128)`.
    pub pair: Address,
    /// true when the hop sells the pair's first asset for its second.
    pub zero_for_one: bool,
}

/// Conversion path from the pool asset to the trade token.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Route {
    /// Swap fee charged by every pair on the path, in basis points.
    pub fee_bps: u32,
    pub hops: Vec<Hop>,
}

#[contracttype]
#[derive(Clone)]
pub enum DataKey {
    Admin,
    Route,
}
