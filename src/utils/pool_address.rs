//! Deterministic Uniswap V3 pool addresses (CREATE2 from the factory)

use alloy::primitives::{Address, aliases::U24, keccak256};
use alloy::sol_types::{SolType, sol_data};

use super::constants::{POOL_INIT_CODE_HASH, UNISWAP_V3_FACTORY};

/// `(address token0, address token1, uint24 fee)`, the factory's salt preimage
type PoolKey = (sol_data::Address, sol_data::Address, sol_data::Uint<24>);

/// Address of the pool for `(token_a, token_b, fee)` deployed by `factory`.
/// Token order does not matter.
pub fn compute_pool_address(factory: Address, token_a: Address, token_b: Address, fee: u32) -> Address {
    let (token0, token1) = if token_a < token_b {
        (token_a, token_b)
    } else {
        (token_b, token_a)
    };

    let salt = keccak256(PoolKey::abi_encode_params(&(token0, token1, U24::from(fee))));
    factory.create2(salt, POOL_INIT_CODE_HASH)
}

/// Pool address on the mainnet Uniswap V3 factory
pub fn uniswap_v3_pool_address(token_a: Address, token_b: Address, fee: u32) -> Address {
    compute_pool_address(UNISWAP_V3_FACTORY, token_a, token_b, fee)
}

/// Tick spacing the factory enables for a fee tier
pub fn tick_spacing_for_fee(fee: u32) -> Option<i32> {
    match fee {
        100 => Some(1),
        500 => Some(10),
        3000 => Some(60),
        10000 => Some(200),
        _ => None,
    }
}
