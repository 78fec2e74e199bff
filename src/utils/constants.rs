use alloy::primitives::{Address, B256, address, b256};

/// Id of the ETH/USD price bundle singleton
pub const BUNDLE_ID: &str = "1";

/// Uniswap V3 factory on mainnet
pub const UNISWAP_V3_FACTORY: Address = address!("1F98431c8aD98523631AE4a59f267346ea31F984");

/// keccak256 of the Uniswap V3 pool creation code
pub const POOL_INIT_CODE_HASH: B256 =
    b256!("e34f199b19b2b4f47f68442619d555527d244f78a3297ea89325f843f87b8b54");

/// Basis-point denominator for management fees (10000 = 100%)
pub const FEE_DENOMINATOR_BPS: u32 = 10_000;

/// Placeholder for raw integer columns before any on-chain value is known
pub const ZERO_RAW: &str = "0";

pub const UNKNOWN_SYMBOL: &str = "unknown";
pub const UNKNOWN_NAME: &str = "unknown";
