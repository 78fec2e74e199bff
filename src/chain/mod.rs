//! Read-only access to deployed contract state.
//!
//! The host runtime owns the RPC connection and the contract bindings; handlers
//! only see this trait. Every call may revert, and a revert is reported as a
//! value rather than a panic so that callers decide whether it ends an
//! enumeration or aborts the event.

use alloy::primitives::{Address, U256};
use async_trait::async_trait;
use thiserror::Error;

/// One entry of a cellar's `cellarTickInfo(index)` list
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TickInfo {
    /// Position manager token id
    pub token_id: U256,
    pub tick_upper: i32,
    pub tick_lower: i32,
    pub weight: u32,
}

/// Raw token amounts currently held by a position
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PositionAmounts {
    pub amount0: U256,
    pub amount1: U256,
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CallError {
    /// The contract executed and reverted (out-of-range index, burned position, ...)
    #[error("{method} reverted")]
    Reverted { method: &'static str },

    /// The call never produced a result
    #[error("{method} failed: {reason}")]
    Transport { method: &'static str, reason: String },
}

impl CallError {
    pub fn is_revert(&self) -> bool {
        matches!(self, CallError::Reverted { .. })
    }
}

/// Chain state reads used by the mappings
#[async_trait]
pub trait ChainReader: Send + Sync {
    async fn token_symbol(&self, token: Address) -> Result<String, CallError>;

    async fn token_name(&self, token: Address) -> Result<String, CallError>;

    async fn token_decimals(&self, token: Address) -> Result<u32, CallError>;

    async fn token_total_supply(&self, token: Address) -> Result<U256, CallError>;

    async fn cellar_token0(&self, cellar: Address) -> Result<Address, CallError>;

    async fn cellar_token1(&self, cellar: Address) -> Result<Address, CallError>;

    /// Uniswap fee tier of the cellar's pool (e.g. 3000 = 0.3%)
    async fn cellar_fee_level(&self, cellar: Address) -> Result<u32, CallError>;

    /// Management fee in basis points
    async fn cellar_fee(&self, cellar: Address) -> Result<u32, CallError>;

    /// Probe the cellar's position list; reverts past the last index
    async fn cellar_tick_info(&self, cellar: Address, index: u64) -> Result<TickInfo, CallError>;

    /// Current amounts of a position, from the position manager
    async fn position_amounts(&self, token_id: U256) -> Result<PositionAmounts, CallError>;
}
