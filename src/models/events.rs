//! Decoded contract events handed to the handlers by the host runtime

use alloy::primitives::{Address, U256};
use serde::{Deserialize, Serialize};

use crate::error::{IndexerError, Result};

/// Block metadata attached to every event
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EventBlock {
    /// Unix seconds
    pub timestamp: u64,
    pub number: u64,
}

impl EventBlock {
    pub fn timestamp_i64(&self) -> Result<i64> {
        i64::try_from(self.timestamp).map_err(|_| IndexerError::OutOfRange {
            field: "block timestamp",
            value: self.timestamp,
        })
    }

    pub fn number_i64(&self) -> Result<i64> {
        i64::try_from(self.number).map_err(|_| IndexerError::OutOfRange {
            field: "block number",
            value: self.number,
        })
    }
}

/// Cellar `AddedLiquidity(token0, token1, liquidity, amount0, amount1)`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddedLiquidity {
    /// Emitting cellar
    pub address: Address,
    pub block: EventBlock,
    pub token0: Address,
    pub token1: Address,
    pub liquidity: u128,
    pub amount0: U256,
    pub amount1: U256,
}

/// Cellar `RemovedLiquidity(token0, token1, liquidity, amount0, amount1)`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RemovedLiquidity {
    pub address: Address,
    pub block: EventBlock,
    pub token0: Address,
    pub token1: Address,
    pub liquidity: u128,
    pub amount0: U256,
    pub amount1: U256,
}

/// Cellar rebalance: net performance fees taken and the amounts now deployed
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Rebalance {
    pub address: Address,
    pub block: EventBlock,
    pub fees0: U256,
    pub fees1: U256,
    pub amount0: U256,
    pub amount1: U256,
}

/// Cellar reinvest: net performance fees taken and the amounts added back
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Reinvest {
    pub address: Address,
    pub block: EventBlock,
    pub fees0: U256,
    pub fees1: U256,
    pub amount0: U256,
    pub amount1: U256,
}

/// Factory `PoolCreated(token0, token1, fee, tickSpacing, pool)`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PoolCreated {
    /// Emitting factory
    pub address: Address,
    pub block: EventBlock,
    pub token0: Address,
    pub token1: Address,
    pub fee: u32,
    pub tick_spacing: i32,
    pub pool: Address,
}

/// Any event the indexer knows how to handle
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum IndexedEvent {
    AddedLiquidity(AddedLiquidity),
    RemovedLiquidity(RemovedLiquidity),
    Rebalance(Rebalance),
    Reinvest(Reinvest),
    PoolCreated(PoolCreated),
}

impl IndexedEvent {
    pub fn name(&self) -> &'static str {
        match self {
            IndexedEvent::AddedLiquidity(_) => "AddedLiquidity",
            IndexedEvent::RemovedLiquidity(_) => "RemovedLiquidity",
            IndexedEvent::Rebalance(_) => "Rebalance",
            IndexedEvent::Reinvest(_) => "Reinvest",
            IndexedEvent::PoolCreated(_) => "PoolCreated",
        }
    }

    pub fn block(&self) -> EventBlock {
        match self {
            IndexedEvent::AddedLiquidity(e) => e.block,
            IndexedEvent::RemovedLiquidity(e) => e.block,
            IndexedEvent::Rebalance(e) => e.block,
            IndexedEvent::Reinvest(e) => e.block,
            IndexedEvent::PoolCreated(e) => e.block,
        }
    }
}
