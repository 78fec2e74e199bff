#![allow(dead_code)]

use alloy::primitives::{Address, U256, address};
use async_trait::async_trait;
use parking_lot::Mutex;
use rust_decimal::Decimal;
use std::collections::{BTreeMap, HashMap};

use cellar_indexer::chain::{CallError, ChainReader, PositionAmounts, TickInfo};
use cellar_indexer::entities::{bundle, token};
use cellar_indexer::models::events::EventBlock;
use cellar_indexer::services::accessors::new_token;
use cellar_indexer::store::{ChangeSet, EntityStore, MemoryStore};
use cellar_indexer::utils::address_to_id;

pub const CELLAR: Address = address!("6ea5992ab4a78d5720bd12a089d13c073d04b55d");
pub const FACTORY: Address = address!("1f98431c8ad98523631ae4a59f267346ea31f984");
pub const WETH: Address = address!("c02aaa39b223fe8d0a0e5c4f27ead9083c756cc2");
pub const USDC: Address = address!("a0b86991c6218b36c1d19d4a2e9eb0ce3606eb48");

/// USDC/WETH 0.3% pool, derived from the factory
pub const USDC_WETH_3000: &str = "0x8ad599c3a0ff1de082011efddc58f1908eb6e6d8";

/// Raw integer amount for `whole` units of a token with `decimals`
pub fn raw(whole: u128, decimals: u32) -> U256 {
    U256::from(whole) * U256::from(10u8).pow(U256::from(decimals))
}

pub fn block(timestamp: u64, number: u64) -> EventBlock {
    EventBlock { timestamp, number }
}

#[derive(Debug, Clone)]
pub struct MockToken {
    pub symbol: Option<String>,
    pub name: Option<String>,
    /// `None` makes `decimals()` revert
    pub decimals: Option<u32>,
    pub total_supply: U256,
}

#[derive(Debug, Clone)]
pub struct MockCellar {
    pub token0: Address,
    pub token1: Address,
    pub fee_level: u32,
    pub fee: u32,
    pub ticks: Vec<TickInfo>,
    /// Index at which `cellarTickInfo` fails without reverting
    pub broken_tick: Option<u64>,
}

/// Chain reader answering from in-memory fixtures
#[derive(Default)]
pub struct MockChain {
    pub tokens: HashMap<Address, MockToken>,
    pub cellars: HashMap<Address, MockCellar>,
    pub positions: Mutex<HashMap<U256, PositionAmounts>>,
    pub broken_positions: HashMap<U256, CallError>,
    pub broken_decimals: HashMap<Address, CallError>,
    pub broken_supply: HashMap<Address, CallError>,
    /// Every `cellarTickInfo` index probed, in call order
    pub probed: Mutex<Vec<u64>>,
}

impl MockChain {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_token(mut self, token: Address, symbol: &str, decimals: u32) -> Self {
        self.tokens.insert(
            token,
            MockToken {
                symbol: Some(symbol.to_string()),
                name: Some(format!("{} token", symbol)),
                decimals: Some(decimals),
                total_supply: raw(1_000_000, decimals),
            },
        );
        self
    }

    /// Token whose `decimals()` reverts
    pub fn with_token_without_decimals(mut self, token: Address) -> Self {
        self.tokens.insert(
            token,
            MockToken {
                symbol: None,
                name: None,
                decimals: None,
                total_supply: U256::ZERO,
            },
        );
        self
    }

    pub fn with_cellar(mut self, cellar: Address, token0: Address, token1: Address, fee_level: u32, fee: u32) -> Self {
        self.cellars.insert(
            cellar,
            MockCellar {
                token0,
                token1,
                fee_level,
                fee,
                ticks: Vec::new(),
                broken_tick: None,
            },
        );
        self
    }

    pub fn with_position(
        mut self,
        cellar: Address,
        token_id: u64,
        tick_lower: i32,
        tick_upper: i32,
        amount0: U256,
        amount1: U256,
    ) -> Self {
        let token_id = U256::from(token_id);
        if let Some(mock) = self.cellars.get_mut(&cellar) {
            mock.ticks.push(TickInfo {
                token_id,
                tick_upper,
                tick_lower,
                weight: 1,
            });
        }
        self.positions
            .get_mut()
            .insert(token_id, PositionAmounts { amount0, amount1 });
        self
    }

    pub fn with_broken_position(mut self, token_id: u64, error: CallError) -> Self {
        self.broken_positions.insert(U256::from(token_id), error);
        self
    }

    pub fn with_broken_tick(mut self, cellar: Address, index: u64) -> Self {
        if let Some(mock) = self.cellars.get_mut(&cellar) {
            mock.broken_tick = Some(index);
        }
        self
    }

    pub fn with_broken_decimals(mut self, token: Address, error: CallError) -> Self {
        self.broken_decimals.insert(token, error);
        self
    }

    pub fn with_broken_supply(mut self, token: Address, error: CallError) -> Self {
        self.broken_supply.insert(token, error);
        self
    }

    /// Change what a position reports from now on
    pub fn set_position_amounts(&self, token_id: u64, amount0: U256, amount1: U256) {
        self.positions
            .lock()
            .insert(U256::from(token_id), PositionAmounts { amount0, amount1 });
    }

    fn token(&self, token: Address, method: &'static str) -> Result<&MockToken, CallError> {
        self.tokens.get(&token).ok_or(CallError::Reverted { method })
    }

    fn cellar(&self, cellar: Address, method: &'static str) -> Result<&MockCellar, CallError> {
        self.cellars.get(&cellar).ok_or(CallError::Reverted { method })
    }
}

#[async_trait]
impl ChainReader for MockChain {
    async fn token_symbol(&self, token: Address) -> Result<String, CallError> {
        self.token(token, "symbol")?
            .symbol
            .clone()
            .ok_or(CallError::Reverted { method: "symbol" })
    }

    async fn token_name(&self, token: Address) -> Result<String, CallError> {
        self.token(token, "name")?
            .name
            .clone()
            .ok_or(CallError::Reverted { method: "name" })
    }

    async fn token_decimals(&self, token: Address) -> Result<u32, CallError> {
        if let Some(error) = self.broken_decimals.get(&token) {
            return Err(error.clone());
        }
        self.token(token, "decimals")?
            .decimals
            .ok_or(CallError::Reverted { method: "decimals" })
    }

    async fn token_total_supply(&self, token: Address) -> Result<U256, CallError> {
        if let Some(error) = self.broken_supply.get(&token) {
            return Err(error.clone());
        }
        Ok(self.token(token, "totalSupply")?.total_supply)
    }

    async fn cellar_token0(&self, cellar: Address) -> Result<Address, CallError> {
        Ok(self.cellar(cellar, "token0")?.token0)
    }

    async fn cellar_token1(&self, cellar: Address) -> Result<Address, CallError> {
        Ok(self.cellar(cellar, "token1")?.token1)
    }

    async fn cellar_fee_level(&self, cellar: Address) -> Result<u32, CallError> {
        Ok(self.cellar(cellar, "feeLevel")?.fee_level)
    }

    async fn cellar_fee(&self, cellar: Address) -> Result<u32, CallError> {
        Ok(self.cellar(cellar, "fee")?.fee)
    }

    async fn cellar_tick_info(&self, cellar: Address, index: u64) -> Result<TickInfo, CallError> {
        self.probed.lock().push(index);
        let mock = self.cellar(cellar, "cellarTickInfo")?;
        if mock.broken_tick == Some(index) {
            return Err(CallError::Transport {
                method: "cellarTickInfo",
                reason: "connection reset".to_string(),
            });
        }
        usize::try_from(index)
            .ok()
            .and_then(|i| mock.ticks.get(i).copied())
            .ok_or(CallError::Reverted {
                method: "cellarTickInfo",
            })
    }

    async fn position_amounts(&self, token_id: U256) -> Result<PositionAmounts, CallError> {
        if let Some(error) = self.broken_positions.get(&token_id) {
            return Err(error.clone());
        }
        self.positions
            .lock()
            .get(&token_id)
            .copied()
            .ok_or(CallError::Reverted { method: "positions" })
    }
}

pub fn bundle_model(eth_price_usd: Decimal) -> bundle::Model {
    bundle::Model {
        id: "1".to_string(),
        eth_price_usd,
    }
}

pub fn token_model(token: Address, symbol: &str, decimals: i32, derived_eth: Decimal) -> token::Model {
    let mut model = new_token(
        address_to_id(&token),
        symbol.to_string(),
        format!("{} token", symbol),
        decimals,
        U256::ZERO,
    );
    model.derived_eth = derived_eth;
    model
}

/// Store holding the price bundle and both priced tokens:
/// ETH at `eth_price_usd`, WETH at 1 ETH, USDC at 0.0005 ETH
pub async fn priced_store(eth_price_usd: Decimal) -> MemoryStore {
    let store = MemoryStore::new();
    let weth = token_model(WETH, "WETH", 18, Decimal::ONE);
    let usdc = token_model(USDC, "USDC", 6, Decimal::new(5, 4));

    store
        .commit(ChangeSet {
            bundles: BTreeMap::from([("1".to_string(), bundle_model(eth_price_usd))]),
            tokens: BTreeMap::from([(weth.id.clone(), weth), (usdc.id.clone(), usdc)]),
            ..Default::default()
        })
        .await
        .unwrap();
    store
}
