//! Load and lazy-init helpers for the indexed entities
//!
//! Required loads turn a missing entity into `IndexerError::EntityNotFound`.
//! The `load_or_*` variants build a zeroed entity on first sight; whether it
//! is staged right away is noted on each function.

use alloy::primitives::{Address, U256};
use rust_decimal::Decimal;

use crate::chain::{CallError, ChainReader};
use crate::entities::{bundle, cellar, factory, pool, token};
use crate::error::{IndexerError, Result};
use crate::models::events::EventBlock;
use crate::store::{EntityStore, EventContext};
use crate::utils::constants::{BUNDLE_ID, UNKNOWN_NAME, UNKNOWN_SYMBOL, ZERO_RAW};
use crate::utils::pool_address::{tick_spacing_for_fee, uniswap_v3_pool_address};
use crate::utils::{address_to_id, parse_address};

// ---------------------------------------------------------------------------
// Cellar
// ---------------------------------------------------------------------------

pub async fn load_cellar<S>(ctx: &EventContext<'_, S>, id: &str) -> Result<cellar::Model>
where
    S: EntityStore + ?Sized,
{
    tracing::debug!(cellar = %id, "Loading cellar");
    ctx.cellar(id)
        .await?
        .ok_or_else(|| IndexerError::not_found("Cellar", id))
}

/// Build a zeroed cellar from the live contract. Not staged.
pub async fn init_cellar<C>(chain: &C, address: Address) -> Result<cellar::Model>
where
    C: ChainReader + ?Sized,
{
    let id = address_to_id(&address);
    tracing::debug!(cellar = %id, "Initializing cellar");

    let token0 = chain.cellar_token0(address).await?;
    let token1 = chain.cellar_token1(address).await?;
    let fee_level = chain.cellar_fee_level(address).await?;
    let fee = chain.cellar_fee(address).await?;

    let pool = uniswap_v3_pool_address(token0, token1, fee_level);
    let fee_tier = i32::try_from(fee_level).map_err(|_| IndexerError::OutOfRange {
        field: "cellar fee level",
        value: fee_level as u64,
    })?;
    let management_fee = i32::try_from(fee).map_err(|_| IndexerError::InvalidManagementFee {
        cellar: id.clone(),
        fee_bps: fee as i64,
    })?;

    Ok(cellar::Model {
        id,
        token0: address_to_id(&token0),
        token1: address_to_id(&token1),
        pool: address_to_id(&pool),
        fee_tier,
        management_fee,
        total_deposit_amount0: Decimal::ZERO,
        total_deposit_amount1: Decimal::ZERO,
        total_deposit_usd: Decimal::ZERO,
        total_value_locked_token0: Decimal::ZERO,
        total_value_locked_token1: Decimal::ZERO,
        total_value_locked_usd: Decimal::ZERO,
        fees_collected_token0: Decimal::ZERO,
        fees_collected_token1: Decimal::ZERO,
        fees_collected_usd: Decimal::ZERO,
        fees_reinvested_token0: Decimal::ZERO,
        fees_reinvested_token1: Decimal::ZERO,
        fees_reinvested_usd: Decimal::ZERO,
    })
}

/// Stored cellar, or a fresh one from the contract. Not staged.
pub async fn load_or_init_cellar<S, C>(
    ctx: &EventContext<'_, S>,
    chain: &C,
    address: Address,
) -> Result<cellar::Model>
where
    S: EntityStore + ?Sized,
    C: ChainReader + ?Sized,
{
    match ctx.cellar(&address_to_id(&address)).await? {
        Some(cellar) => Ok(cellar),
        None => init_cellar(chain, address).await,
    }
}

// ---------------------------------------------------------------------------
// Token
// ---------------------------------------------------------------------------

pub async fn load_token<S>(ctx: &EventContext<'_, S>, id: &str) -> Result<Option<token::Model>>
where
    S: EntityStore + ?Sized,
{
    tracing::debug!(token = %id, "Loading token");
    ctx.token(id).await
}

/// Token that must already be indexed
pub async fn require_token<S>(ctx: &EventContext<'_, S>, id: &str) -> Result<token::Model>
where
    S: EntityStore + ?Sized,
{
    load_token(ctx, id)
        .await?
        .ok_or_else(|| IndexerError::not_found("Token", id))
}

/// Read token metadata from the chain.
///
/// Returns `None` when the decimals call reverts: a token without a known
/// precision cannot be indexed. A reverting symbol, name or supply call falls
/// back to a placeholder instead. Transport failures are errors either way.
pub async fn fetch_token<C>(chain: &C, address: Address) -> Result<Option<token::Model>>
where
    C: ChainReader + ?Sized,
{
    let id = address_to_id(&address);

    let decimals = match chain.token_decimals(address).await {
        Ok(decimals) => decimals,
        Err(CallError::Reverted { .. }) => {
            tracing::warn!(token = %id, "Could not determine token decimals");
            return Ok(None);
        }
        Err(e) => return Err(e.into()),
    };
    let decimals = i32::try_from(decimals).map_err(|_| IndexerError::InvalidDecimals {
        token: id.clone(),
        reason: format!("on-chain value {}", decimals),
    })?;

    let symbol = fallback_on_revert(chain.token_symbol(address).await, &id, || UNKNOWN_SYMBOL.to_string())?;
    let name = fallback_on_revert(chain.token_name(address).await, &id, || UNKNOWN_NAME.to_string())?;
    let total_supply = fallback_on_revert(chain.token_total_supply(address).await, &id, || U256::ZERO)?;

    Ok(Some(new_token(id, symbol, name, decimals, total_supply)))
}

/// A reverted metadata call takes the placeholder; any other failure is an error
fn fallback_on_revert<T>(
    result: std::result::Result<T, CallError>,
    token: &str,
    placeholder: impl FnOnce() -> T,
) -> Result<T> {
    match result {
        Ok(value) => Ok(value),
        Err(e @ CallError::Reverted { .. }) => {
            tracing::debug!(token = %token, error = %e, "Falling back to placeholder");
            Ok(placeholder())
        }
        Err(e) => Err(e.into()),
    }
}

/// Stored token, or one fetched from the chain and staged in `ctx`
pub async fn load_or_fetch_token<S, C>(
    ctx: &mut EventContext<'_, S>,
    chain: &C,
    address: Address,
) -> Result<Option<token::Model>>
where
    S: EntityStore + ?Sized,
    C: ChainReader + ?Sized,
{
    if let Some(token) = load_token(ctx, &address_to_id(&address)).await? {
        return Ok(Some(token));
    }

    let fetched = fetch_token(chain, address).await?;
    if let Some(token) = &fetched {
        tracing::info!(token = %token.id, symbol = %token.symbol, decimals = token.decimals, "Indexed new token");
        ctx.save_token(token.clone());
    }
    Ok(fetched)
}

/// Like [`load_or_fetch_token`], but a token without decimals is an error
pub async fn ensure_token<S, C>(ctx: &mut EventContext<'_, S>, chain: &C, id: &str) -> Result<token::Model>
where
    S: EntityStore + ?Sized,
    C: ChainReader + ?Sized,
{
    let address = parse_address(id)?;
    load_or_fetch_token(ctx, chain, address)
        .await?
        .ok_or_else(|| IndexerError::InvalidDecimals {
            token: id.to_string(),
            reason: "decimals call reverted".to_string(),
        })
}

pub fn new_token(id: String, symbol: String, name: String, decimals: i32, total_supply: U256) -> token::Model {
    token::Model {
        id,
        symbol,
        name,
        decimals,
        total_supply: total_supply.to_string(),
        derived_eth: Decimal::ZERO,
        volume: Decimal::ZERO,
        volume_usd: Decimal::ZERO,
        untracked_volume_usd: Decimal::ZERO,
        fees_usd: Decimal::ZERO,
        tx_count: 0,
        pool_count: 0,
        total_value_locked: Decimal::ZERO,
        total_value_locked_usd: Decimal::ZERO,
    }
}

// ---------------------------------------------------------------------------
// Pool
// ---------------------------------------------------------------------------

pub async fn load_pool<S>(ctx: &EventContext<'_, S>, id: &str) -> Result<Option<pool::Model>>
where
    S: EntityStore + ?Sized,
{
    tracing::debug!(pool = %id, "Loading pool");
    ctx.pool(id).await
}

/// Zeroed pool with every accumulator at its initial value
pub fn new_pool(
    id: String,
    token0: String,
    token1: String,
    fee_tier: i32,
    tick_spacing: i32,
    block: &EventBlock,
) -> Result<pool::Model> {
    Ok(pool::Model {
        id,
        token0,
        token1,
        fee_tier,
        tick_spacing,
        created_at_timestamp: block.timestamp_i64()?,
        created_at_block_number: block.number_i64()?,
        liquidity: ZERO_RAW.to_string(),
        sqrt_price: ZERO_RAW.to_string(),
        fee_growth_global0_x128: ZERO_RAW.to_string(),
        fee_growth_global1_x128: ZERO_RAW.to_string(),
        token0_price: Decimal::ZERO,
        token1_price: Decimal::ZERO,
        tick: None,
        observation_index: 0,
        volume_token0: Decimal::ZERO,
        volume_token1: Decimal::ZERO,
        volume_usd: Decimal::ZERO,
        untracked_volume_usd: Decimal::ZERO,
        fees_usd: Decimal::ZERO,
        tx_count: 0,
        collected_fees_token0: Decimal::ZERO,
        collected_fees_token1: Decimal::ZERO,
        collected_fees_usd: Decimal::ZERO,
        total_value_locked_token0: Decimal::ZERO,
        total_value_locked_token1: Decimal::ZERO,
        total_value_locked_eth: Decimal::ZERO,
        total_value_locked_usd: Decimal::ZERO,
        liquidity_provider_count: 0,
    })
}

/// Fallback pool for a cellar whose pool creation was never indexed
pub fn init_pool(cellar: &cellar::Model, block: &EventBlock) -> Result<pool::Model> {
    tracing::debug!(cellar = %cellar.id, pool = %cellar.pool, "Initializing pool");
    let tick_spacing = u32::try_from(cellar.fee_tier)
        .ok()
        .and_then(tick_spacing_for_fee)
        .unwrap_or_default();

    new_pool(
        cellar.pool.clone(),
        cellar.token0.clone(),
        cellar.token1.clone(),
        cellar.fee_tier,
        tick_spacing,
        block,
    )
}

/// Stored pool of `cellar`, or a fallback pool staged in `ctx`
pub async fn load_or_init_pool<S>(
    ctx: &mut EventContext<'_, S>,
    cellar: &cellar::Model,
    block: &EventBlock,
) -> Result<pool::Model>
where
    S: EntityStore + ?Sized,
{
    if let Some(pool) = load_pool(ctx, &cellar.pool).await? {
        return Ok(pool);
    }

    let pool = init_pool(cellar, block)?;
    ctx.save_pool(pool.clone());
    Ok(pool)
}

// ---------------------------------------------------------------------------
// Singletons
// ---------------------------------------------------------------------------

/// The ETH/USD price bundle; created by the first indexed pool
pub async fn load_bundle<S>(ctx: &EventContext<'_, S>) -> Result<bundle::Model>
where
    S: EntityStore + ?Sized,
{
    ctx.bundle(BUNDLE_ID)
        .await?
        .ok_or_else(|| IndexerError::not_found("Bundle", BUNDLE_ID))
}

/// Stored factory, or a zeroed one. On first use the price bundle is staged
/// too; the factory itself is left for the caller to save.
pub async fn load_or_create_factory<S>(ctx: &mut EventContext<'_, S>, id: &str) -> Result<factory::Model>
where
    S: EntityStore + ?Sized,
{
    if let Some(factory) = ctx.factory(id).await? {
        return Ok(factory);
    }

    tracing::info!(factory = %id, "Creating factory");
    if ctx.bundle(BUNDLE_ID).await?.is_none() {
        ctx.save_bundle(bundle::Model {
            id: BUNDLE_ID.to_string(),
            eth_price_usd: Decimal::ZERO,
        });
    }

    Ok(factory::Model {
        id: id.to_string(),
        pool_count: 0,
        total_volume_eth: Decimal::ZERO,
        total_volume_usd: Decimal::ZERO,
        untracked_volume_usd: Decimal::ZERO,
        total_value_locked_eth: Decimal::ZERO,
        total_value_locked_usd: Decimal::ZERO,
        tx_count: 0,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryStore;

    fn block() -> EventBlock {
        EventBlock {
            timestamp: 1_630_000_000,
            number: 13_100_000,
        }
    }

    fn cellar(fee_tier: i32) -> cellar::Model {
        cellar::Model {
            id: "0xcellar".to_string(),
            token0: "0xtoken0".to_string(),
            token1: "0xtoken1".to_string(),
            pool: "0xpool".to_string(),
            fee_tier,
            management_fee: 2000,
            total_deposit_amount0: Decimal::ZERO,
            total_deposit_amount1: Decimal::ZERO,
            total_deposit_usd: Decimal::ZERO,
            total_value_locked_token0: Decimal::ZERO,
            total_value_locked_token1: Decimal::ZERO,
            total_value_locked_usd: Decimal::ZERO,
            fees_collected_token0: Decimal::ZERO,
            fees_collected_token1: Decimal::ZERO,
            fees_collected_usd: Decimal::ZERO,
            fees_reinvested_token0: Decimal::ZERO,
            fees_reinvested_token1: Decimal::ZERO,
            fees_reinvested_usd: Decimal::ZERO,
        }
    }

    #[test]
    fn test_init_pool_is_seeded_from_cellar() {
        let pool = init_pool(&cellar(3000), &block()).unwrap();
        assert_eq!(pool.id, "0xpool");
        assert_eq!(pool.token0, "0xtoken0");
        assert_eq!(pool.fee_tier, 3000);
        assert_eq!(pool.tick_spacing, 60);
        assert_eq!(pool.created_at_timestamp, 1_630_000_000);
        assert_eq!(pool.liquidity, "0");
        assert_eq!(pool.tick, None);
    }

    #[test]
    fn test_init_pool_unknown_fee_tier_has_no_spacing() {
        assert_eq!(init_pool(&cellar(1234), &block()).unwrap().tick_spacing, 0);
    }

    #[tokio::test]
    async fn test_missing_cellar_is_an_error() {
        let store = MemoryStore::new();
        let ctx = EventContext::new(&store);
        let err = load_cellar(&ctx, "0xmissing").await.unwrap_err();
        assert!(matches!(err, IndexerError::EntityNotFound { entity: "Cellar", .. }));
    }

    #[tokio::test]
    async fn test_missing_bundle_is_an_error() {
        let store = MemoryStore::new();
        let ctx = EventContext::new(&store);
        assert!(matches!(
            load_bundle(&ctx).await,
            Err(IndexerError::EntityNotFound { entity: "Bundle", .. })
        ));
    }

    #[tokio::test]
    async fn test_first_factory_stages_bundle() {
        let store = MemoryStore::new();
        let mut ctx = EventContext::new(&store);

        let factory = load_or_create_factory(&mut ctx, "0xfactory").await.unwrap();
        assert_eq!(factory.pool_count, 0);
        assert_eq!(load_bundle(&ctx).await.unwrap().eth_price_usd, Decimal::ZERO);
        // The factory is the caller's to save
        assert!(ctx.changes().factories.is_empty());
    }

    #[tokio::test]
    async fn test_lazy_pool_is_staged_once() {
        let store = MemoryStore::new();
        let mut ctx = EventContext::new(&store);
        let cellar = cellar(500);

        let first = load_or_init_pool(&mut ctx, &cellar, &block()).await.unwrap();
        let second = load_or_init_pool(&mut ctx, &cellar, &block()).await.unwrap();
        assert_eq!(first, second);
        assert_eq!(ctx.changes().pools.len(), 1);
    }
}
