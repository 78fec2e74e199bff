mod common;

use alloy::primitives::U256;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use std::collections::BTreeMap;

use cellar_indexer::entities::{cellar, nflp};
use cellar_indexer::error::IndexerError;
use cellar_indexer::handlers::{
    handle_added_liquidity, handle_event, handle_rebalance, handle_reinvest, handle_removed_liquidity,
};
use cellar_indexer::models::events::{AddedLiquidity, IndexedEvent, Rebalance, Reinvest, RemovedLiquidity};
use cellar_indexer::store::{ChangeSet, EntityStore, MemoryStore};
use cellar_indexer::utils::address_to_id;

use common::*;

fn cellar_id() -> String {
    address_to_id(&CELLAR)
}

fn added(amount0: U256, amount1: U256) -> AddedLiquidity {
    AddedLiquidity {
        address: CELLAR,
        block: block(1_630_000_000, 13_100_000),
        token0: WETH,
        token1: USDC,
        liquidity: 1_000_000,
        amount0,
        amount1,
    }
}

fn removed(amount0: U256, amount1: U256) -> RemovedLiquidity {
    RemovedLiquidity {
        address: CELLAR,
        block: block(1_630_000_600, 13_100_050),
        token0: WETH,
        token1: USDC,
        liquidity: 500_000,
        amount0,
        amount1,
    }
}

fn rebalance(timestamp: u64, fees0: U256, fees1: U256, amount0: U256, amount1: U256) -> Rebalance {
    Rebalance {
        address: CELLAR,
        block: block(timestamp, 13_200_000),
        fees0,
        fees1,
        amount0,
        amount1,
    }
}

/// WETH/USDC cellar with a 20% management fee and one position
fn chain_with_position(amount0: U256, amount1: U256) -> MockChain {
    MockChain::new()
        .with_token(WETH, "WETH", 18)
        .with_token(USDC, "USDC", 6)
        .with_cellar(CELLAR, WETH, USDC, 3000, 2000)
        .with_position(CELLAR, 1001, -600, 600, amount0, amount1)
}

async fn stored_cellar(store: &MemoryStore) -> cellar::Model {
    store.load_cellar(&cellar_id()).await.unwrap().unwrap()
}

#[tokio::test]
async fn test_added_liquidity_on_new_cellar() {
    let store = priced_store(dec!(2000)).await;
    let chain = chain_with_position(raw(100, 18), raw(200, 6));

    handle_added_liquidity(&store, &chain, &added(raw(100, 18), raw(200, 6)))
        .await
        .unwrap();

    let cellar = stored_cellar(&store).await;
    assert_eq!(cellar.token0, address_to_id(&WETH));
    assert_eq!(cellar.token1, address_to_id(&USDC));
    assert_eq!(cellar.pool, USDC_WETH_3000);
    assert_eq!(cellar.fee_tier, 3000);
    assert_eq!(cellar.management_fee, 2000);

    // 100 * 1 * 2000 + 200 * 0.0005 * 2000
    assert_eq!(cellar.total_value_locked_token0, dec!(100));
    assert_eq!(cellar.total_value_locked_token1, dec!(200));
    assert_eq!(cellar.total_value_locked_usd, dec!(200200));

    assert_eq!(cellar.total_deposit_amount0, dec!(100));
    assert_eq!(cellar.total_deposit_amount1, dec!(200));
    assert_eq!(cellar.total_deposit_usd, dec!(200200));

    assert_eq!(cellar.fees_collected_usd, Decimal::ZERO);
    assert_eq!(cellar.fees_reinvested_usd, Decimal::ZERO);

    let nflp = store.load_nflp("1001").await.unwrap().unwrap();
    assert_eq!(nflp.cellar, cellar_id());
    assert_eq!((nflp.tick_lower, nflp.tick_upper), (-600, 600));
    assert_eq!(nflp.token0, address_to_id(&WETH));

    // The pool was never created by the factory, so a fallback one exists now
    let pool = store.load_pool(USDC_WETH_3000).await.unwrap().unwrap();
    assert_eq!(pool.fee_tier, 3000);
    assert_eq!(pool.tick_spacing, 60);
    assert_eq!(pool.created_at_block_number, 13_100_000);
}

#[tokio::test]
async fn test_added_liquidity_without_positions_starts_from_zero() {
    let store = priced_store(dec!(2000)).await;
    let chain = MockChain::new().with_cellar(CELLAR, WETH, USDC, 3000, 2000);

    handle_added_liquidity(&store, &chain, &added(raw(1, 18), U256::ZERO))
        .await
        .unwrap();

    let cellar = stored_cellar(&store).await;
    assert_eq!(cellar.total_value_locked_token0, Decimal::ZERO);
    assert_eq!(cellar.total_value_locked_token1, Decimal::ZERO);
    assert_eq!(cellar.total_value_locked_usd, Decimal::ZERO);
    assert_eq!(cellar.total_deposit_amount0, dec!(1));
    assert_eq!(cellar.total_deposit_amount1, Decimal::ZERO);
    assert_eq!(cellar.total_deposit_usd, dec!(2000));
    assert_eq!(cellar.fees_collected_token0, Decimal::ZERO);
    assert_eq!(cellar.fees_reinvested_token1, Decimal::ZERO);
}

#[tokio::test]
async fn test_added_liquidity_fetches_unknown_tokens() {
    let store = MemoryStore::new();
    store
        .commit(ChangeSet {
            bundles: BTreeMap::from([("1".to_string(), bundle_model(dec!(2000)))]),
            ..Default::default()
        })
        .await
        .unwrap();
    let chain = chain_with_position(raw(3, 18), raw(4, 6));

    handle_added_liquidity(&store, &chain, &added(raw(3, 18), raw(4, 6)))
        .await
        .unwrap();

    let weth = store.load_token(&address_to_id(&WETH)).await.unwrap().unwrap();
    assert_eq!(weth.symbol, "WETH");
    assert_eq!(weth.decimals, 18);
    assert_eq!(weth.total_supply, raw(1_000_000, 18).to_string());

    // Freshly fetched tokens carry no price yet
    let cellar = stored_cellar(&store).await;
    assert_eq!(cellar.total_value_locked_token0, dec!(3));
    assert_eq!(cellar.total_value_locked_usd, Decimal::ZERO);
}

#[tokio::test]
async fn test_added_liquidity_accumulates_deposits() {
    let store = priced_store(dec!(2000)).await;
    let chain = chain_with_position(raw(100, 18), raw(200, 6));

    handle_added_liquidity(&store, &chain, &added(raw(100, 18), raw(200, 6)))
        .await
        .unwrap();

    chain.set_position_amounts(1001, raw(150, 18), raw(300, 6));
    handle_added_liquidity(&store, &chain, &added(raw(50, 18), raw(100, 6)))
        .await
        .unwrap();

    let cellar = stored_cellar(&store).await;
    assert_eq!(cellar.total_deposit_amount0, dec!(150));
    assert_eq!(cellar.total_deposit_amount1, dec!(300));
    assert_eq!(cellar.total_value_locked_token0, dec!(150));
    assert_eq!(cellar.total_value_locked_usd, dec!(300300));
}

#[tokio::test]
async fn test_removed_liquidity_without_cellar_writes_nothing() {
    let store = priced_store(dec!(2000)).await;
    let before = store.snapshot();
    let chain = chain_with_position(raw(100, 18), raw(200, 6));

    let err = handle_removed_liquidity(&store, &chain, &removed(raw(1, 18), raw(1, 6)))
        .await
        .unwrap_err();

    assert!(matches!(err, IndexerError::EntityNotFound { entity: "Cellar", .. }));
    assert_eq!(store.snapshot(), before);
}

#[tokio::test]
async fn test_removed_liquidity_recomputes_tvl_and_keeps_deposits() {
    let store = priced_store(dec!(2000)).await;
    let chain = chain_with_position(raw(100, 18), raw(200, 6));
    handle_added_liquidity(&store, &chain, &added(raw(100, 18), raw(200, 6)))
        .await
        .unwrap();

    chain.set_position_amounts(1001, raw(50, 18), raw(100, 6));
    handle_removed_liquidity(&store, &chain, &removed(raw(50, 18), raw(100, 6)))
        .await
        .unwrap();

    let cellar = stored_cellar(&store).await;
    assert_eq!(cellar.total_value_locked_token0, dec!(50));
    assert_eq!(cellar.total_value_locked_token1, dec!(100));
    assert_eq!(cellar.total_value_locked_usd, dec!(100100));
    assert_eq!(cellar.total_deposit_amount0, dec!(100));
    assert_eq!(cellar.total_deposit_usd, dec!(200200));
}

#[tokio::test]
async fn test_failed_position_read_aborts_the_event() {
    let store = priced_store(dec!(2000)).await;
    let chain = chain_with_position(raw(100, 18), raw(200, 6)).with_broken_position(
        1001,
        cellar_indexer::chain::CallError::Reverted { method: "positions" },
    );
    let before = store.snapshot();

    let err = handle_added_liquidity(&store, &chain, &added(raw(100, 18), raw(200, 6)))
        .await
        .unwrap_err();

    assert!(matches!(err, IndexerError::Aggregation { ref token_id, .. } if token_id == "1001"));
    assert_eq!(store.snapshot(), before);
}

#[tokio::test]
async fn test_rebalance_splits_fees_and_sets_tvl() {
    let store = priced_store(dec!(2000)).await;
    let chain = chain_with_position(raw(100, 18), raw(200, 6));
    handle_added_liquidity(&store, &chain, &added(raw(100, 18), raw(200, 6)))
        .await
        .unwrap();

    let event = rebalance(1_630_086_400, raw(10, 18), raw(5, 6), raw(30, 18), raw(60, 6));
    handle_rebalance(&store, &chain, &event).await.unwrap();

    let cellar = stored_cellar(&store).await;
    // gross0 = 10 * 10000 / 2000 = 50, reinvested0 = 40
    assert_eq!(cellar.fees_collected_token0, dec!(10));
    assert_eq!(cellar.fees_reinvested_token0, dec!(40));
    // gross1 = 25, reinvested1 = 20
    assert_eq!(cellar.fees_collected_token1, dec!(5));
    assert_eq!(cellar.fees_reinvested_token1, dec!(20));
    assert_eq!(cellar.fees_collected_usd, dec!(20005));
    assert_eq!(cellar.fees_reinvested_usd, dec!(80020));

    // Rebalance reports the new absolute amounts
    assert_eq!(cellar.total_value_locked_token0, dec!(30));
    assert_eq!(cellar.total_value_locked_token1, dec!(60));
    assert_eq!(cellar.total_value_locked_usd, dec!(60060));

    let record = store
        .load_cellar_invest(&format!("{}-1630086400", cellar_id()))
        .await
        .unwrap()
        .unwrap();
    assert_eq!(record.kind, "rebalance");
    assert_eq!(record.block_number, 13_200_000);
    assert_eq!(record.block_time.timestamp(), 1_630_086_400);
    assert_eq!(record.fees_collected_token0, dec!(10));
    assert_eq!(record.fees_reinvested_token0, dec!(40));
    assert_eq!(record.amount0, dec!(30));
    assert_eq!(record.amount_usd, dec!(60060));
}

#[tokio::test]
async fn test_reinvest_adds_to_tvl() {
    let store = priced_store(dec!(2000)).await;
    let chain = chain_with_position(raw(100, 18), raw(200, 6));
    handle_added_liquidity(&store, &chain, &added(raw(100, 18), raw(200, 6)))
        .await
        .unwrap();

    let event = Reinvest {
        address: CELLAR,
        block: block(1_630_090_000, 13_200_300),
        fees0: raw(2, 18),
        fees1: U256::ZERO,
        amount0: raw(1, 18),
        amount1: raw(2, 6),
    };
    handle_reinvest(&store, &chain, &event).await.unwrap();

    let cellar = stored_cellar(&store).await;
    assert_eq!(cellar.total_value_locked_token0, dec!(101));
    assert_eq!(cellar.total_value_locked_token1, dec!(202));
    assert_eq!(cellar.total_value_locked_usd, dec!(202202));
    assert_eq!(cellar.fees_collected_token0, dec!(2));
    assert_eq!(cellar.fees_reinvested_token0, dec!(8));
    assert_eq!(cellar.fees_collected_token1, Decimal::ZERO);

    let record = store
        .load_cellar_invest(&format!("{}-1630090000", cellar_id()))
        .await
        .unwrap()
        .unwrap();
    assert_eq!(record.kind, "reinvest");
    assert_eq!(record.amount1, dec!(2));
}

#[tokio::test]
async fn test_history_record_is_write_once() {
    let store = priced_store(dec!(2000)).await;
    let chain = chain_with_position(raw(100, 18), raw(200, 6));
    handle_added_liquidity(&store, &chain, &added(raw(100, 18), raw(200, 6)))
        .await
        .unwrap();

    let first = rebalance(1_630_086_400, raw(10, 18), U256::ZERO, raw(30, 18), raw(60, 6));
    let second = rebalance(1_630_086_400, raw(20, 18), U256::ZERO, raw(40, 18), raw(80, 6));
    handle_rebalance(&store, &chain, &first).await.unwrap();
    handle_rebalance(&store, &chain, &second).await.unwrap();

    let record = store
        .load_cellar_invest(&format!("{}-1630086400", cellar_id()))
        .await
        .unwrap()
        .unwrap();
    assert_eq!(record.fees_collected_token0, dec!(10));
    assert_eq!(record.amount0, dec!(30));

    // The cellar itself still sees both events
    let cellar = stored_cellar(&store).await;
    assert_eq!(cellar.fees_collected_token0, dec!(30));
    assert_eq!(cellar.total_value_locked_token0, dec!(40));
}

#[tokio::test]
async fn test_rebalance_with_zero_management_fee_is_rejected() {
    let store = priced_store(dec!(2000)).await;
    let chain = MockChain::new()
        .with_token(WETH, "WETH", 18)
        .with_token(USDC, "USDC", 6)
        .with_cellar(CELLAR, WETH, USDC, 3000, 0);
    handle_added_liquidity(&store, &chain, &added(raw(1, 18), raw(1, 6)))
        .await
        .unwrap();
    let before = store.snapshot();

    let event = rebalance(1_630_086_400, raw(10, 18), raw(5, 6), raw(30, 18), raw(60, 6));
    let err = handle_rebalance(&store, &chain, &event).await.unwrap_err();

    assert!(matches!(err, IndexerError::InvalidManagementFee { fee_bps: 0, .. }));
    assert_eq!(store.snapshot(), before);
}

#[tokio::test]
async fn test_known_positions_keep_their_ticks() {
    let store = priced_store(dec!(2000)).await;
    store
        .commit(ChangeSet {
            nflps: BTreeMap::from([(
                "1001".to_string(),
                nflp::Model {
                    id: "1001".to_string(),
                    cellar: "0xpreviousowner".to_string(),
                    tick_upper: 100,
                    tick_lower: -100,
                    token0: address_to_id(&WETH),
                    token1: address_to_id(&USDC),
                },
            )]),
            ..Default::default()
        })
        .await
        .unwrap();
    let chain = chain_with_position(raw(1, 18), raw(1, 6));

    handle_added_liquidity(&store, &chain, &added(raw(1, 18), raw(1, 6)))
        .await
        .unwrap();

    let nflp = store.load_nflp("1001").await.unwrap().unwrap();
    assert_eq!((nflp.tick_lower, nflp.tick_upper), (-100, 100));
    assert_eq!(nflp.cellar, cellar_id());
}

#[tokio::test]
async fn test_dispatch_routes_cellar_events() {
    let store = priced_store(dec!(2000)).await;
    let chain = chain_with_position(raw(100, 18), raw(200, 6));

    handle_event(&store, &chain, &IndexedEvent::AddedLiquidity(added(raw(100, 18), raw(200, 6))))
        .await
        .unwrap();
    assert_eq!(stored_cellar(&store).await.total_value_locked_usd, dec!(200200));

    let other = MemoryStore::new();
    let err = handle_event(&other, &chain, &IndexedEvent::RemovedLiquidity(removed(U256::ZERO, U256::ZERO)))
        .await
        .unwrap_err();
    assert!(matches!(err, IndexerError::EntityNotFound { .. }));
}
