//! Factory event handlers

use tracing::{debug, info, warn};

use crate::chain::ChainReader;
use crate::error::{IndexerError, Result};
use crate::models::events::PoolCreated;
use crate::services::accessors::{load_or_create_factory, load_or_fetch_token, new_pool};
use crate::store::{EntityStore, EventContext};
use crate::utils::address_to_id;
use crate::utils::tracked_pools::is_tracked_pool;

/// Index a new pool together with both of its tokens.
///
/// Nothing is written when either token's decimals cannot be read.
pub async fn handle_pool_created<S, C>(store: &S, chain: &C, event: &PoolCreated) -> Result<()>
where
    S: EntityStore + ?Sized,
    C: ChainReader + ?Sized,
{
    let pool_id = address_to_id(&event.pool);
    info!(
        pool = %pool_id,
        fee = event.fee,
        block = event.block.number,
        tracked = is_tracked_pool(&pool_id),
        "Handling PoolCreated"
    );

    let mut ctx = EventContext::new(store);

    let mut factory = load_or_create_factory(&mut ctx, &address_to_id(&event.address)).await?;
    factory.pool_count += 1;

    let Some(mut token0) = load_or_fetch_token(&mut ctx, chain, event.token0).await? else {
        warn!(pool = %pool_id, token = %address_to_id(&event.token0), "Token0 has no decimals, pool not indexed");
        return Ok(());
    };
    let Some(mut token1) = load_or_fetch_token(&mut ctx, chain, event.token1).await? else {
        warn!(pool = %pool_id, token = %address_to_id(&event.token1), "Token1 has no decimals, pool not indexed");
        return Ok(());
    };
    token0.pool_count += 1;
    token1.pool_count += 1;

    let fee_tier = i32::try_from(event.fee).map_err(|_| IndexerError::OutOfRange {
        field: "pool fee",
        value: event.fee as u64,
    })?;
    let pool = new_pool(
        pool_id.clone(),
        token0.id.clone(),
        token1.id.clone(),
        fee_tier,
        event.tick_spacing,
        &event.block,
    )?;

    ctx.save_token(token0);
    ctx.save_token(token1);
    ctx.save_pool(pool);
    ctx.save_factory(factory);
    let written = ctx.commit().await?;
    debug!(pool = %pool_id, written, "PoolCreated committed");
    Ok(())
}
