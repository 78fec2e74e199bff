pub mod cellar;
pub mod factory;

use crate::chain::ChainReader;
use crate::error::Result;
use crate::models::events::IndexedEvent;
use crate::store::EntityStore;

pub use cellar::{
    handle_added_liquidity, handle_rebalance, handle_reinvest, handle_removed_liquidity,
};
pub use factory::handle_pool_created;

/// Route one event to its handler. Each event is committed on its own.
pub async fn handle_event<S, C>(store: &S, chain: &C, event: &IndexedEvent) -> Result<()>
where
    S: EntityStore + ?Sized,
    C: ChainReader + ?Sized,
{
    let result = match event {
        IndexedEvent::AddedLiquidity(e) => handle_added_liquidity(store, chain, e).await,
        IndexedEvent::RemovedLiquidity(e) => handle_removed_liquidity(store, chain, e).await,
        IndexedEvent::Rebalance(e) => handle_rebalance(store, chain, e).await,
        IndexedEvent::Reinvest(e) => handle_reinvest(store, chain, e).await,
        IndexedEvent::PoolCreated(e) => handle_pool_created(store, chain, e).await,
    };

    if let Err(e) = &result {
        tracing::error!(
            event = event.name(),
            block = event.block().number,
            error = %e,
            "Event handler failed, nothing was written"
        );
    }
    result
}
