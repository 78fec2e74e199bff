//! Position (NFLP) discovery for a cellar
//!
//! Cellars expose their positions only by index, so the list is probed from
//! index 0 until a call reverts.

use alloy::primitives::Address;
use futures_util::stream::{self, Stream, TryStreamExt};

use crate::chain::{CallError, ChainReader, TickInfo};
use crate::entities::{cellar, nflp};
use crate::error::Result;
use crate::store::{EntityStore, EventContext};
use crate::utils::parse_address;

/// Lazily probe `cellarTickInfo(0..)`.
///
/// Ends cleanly on the first revert. Any other failure is yielded once and
/// ends the stream.
pub fn tick_info_stream<'a, C>(
    chain: &'a C,
    cellar: Address,
) -> impl Stream<Item = std::result::Result<TickInfo, CallError>> + Send + 'a
where
    C: ChainReader + ?Sized,
{
    stream::unfold(Some(0u64), move |next| async move {
        let index = next?;
        match chain.cellar_tick_info(cellar, index).await {
            Ok(tick) => Some((Ok(tick), Some(index + 1))),
            Err(e) if e.is_revert() => {
                tracing::debug!(cellar = %cellar, found = index, "Tick enumeration reached the end");
                None
            }
            Err(e) => Some((Err(e), None)),
        }
    })
}

/// Make sure every live position of `cellar` has an NFLP entity.
///
/// New positions take their ticks and tokens from the chain and the cellar.
/// Known positions keep what they have; they are only written when the
/// owning cellar changes.
/// Returns the positions in on-chain order.
pub async fn upsert_nflps<S, C>(
    ctx: &mut EventContext<'_, S>,
    chain: &C,
    cellar: &cellar::Model,
) -> Result<Vec<nflp::Model>>
where
    S: EntityStore + ?Sized,
    C: ChainReader + ?Sized,
{
    let address = parse_address(&cellar.id)?;
    let ticks: Vec<TickInfo> = tick_info_stream(chain, address).try_collect().await?;
    tracing::debug!(cellar = %cellar.id, count = ticks.len(), "Found positions");

    let mut nflps = Vec::with_capacity(ticks.len());
    for tick in ticks {
        let id = tick.token_id.to_string();
        let nflp = match ctx.nflp(&id).await? {
            Some(existing) if existing.cellar == cellar.id => existing,
            Some(mut existing) => {
                existing.cellar = cellar.id.clone();
                ctx.save_nflp(existing.clone());
                existing
            }
            None => {
                tracing::debug!(nflp = %id, tick_lower = tick.tick_lower, tick_upper = tick.tick_upper, "Initializing NFLP");
                let created = nflp::Model {
                    id,
                    cellar: cellar.id.clone(),
                    tick_upper: tick.tick_upper,
                    tick_lower: tick.tick_lower,
                    token0: cellar.token0.clone(),
                    token1: cellar.token1.clone(),
                };
                ctx.save_nflp(created.clone());
                created
            }
        };
        nflps.push(nflp);
    }

    Ok(nflps)
}
