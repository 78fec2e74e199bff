//! Cellar event handlers: liquidity changes, rebalances and reinvests

use alloy::primitives::{Address, U256};
use chrono::DateTime;
use tracing::{debug, info, warn};

use crate::chain::ChainReader;
use crate::entities::{cellar_invest, nflp};
use crate::error::{IndexerError, Result};
use crate::models::events::{AddedLiquidity, EventBlock, Rebalance, Reinvest, RemovedLiquidity};
use crate::services::accessors::{
    ensure_token, load_bundle, load_cellar, load_or_init_cellar, load_or_init_pool, require_token,
};
use crate::services::fees::split_fee;
use crate::services::positions::upsert_nflps;
use crate::services::tvl::{aggregate_tvl, revalue, usd_value};
use crate::store::{EntityStore, EventContext};
use crate::utils::address_to_id;
use crate::utils::decimal::{checked_add, convert_token_amount};

fn position_ids(nflps: &[nflp::Model]) -> Vec<String> {
    nflps.iter().map(|nflp| nflp.id.clone()).collect()
}

/// A deposit into a cellar. Creates the cellar (and its tokens and pool) on
/// first sight, recomputes TVL and adds the deposit to the running totals.
pub async fn handle_added_liquidity<S, C>(store: &S, chain: &C, event: &AddedLiquidity) -> Result<()>
where
    S: EntityStore + ?Sized,
    C: ChainReader + ?Sized,
{
    let cellar_id = address_to_id(&event.address);
    info!(
        cellar = %cellar_id,
        block = event.block.number,
        liquidity = event.liquidity,
        "Handling AddedLiquidity"
    );

    let mut ctx = EventContext::new(store);
    let mut cellar = load_or_init_cellar(&ctx, chain, event.address).await?;

    let token0 = ensure_token(&mut ctx, chain, &cellar.token0).await?;
    let token1 = ensure_token(&mut ctx, chain, &cellar.token1).await?;
    load_or_init_pool(&mut ctx, &cellar, &event.block).await?;
    let bundle = load_bundle(&ctx).await?;

    let nflps = upsert_nflps(&mut ctx, chain, &cellar).await?;
    let tvl = aggregate_tvl(chain, &position_ids(&nflps), &token0, &token1, &bundle).await?;
    tvl.apply_to(&mut cellar);

    let amount0 = convert_token_amount(event.amount0, &token0)?;
    let amount1 = convert_token_amount(event.amount1, &token1)?;
    let deposit = revalue(amount0, amount1, &token0, &token1, &bundle)?;

    cellar.total_deposit_amount0 = checked_add(cellar.total_deposit_amount0, amount0, "deposit token0")?;
    cellar.total_deposit_amount1 = checked_add(cellar.total_deposit_amount1, amount1, "deposit token1")?;
    cellar.total_deposit_usd = checked_add(cellar.total_deposit_usd, deposit.usd, "deposit usd")?;

    ctx.save_cellar(cellar);
    let written = ctx.commit().await?;
    debug!(cellar = %cellar_id, written, "AddedLiquidity committed");
    Ok(())
}

/// A withdrawal from a known cellar. Only TVL changes; deposit totals are
/// cumulative.
pub async fn handle_removed_liquidity<S, C>(store: &S, chain: &C, event: &RemovedLiquidity) -> Result<()>
where
    S: EntityStore + ?Sized,
    C: ChainReader + ?Sized,
{
    let cellar_id = address_to_id(&event.address);
    info!(
        cellar = %cellar_id,
        block = event.block.number,
        liquidity = event.liquidity,
        "Handling RemovedLiquidity"
    );

    let mut ctx = EventContext::new(store);
    let mut cellar = load_cellar(&ctx, &cellar_id).await?;
    let token0 = require_token(&ctx, &cellar.token0).await?;
    let token1 = require_token(&ctx, &cellar.token1).await?;
    let bundle = load_bundle(&ctx).await?;

    let nflps = upsert_nflps(&mut ctx, chain, &cellar).await?;
    let tvl = aggregate_tvl(chain, &position_ids(&nflps), &token0, &token1, &bundle).await?;
    tvl.apply_to(&mut cellar);

    ctx.save_cellar(cellar);
    let written = ctx.commit().await?;
    debug!(cellar = %cellar_id, written, "RemovedLiquidity committed");
    Ok(())
}

pub async fn handle_rebalance<S, C>(store: &S, chain: &C, event: &Rebalance) -> Result<()>
where
    S: EntityStore + ?Sized,
    C: ChainReader + ?Sized,
{
    let report = FeeReport {
        kind: InvestKind::Rebalance,
        address: event.address,
        block: event.block,
        fees0: event.fees0,
        fees1: event.fees1,
        amount0: event.amount0,
        amount1: event.amount1,
    };
    handle_fee_report(store, chain, &report).await
}

pub async fn handle_reinvest<S, C>(store: &S, chain: &C, event: &Reinvest) -> Result<()>
where
    S: EntityStore + ?Sized,
    C: ChainReader + ?Sized,
{
    let report = FeeReport {
        kind: InvestKind::Reinvest,
        address: event.address,
        block: event.block,
        fees0: event.fees0,
        fees1: event.fees1,
        amount0: event.amount0,
        amount1: event.amount1,
    };
    handle_fee_report(store, chain, &report).await
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InvestKind {
    /// Positions were reset; the reported amounts are the new TVL
    Rebalance,
    /// Fees were added back; the reported amounts add to the TVL
    Reinvest,
}

impl InvestKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            InvestKind::Rebalance => "rebalance",
            InvestKind::Reinvest => "reinvest",
        }
    }
}

struct FeeReport {
    kind: InvestKind,
    address: Address,
    block: EventBlock,
    fees0: U256,
    fees1: U256,
    amount0: U256,
    amount1: U256,
}

async fn handle_fee_report<S, C>(store: &S, chain: &C, report: &FeeReport) -> Result<()>
where
    S: EntityStore + ?Sized,
    C: ChainReader + ?Sized,
{
    let cellar_id = address_to_id(&report.address);
    info!(
        cellar = %cellar_id,
        block = report.block.number,
        kind = report.kind.as_str(),
        "Handling fee report"
    );

    let mut ctx = EventContext::new(store);
    let mut cellar = load_cellar(&ctx, &cellar_id).await?;
    let token0 = require_token(&ctx, &cellar.token0).await?;
    let token1 = require_token(&ctx, &cellar.token1).await?;
    let bundle = load_bundle(&ctx).await?;

    upsert_nflps(&mut ctx, chain, &cellar).await?;

    // Fees
    let split0 = split_fee(report.fees0, cellar.management_fee, &cellar.id)?;
    let split1 = split_fee(report.fees1, cellar.management_fee, &cellar.id)?;

    let collected = revalue(
        convert_token_amount(split0.net, &token0)?,
        convert_token_amount(split1.net, &token1)?,
        &token0,
        &token1,
        &bundle,
    )?;
    let reinvested = revalue(
        convert_token_amount(split0.reinvested, &token0)?,
        convert_token_amount(split1.reinvested, &token1)?,
        &token0,
        &token1,
        &bundle,
    )?;

    cellar.fees_collected_token0 = checked_add(cellar.fees_collected_token0, collected.token0, "fees collected")?;
    cellar.fees_collected_token1 = checked_add(cellar.fees_collected_token1, collected.token1, "fees collected")?;
    cellar.fees_collected_usd = checked_add(cellar.fees_collected_usd, collected.usd, "fees collected")?;
    cellar.fees_reinvested_token0 =
        checked_add(cellar.fees_reinvested_token0, reinvested.token0, "fees reinvested")?;
    cellar.fees_reinvested_token1 =
        checked_add(cellar.fees_reinvested_token1, reinvested.token1, "fees reinvested")?;
    cellar.fees_reinvested_usd = checked_add(cellar.fees_reinvested_usd, reinvested.usd, "fees reinvested")?;

    // TVL
    let amount0 = convert_token_amount(report.amount0, &token0)?;
    let amount1 = convert_token_amount(report.amount1, &token1)?;
    let (tvl0, tvl1) = match report.kind {
        InvestKind::Rebalance => (amount0, amount1),
        InvestKind::Reinvest => (
            checked_add(cellar.total_value_locked_token0, amount0, "tvl token0")?,
            checked_add(cellar.total_value_locked_token1, amount1, "tvl token1")?,
        ),
    };
    revalue(tvl0, tvl1, &token0, &token1, &bundle)?.apply_to(&mut cellar);

    // History
    let invest_id = format!("{}-{}", cellar.id, report.block.timestamp);
    if ctx.cellar_invest(&invest_id).await?.is_some() {
        warn!(id = %invest_id, "History record already exists, keeping the first one");
    } else {
        let block_timestamp = report.block.timestamp_i64()?;
        let block_time = DateTime::from_timestamp(block_timestamp, 0)
            .ok_or(IndexerError::OutOfRange {
                field: "block timestamp",
                value: report.block.timestamp,
            })?
            .fixed_offset();
        let amount_usd = checked_add(
            usd_value(amount0, &token0, &bundle)?,
            usd_value(amount1, &token1, &bundle)?,
            "invest amount usd",
        )?;

        ctx.save_cellar_invest(cellar_invest::Model {
            id: invest_id,
            cellar: cellar.id.clone(),
            kind: report.kind.as_str().to_string(),
            block_number: report.block.number_i64()?,
            block_timestamp,
            block_time,
            fees_collected_token0: collected.token0,
            fees_collected_token1: collected.token1,
            fees_collected_usd: collected.usd,
            fees_reinvested_token0: reinvested.token0,
            fees_reinvested_token1: reinvested.token1,
            fees_reinvested_usd: reinvested.usd,
            amount0,
            amount1,
            amount_usd,
        });
    }

    ctx.save_cellar(cellar);
    let written = ctx.commit().await?;
    debug!(cellar = %cellar_id, kind = report.kind.as_str(), written, "Fee report committed");
    Ok(())
}
