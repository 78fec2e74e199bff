//! Total value locked, recomputed from the cellar's live positions

use alloy::primitives::U256;
use rust_decimal::Decimal;

use crate::chain::ChainReader;
use crate::entities::{bundle, cellar, token};
use crate::error::{IndexerError, Result};
use crate::utils::decimal::{checked_add, checked_mul, convert_token_amount};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Tvl {
    pub token0: Decimal,
    pub token1: Decimal,
    pub usd: Decimal,
}

impl Tvl {
    /// Overwrite the cellar's TVL fields
    pub fn apply_to(&self, cellar: &mut cellar::Model) {
        cellar.total_value_locked_token0 = self.token0;
        cellar.total_value_locked_token1 = self.token1;
        cellar.total_value_locked_usd = self.usd;
    }
}

/// `amount * derived_eth * eth_price_usd`
pub fn usd_value(amount: Decimal, token: &token::Model, bundle: &bundle::Model) -> Result<Decimal> {
    let price = checked_mul(token.derived_eth, bundle.eth_price_usd, "token usd price")?;
    checked_mul(amount, price, "usd value")
}

/// USD value of a token pair amount
pub fn revalue(
    amount0: Decimal,
    amount1: Decimal,
    token0: &token::Model,
    token1: &token::Model,
    bundle: &bundle::Model,
) -> Result<Tvl> {
    let usd = checked_add(
        usd_value(amount0, token0, bundle)?,
        usd_value(amount1, token1, bundle)?,
        "usd value",
    )?;
    Ok(Tvl {
        token0: amount0,
        token1: amount1,
        usd,
    })
}

/// Sum the live amounts of `token_ids` into token and USD totals.
///
/// Every position must answer; one failing call aborts the whole
/// aggregation so that no partial total is ever stored.
pub async fn aggregate_tvl<C>(
    chain: &C,
    token_ids: &[String],
    token0: &token::Model,
    token1: &token::Model,
    bundle: &bundle::Model,
) -> Result<Tvl>
where
    C: ChainReader + ?Sized,
{
    let mut tvl = Tvl::default();

    for token_id in token_ids {
        let position: U256 = token_id
            .parse()
            .map_err(|_| IndexerError::InvalidPositionId(token_id.clone()))?;

        let amounts = chain
            .position_amounts(position)
            .await
            .map_err(|source| IndexerError::Aggregation {
                token_id: token_id.clone(),
                source,
            })?;

        let amount0 = convert_token_amount(amounts.amount0, token0)?;
        let amount1 = convert_token_amount(amounts.amount1, token1)?;

        tvl.token0 = checked_add(tvl.token0, amount0, "tvl token0")?;
        tvl.token1 = checked_add(tvl.token1, amount1, "tvl token1")?;
        tvl.usd = checked_add(tvl.usd, usd_value(amount0, token0, bundle)?, "tvl usd")?;
        tvl.usd = checked_add(tvl.usd, usd_value(amount1, token1, bundle)?, "tvl usd")?;
    }

    tracing::debug!(
        positions = token_ids.len(),
        token0 = %tvl.token0,
        token1 = %tvl.token1,
        usd = %tvl.usd,
        "Aggregated TVL"
    );
    Ok(tvl)
}
