//! Management fee split reported by rebalance and reinvest events

use alloy::primitives::U256;

use crate::error::{IndexerError, Result};
use crate::utils::constants::FEE_DENOMINATOR_BPS;

/// Raw fee amounts for one token
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FeeSplit {
    /// Performance fee the cellar kept, as reported by the event
    pub net: U256,
    /// Fees earned by the positions before the management cut
    pub gross: U256,
    /// Part of the gross fees put back into the positions
    pub reinvested: U256,
}

/// Derive gross and reinvested fees from the reported net fee.
///
/// `gross = net * 10000 / management_fee_bps`, integer division on the raw
/// amounts. The rate must lie in `1..=10000`.
pub fn split_fee(net: U256, management_fee_bps: i32, cellar: &str) -> Result<FeeSplit> {
    let bps = u32::try_from(management_fee_bps)
        .ok()
        .filter(|bps| (1..=FEE_DENOMINATOR_BPS).contains(bps))
        .ok_or_else(|| IndexerError::InvalidManagementFee {
            cellar: cellar.to_string(),
            fee_bps: management_fee_bps as i64,
        })?;

    let gross = net
        .checked_mul(U256::from(FEE_DENOMINATOR_BPS))
        .ok_or(IndexerError::DecimalOverflow("gross fee"))?
        / U256::from(bps);

    Ok(FeeSplit {
        net,
        gross,
        reinvested: gross - net,
    })
}
