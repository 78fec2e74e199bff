//! Raw token amount to decimal conversion

use alloy::primitives::U256;
use rust_decimal::Decimal;

use crate::entities::token;
use crate::error::{IndexerError, Result};

/// Largest mantissa a `Decimal` can carry (96 bits)
const MAX_MANTISSA: u128 = (1u128 << 96) - 1;

/// Largest scale a `Decimal` can carry
const MAX_SCALE: u32 = 28;

/// Convert a raw on-chain amount into `amount / 10^decimals`.
///
/// Exact whenever the value fits the 96-bit mantissa at the requested scale.
/// Otherwise the lowest digits are dropped until it fits, which keeps the
/// value and only loses precision the representation cannot carry anyway.
pub fn convert_token_to_decimal(amount: U256, decimals: u32) -> Result<Decimal> {
    let ten = U256::from(10u8);
    let max_mantissa = U256::from(MAX_MANTISSA);

    let mut mantissa = amount;
    let mut scale = decimals;
    while scale > MAX_SCALE || mantissa > max_mantissa {
        if scale == 0 {
            return Err(IndexerError::DecimalOverflow("token amount"));
        }
        mantissa /= ten;
        scale -= 1;
    }

    let mantissa = u128::try_from(mantissa)
        .map_err(|_| IndexerError::DecimalOverflow("token amount"))?;
    Ok(Decimal::from_i128_with_scale(mantissa as i128, scale))
}

/// `10^decimals` as a decimal; the representation tops out at `10^28`
pub fn exponent_to_decimal(decimals: u32) -> Result<Decimal> {
    if decimals > MAX_SCALE {
        return Err(IndexerError::DecimalOverflow("power of ten"));
    }
    Ok(Decimal::from_i128_with_scale(10i128.pow(decimals), 0))
}

/// Decimals of a stored token, rejecting values a token cannot have
pub fn token_decimals(token: &token::Model) -> Result<u32> {
    u32::try_from(token.decimals).map_err(|_| IndexerError::InvalidDecimals {
        token: token.id.clone(),
        reason: format!("stored value {}", token.decimals),
    })
}

/// Convert a raw amount of `token`
pub fn convert_token_amount(amount: U256, token: &token::Model) -> Result<Decimal> {
    convert_token_to_decimal(amount, token_decimals(token)?)
}

pub fn checked_add(lhs: Decimal, rhs: Decimal, what: &'static str) -> Result<Decimal> {
    lhs.checked_add(rhs).ok_or(IndexerError::DecimalOverflow(what))
}

pub fn checked_mul(lhs: Decimal, rhs: Decimal, what: &'static str) -> Result<Decimal> {
    lhs.checked_mul(rhs).ok_or(IndexerError::DecimalOverflow(what))
}
