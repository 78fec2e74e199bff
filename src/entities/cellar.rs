//! `SeaORM` Entity for cellars (vaults managing concentrated-liquidity positions)

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq, Serialize, Deserialize)]
#[sea_orm(table_name = "cellar")]
pub struct Model {
    /// Cellar contract address (lowercase 0x hex)
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    pub token0: String,
    pub token1: String,
    /// Underlying Uniswap V3 pool address
    pub pool: String,
    pub fee_tier: i32,
    /// Management fee in basis points (10000 = 100%)
    pub management_fee: i32,
    pub total_deposit_amount0: Decimal,
    pub total_deposit_amount1: Decimal,
    pub total_deposit_usd: Decimal,
    pub total_value_locked_token0: Decimal,
    pub total_value_locked_token1: Decimal,
    pub total_value_locked_usd: Decimal,
    pub fees_collected_token0: Decimal,
    pub fees_collected_token1: Decimal,
    pub fees_collected_usd: Decimal,
    pub fees_reinvested_token0: Decimal,
    pub fees_reinvested_token1: Decimal,
    pub fees_reinvested_usd: Decimal,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
