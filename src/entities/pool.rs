//! `SeaORM` Entity for Uniswap V3 pools

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq, Serialize, Deserialize)]
#[sea_orm(table_name = "pool")]
pub struct Model {
    /// Pool contract address (lowercase 0x hex)
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    pub token0: String,
    pub token1: String,
    pub fee_tier: i32,
    pub tick_spacing: i32,
    pub created_at_timestamp: i64,
    pub created_at_block_number: i64,
    /// uint128 / uint160 / Q128 values kept as base-10 strings
    #[sea_orm(column_type = "Text")]
    pub liquidity: String,
    #[sea_orm(column_type = "Text")]
    pub sqrt_price: String,
    #[sea_orm(column_type = "Text")]
    pub fee_growth_global0_x128: String,
    #[sea_orm(column_type = "Text")]
    pub fee_growth_global1_x128: String,
    pub token0_price: Decimal,
    pub token1_price: Decimal,
    pub tick: Option<i32>,
    pub observation_index: i64,
    pub volume_token0: Decimal,
    pub volume_token1: Decimal,
    pub volume_usd: Decimal,
    pub untracked_volume_usd: Decimal,
    pub fees_usd: Decimal,
    pub tx_count: i64,
    pub collected_fees_token0: Decimal,
    pub collected_fees_token1: Decimal,
    pub collected_fees_usd: Decimal,
    pub total_value_locked_token0: Decimal,
    pub total_value_locked_token1: Decimal,
    pub total_value_locked_eth: Decimal,
    pub total_value_locked_usd: Decimal,
    pub liquidity_provider_count: i64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
