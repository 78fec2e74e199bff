//! `SeaORM` Entity for ERC20 tokens seen in pools and cellars

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq, Serialize, Deserialize)]
#[sea_orm(table_name = "token")]
pub struct Model {
    /// Token contract address (lowercase 0x hex)
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    pub symbol: String,
    pub name: String,
    pub decimals: i32,
    /// Raw on-chain supply as a base-10 integer string
    #[sea_orm(column_type = "Text")]
    pub total_supply: String,
    /// Price in ETH, maintained by the price oracle mappings
    pub derived_eth: Decimal,
    pub volume: Decimal,
    pub volume_usd: Decimal,
    pub untracked_volume_usd: Decimal,
    pub fees_usd: Decimal,
    pub tx_count: i64,
    pub pool_count: i64,
    pub total_value_locked: Decimal,
    pub total_value_locked_usd: Decimal,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
