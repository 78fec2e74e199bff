//! `SeaORM` Entity for the pool factory singleton

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq, Serialize, Deserialize)]
#[sea_orm(table_name = "factory")]
pub struct Model {
    /// Factory contract address (lowercase 0x hex)
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    pub pool_count: i64,
    pub total_volume_eth: Decimal,
    pub total_volume_usd: Decimal,
    pub untracked_volume_usd: Decimal,
    pub total_value_locked_eth: Decimal,
    pub total_value_locked_usd: Decimal,
    pub tx_count: i64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
