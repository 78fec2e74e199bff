//! `SeaORM` Entity for the append-only rebalance/reinvest history

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq, Serialize, Deserialize)]
#[sea_orm(table_name = "cellar_invest")]
pub struct Model {
    /// `<cellar>-<block timestamp>`
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    pub cellar: String,
    /// 'rebalance' or 'reinvest'
    pub kind: String,
    pub block_number: i64,
    pub block_timestamp: i64,
    pub block_time: DateTimeWithTimeZone,
    pub fees_collected_token0: Decimal,
    pub fees_collected_token1: Decimal,
    pub fees_collected_usd: Decimal,
    pub fees_reinvested_token0: Decimal,
    pub fees_reinvested_token1: Decimal,
    pub fees_reinvested_usd: Decimal,
    pub amount0: Decimal,
    pub amount1: Decimal,
    pub amount_usd: Decimal,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
