//! `SeaORM` Entity for the ETH/USD price bundle singleton

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq, Serialize, Deserialize)]
#[sea_orm(table_name = "bundle")]
pub struct Model {
    /// Always "1"
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    pub eth_price_usd: Decimal,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
