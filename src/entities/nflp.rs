//! `SeaORM` Entity for non-fungible liquidity positions held by a cellar

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq, Serialize, Deserialize)]
#[sea_orm(table_name = "nflp")]
pub struct Model {
    /// Position manager token id (base-10)
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    pub cellar: String,
    pub tick_upper: i32,
    pub tick_lower: i32,
    pub token0: String,
    pub token1: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
