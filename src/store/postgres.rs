//! Postgres-backed entity store (SeaORM)
//!
//! Each commit runs in one database transaction so that an event's entities
//! land together or not at all.

use async_trait::async_trait;
use sea_orm::sea_query::OnConflict;
use sea_orm::{
    ActiveModelBehavior, ActiveModelTrait, DatabaseConnection, DatabaseTransaction, DbErr,
    EntityTrait, IdenStatic, IntoActiveModel, Iterable, PaginatorTrait, PrimaryKeyToColumn,
    TransactionTrait,
};
use serde::Serialize;

use super::{ChangeSet, EntityStore};
use crate::entities::{bundle, cellar, cellar_invest, factory, nflp, pool, prelude::*, token};
use crate::error::StoreError;

#[derive(Clone)]
pub struct PostgresStore {
    db: DatabaseConnection,
}

/// Row counts per entity table
#[derive(Debug, Clone, Default, Serialize)]
pub struct StoreSummary {
    pub tokens: u64,
    pub pools: u64,
    pub cellars: u64,
    pub nflps: u64,
    pub cellar_invests: u64,
}

impl PostgresStore {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    pub fn connection(&self) -> &DatabaseConnection {
        &self.db
    }

    pub async fn summary(&self) -> Result<StoreSummary, StoreError> {
        Ok(StoreSummary {
            tokens: Token::find().count(&self.db).await?,
            pools: Pool::find().count(&self.db).await?,
            cellars: Cellar::find().count(&self.db).await?,
            nflps: Nflp::find().count(&self.db).await?,
            cellar_invests: CellarInvest::find().count(&self.db).await?,
        })
    }
}

/// Insert or overwrite rows by primary key
async fn upsert_many<A>(
    txn: &DatabaseTransaction,
    models: Vec<<A::Entity as EntityTrait>::Model>,
) -> Result<(), DbErr>
where
    A: ActiveModelTrait + ActiveModelBehavior + Send,
    <A::Entity as EntityTrait>::Model: IntoActiveModel<A>,
{
    if models.is_empty() {
        return Ok(());
    }

    let key_columns: Vec<_> = <A::Entity as EntityTrait>::PrimaryKey::iter()
        .map(|key| key.into_column())
        .collect();
    let key_names: Vec<&str> = key_columns.iter().map(|column| column.as_str()).collect();
    let update_columns: Vec<_> = <A::Entity as EntityTrait>::Column::iter()
        .filter(|column| !key_names.contains(&column.as_str()))
        .collect();

    let rows = models
        .into_iter()
        .map(|model| model.into_active_model());

    <A::Entity as EntityTrait>::insert_many(rows)
        .on_conflict(
            OnConflict::columns(key_columns)
                .update_columns(update_columns)
                .to_owned(),
        )
        .exec_without_returning(txn)
        .await?;

    Ok(())
}

/// Insert rows whose key is not taken yet; existing rows are left alone
async fn insert_new<A>(
    txn: &DatabaseTransaction,
    models: Vec<<A::Entity as EntityTrait>::Model>,
) -> Result<u64, DbErr>
where
    A: ActiveModelTrait + ActiveModelBehavior + Send,
    <A::Entity as EntityTrait>::Model: IntoActiveModel<A>,
{
    if models.is_empty() {
        return Ok(0);
    }

    let key_columns: Vec<_> = <A::Entity as EntityTrait>::PrimaryKey::iter()
        .map(|key| key.into_column())
        .collect();

    let rows = models
        .into_iter()
        .map(|model| model.into_active_model());

    <A::Entity as EntityTrait>::insert_many(rows)
        .on_conflict(OnConflict::columns(key_columns).do_nothing().to_owned())
        .exec_without_returning(txn)
        .await
}

#[async_trait]
impl EntityStore for PostgresStore {
    async fn load_bundle(&self, id: &str) -> Result<Option<bundle::Model>, StoreError> {
        Ok(Bundle::find_by_id(id.to_string()).one(&self.db).await?)
    }

    async fn load_factory(&self, id: &str) -> Result<Option<factory::Model>, StoreError> {
        Ok(Factory::find_by_id(id.to_string()).one(&self.db).await?)
    }

    async fn load_token(&self, id: &str) -> Result<Option<token::Model>, StoreError> {
        Ok(Token::find_by_id(id.to_string()).one(&self.db).await?)
    }

    async fn load_pool(&self, id: &str) -> Result<Option<pool::Model>, StoreError> {
        Ok(Pool::find_by_id(id.to_string()).one(&self.db).await?)
    }

    async fn load_cellar(&self, id: &str) -> Result<Option<cellar::Model>, StoreError> {
        Ok(Cellar::find_by_id(id.to_string()).one(&self.db).await?)
    }

    async fn load_nflp(&self, id: &str) -> Result<Option<nflp::Model>, StoreError> {
        Ok(Nflp::find_by_id(id.to_string()).one(&self.db).await?)
    }

    async fn load_cellar_invest(&self, id: &str) -> Result<Option<cellar_invest::Model>, StoreError> {
        Ok(CellarInvest::find_by_id(id.to_string()).one(&self.db).await?)
    }

    async fn commit(&self, changes: ChangeSet) -> Result<(), StoreError> {
        let written = changes.len();
        let txn = self.db.begin().await?;

        upsert_many::<bundle::ActiveModel>(&txn, changes.bundles.into_values().collect()).await?;
        upsert_many::<factory::ActiveModel>(&txn, changes.factories.into_values().collect()).await?;
        upsert_many::<token::ActiveModel>(&txn, changes.tokens.into_values().collect()).await?;
        upsert_many::<pool::ActiveModel>(&txn, changes.pools.into_values().collect()).await?;
        upsert_many::<cellar::ActiveModel>(&txn, changes.cellars.into_values().collect()).await?;
        upsert_many::<nflp::ActiveModel>(&txn, changes.nflps.into_values().collect()).await?;

        let history: Vec<_> = changes.cellar_invests.into_values().collect();
        let history_count = history.len() as u64;
        let inserted = insert_new::<cellar_invest::ActiveModel>(&txn, history).await?;
        if inserted < history_count {
            tracing::warn!(
                skipped = history_count - inserted,
                "History records already present, kept existing rows"
            );
        }

        txn.commit().await?;
        tracing::debug!(written, "Committed change set");
        Ok(())
    }
}
