//! Entity store seam and the per-event write-set.
//!
//! Handlers never write to the store directly. They read through an
//! [`EventContext`], stage every mutation in its [`ChangeSet`], and commit
//! the whole set once the event has been fully processed. A handler that
//! returns early or fails simply drops its context.

pub mod memory;
pub mod postgres;

use async_trait::async_trait;
use std::collections::BTreeMap;

use crate::entities::{bundle, cellar, cellar_invest, factory, nflp, pool, token};
use crate::error::{Result, StoreError};

pub use memory::MemoryStore;
pub use postgres::PostgresStore;

/// Backing key-value store for the indexed entities
#[async_trait]
pub trait EntityStore: Send + Sync {
    async fn load_bundle(&self, id: &str) -> std::result::Result<Option<bundle::Model>, StoreError>;

    async fn load_factory(&self, id: &str) -> std::result::Result<Option<factory::Model>, StoreError>;

    async fn load_token(&self, id: &str) -> std::result::Result<Option<token::Model>, StoreError>;

    async fn load_pool(&self, id: &str) -> std::result::Result<Option<pool::Model>, StoreError>;

    async fn load_cellar(&self, id: &str) -> std::result::Result<Option<cellar::Model>, StoreError>;

    async fn load_nflp(&self, id: &str) -> std::result::Result<Option<nflp::Model>, StoreError>;

    async fn load_cellar_invest(
        &self,
        id: &str,
    ) -> std::result::Result<Option<cellar_invest::Model>, StoreError>;

    /// Apply all changes of one event, or none of them.
    /// History records already present are kept as they are.
    async fn commit(&self, changes: ChangeSet) -> std::result::Result<(), StoreError>;
}

/// Entities staged by one event, keyed by id
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ChangeSet {
    pub bundles: BTreeMap<String, bundle::Model>,
    pub factories: BTreeMap<String, factory::Model>,
    pub tokens: BTreeMap<String, token::Model>,
    pub pools: BTreeMap<String, pool::Model>,
    pub cellars: BTreeMap<String, cellar::Model>,
    pub nflps: BTreeMap<String, nflp::Model>,
    pub cellar_invests: BTreeMap<String, cellar_invest::Model>,
}

impl ChangeSet {
    pub fn len(&self) -> usize {
        self.bundles.len()
            + self.factories.len()
            + self.tokens.len()
            + self.pools.len()
            + self.cellars.len()
            + self.nflps.len()
            + self.cellar_invests.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Fold `other` into `self`: later entities replace earlier ones,
    /// except history records which are write-once.
    pub fn merge(&mut self, other: ChangeSet) {
        self.bundles.extend(other.bundles);
        self.factories.extend(other.factories);
        self.tokens.extend(other.tokens);
        self.pools.extend(other.pools);
        self.cellars.extend(other.cellars);
        self.nflps.extend(other.nflps);
        for (id, record) in other.cellar_invests {
            self.cellar_invests.entry(id).or_insert(record);
        }
    }
}

/// Read-through, write-back view of the store for a single event
pub struct EventContext<'a, S: EntityStore + ?Sized> {
    store: &'a S,
    changes: ChangeSet,
}

impl<'a, S: EntityStore + ?Sized> EventContext<'a, S> {
    pub fn new(store: &'a S) -> Self {
        Self {
            store,
            changes: ChangeSet::default(),
        }
    }

    pub fn changes(&self) -> &ChangeSet {
        &self.changes
    }

    pub async fn bundle(&self, id: &str) -> Result<Option<bundle::Model>> {
        if let Some(staged) = self.changes.bundles.get(id) {
            return Ok(Some(staged.clone()));
        }
        Ok(self.store.load_bundle(id).await?)
    }

    pub async fn factory(&self, id: &str) -> Result<Option<factory::Model>> {
        if let Some(staged) = self.changes.factories.get(id) {
            return Ok(Some(staged.clone()));
        }
        Ok(self.store.load_factory(id).await?)
    }

    pub async fn token(&self, id: &str) -> Result<Option<token::Model>> {
        if let Some(staged) = self.changes.tokens.get(id) {
            return Ok(Some(staged.clone()));
        }
        Ok(self.store.load_token(id).await?)
    }

    pub async fn pool(&self, id: &str) -> Result<Option<pool::Model>> {
        if let Some(staged) = self.changes.pools.get(id) {
            return Ok(Some(staged.clone()));
        }
        Ok(self.store.load_pool(id).await?)
    }

    pub async fn cellar(&self, id: &str) -> Result<Option<cellar::Model>> {
        if let Some(staged) = self.changes.cellars.get(id) {
            return Ok(Some(staged.clone()));
        }
        Ok(self.store.load_cellar(id).await?)
    }

    pub async fn nflp(&self, id: &str) -> Result<Option<nflp::Model>> {
        if let Some(staged) = self.changes.nflps.get(id) {
            return Ok(Some(staged.clone()));
        }
        Ok(self.store.load_nflp(id).await?)
    }

    pub async fn cellar_invest(&self, id: &str) -> Result<Option<cellar_invest::Model>> {
        if let Some(staged) = self.changes.cellar_invests.get(id) {
            return Ok(Some(staged.clone()));
        }
        Ok(self.store.load_cellar_invest(id).await?)
    }

    pub fn save_bundle(&mut self, model: bundle::Model) {
        self.changes.bundles.insert(model.id.clone(), model);
    }

    pub fn save_factory(&mut self, model: factory::Model) {
        self.changes.factories.insert(model.id.clone(), model);
    }

    pub fn save_token(&mut self, model: token::Model) {
        self.changes.tokens.insert(model.id.clone(), model);
    }

    pub fn save_pool(&mut self, model: pool::Model) {
        self.changes.pools.insert(model.id.clone(), model);
    }

    pub fn save_cellar(&mut self, model: cellar::Model) {
        self.changes.cellars.insert(model.id.clone(), model);
    }

    pub fn save_nflp(&mut self, model: nflp::Model) {
        self.changes.nflps.insert(model.id.clone(), model);
    }

    pub fn save_cellar_invest(&mut self, model: cellar_invest::Model) {
        self.changes.cellar_invests.insert(model.id.clone(), model);
    }

    /// Hand every staged entity to the store in one commit.
    /// Returns the number of entities written.
    pub async fn commit(self) -> Result<usize> {
        let written = self.changes.len();
        if written == 0 {
            return Ok(0);
        }
        self.store.commit(self.changes).await?;
        Ok(written)
    }
}
