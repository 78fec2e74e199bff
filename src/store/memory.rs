//! In-process entity store, used by tests and dry runs

use async_trait::async_trait;
use parking_lot::RwLock;

use super::{ChangeSet, EntityStore};
use crate::entities::{bundle, cellar, cellar_invest, factory, nflp, pool, token};
use crate::error::StoreError;

#[derive(Debug, Default)]
pub struct MemoryStore {
    tables: RwLock<ChangeSet>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Copy of every stored entity
    pub fn snapshot(&self) -> ChangeSet {
        self.tables.read().clone()
    }
}

#[async_trait]
impl EntityStore for MemoryStore {
    async fn load_bundle(&self, id: &str) -> Result<Option<bundle::Model>, StoreError> {
        Ok(self.tables.read().bundles.get(id).cloned())
    }

    async fn load_factory(&self, id: &str) -> Result<Option<factory::Model>, StoreError> {
        Ok(self.tables.read().factories.get(id).cloned())
    }

    async fn load_token(&self, id: &str) -> Result<Option<token::Model>, StoreError> {
        Ok(self.tables.read().tokens.get(id).cloned())
    }

    async fn load_pool(&self, id: &str) -> Result<Option<pool::Model>, StoreError> {
        Ok(self.tables.read().pools.get(id).cloned())
    }

    async fn load_cellar(&self, id: &str) -> Result<Option<cellar::Model>, StoreError> {
        Ok(self.tables.read().cellars.get(id).cloned())
    }

    async fn load_nflp(&self, id: &str) -> Result<Option<nflp::Model>, StoreError> {
        Ok(self.tables.read().nflps.get(id).cloned())
    }

    async fn load_cellar_invest(&self, id: &str) -> Result<Option<cellar_invest::Model>, StoreError> {
        Ok(self.tables.read().cellar_invests.get(id).cloned())
    }

    async fn commit(&self, changes: ChangeSet) -> Result<(), StoreError> {
        let written = changes.len();
        self.tables.write().merge(changes);
        tracing::trace!(written, "Committed change set to memory store");
        Ok(())
    }
}
