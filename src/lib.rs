// src/lib.rs

pub mod entities {
    pub mod prelude;
    pub mod bundle;
    pub mod cellar;
    pub mod cellar_invest;
    pub mod factory;
    pub mod nflp;
    pub mod pool;
    pub mod token;
}

pub mod services {
    pub mod accessors;
    pub mod fees;
    pub mod positions;
    pub mod tvl;
}

pub mod models {
    pub mod events;
}

pub mod chain;
pub mod config;
pub mod error;
pub mod handlers;
pub mod store;
pub mod utils;

pub use chain::{CallError, ChainReader};
pub use error::{IndexerError, Result};
pub use handlers::handle_event;
pub use models::events::IndexedEvent;
pub use store::{EntityStore, EventContext, MemoryStore, PostgresStore};
