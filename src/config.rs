//! Runtime configuration read from the environment (and `.env`)

use std::env;

use crate::error::{IndexerError, Result};

/// Postgres connection string
const ENV_DATABASE_URL: &str = "DATABASE_URL";

/// Set to "false" to skip schema migrations on startup
const ENV_RUN_MIGRATIONS: &str = "RUN_MIGRATIONS";

/// Overrides the `EnvFilter` directive of the binary
const ENV_LOG_FILTER: &str = "RUST_LOG";

const DEFAULT_LOG_FILTER: &str = "info,cellar_indexer=debug";

#[derive(Debug, Clone)]
pub struct IndexerConfig {
    pub database_url: String,
    pub run_migrations: bool,
    pub log_filter: String,
}

impl IndexerConfig {
    /// Load configuration, reading `.env` first when present
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok();

        let database_url = env::var(ENV_DATABASE_URL)
            .map_err(|_| IndexerError::Configuration(format!("{} must be set", ENV_DATABASE_URL)))?;

        let run_migrations = env::var(ENV_RUN_MIGRATIONS)
            .map(|v| v.to_lowercase() != "false")
            .unwrap_or(true);

        let log_filter = env::var(ENV_LOG_FILTER).unwrap_or_else(|_| DEFAULT_LOG_FILTER.to_string());

        Ok(Self {
            database_url,
            run_migrations,
            log_filter,
        })
    }
}
