use sea_orm::Database;
use sea_orm_migration::MigratorTrait;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use cellar_indexer::config::IndexerConfig;
use cellar_indexer::store::PostgresStore;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    // Load environment variables
    let config = IndexerConfig::from_env()?;

    // Initialize tracing
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(&config.log_filter))
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Connect to database
    tracing::info!("Connecting to database...");
    let db = Database::connect(&config.database_url).await?;

    // Run migrations
    if config.run_migrations {
        tracing::info!("Running migrations...");
        migration::Migrator::up(&db, None).await?;
    } else {
        tracing::info!("Skipping migrations");
    }

    let store = PostgresStore::new(db);
    let summary = store.summary().await?;
    tracing::info!(
        tokens = summary.tokens,
        pools = summary.pools,
        cellars = summary.cellars,
        nflps = summary.nflps,
        cellar_invests = summary.cellar_invests,
        "Entity store ready"
    );

    Ok(())
}
