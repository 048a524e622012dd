//! Database pool configuration and migrations

use anyhow::{Context, Result};
use sqlx::migrate::Migrator;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};
use std::str::FromStr;
use std::time::Duration;
use tracing::info;

static MIGRATOR: Migrator = sqlx::migrate!("./migrations");

/// Create a SQLite connection pool, creating the database file if needed.
///
/// In-memory URLs get a single long-lived connection, otherwise every
/// pooled connection would see its own empty database.
pub async fn create_pool(database_url: &str, max_connections: u32) -> Result<SqlitePool> {
    let options = SqliteConnectOptions::from_str(database_url)
        .with_context(|| format!("Invalid database URL: {database_url}"))?
        .create_if_missing(true);

    let in_memory = database_url.contains(":memory:");

    let pool_options = if in_memory {
        SqlitePoolOptions::new()
            .max_connections(1)
            .min_connections(1)
            .idle_timeout(None)
            .max_lifetime(None)
    } else {
        SqlitePoolOptions::new()
            .max_connections(max_connections.max(1))
            // Don't wait too long for a connection
            .acquire_timeout(Duration::from_secs(10))
            // Close idle connections after a while
            .idle_timeout(Duration::from_secs(600))
    };

    pool_options
        .connect_with(options)
        .await
        .context("Failed to connect to database")
}

/// Apply any pending embedded migrations.
pub async fn run_migrations(pool: &SqlitePool) -> Result<()> {
    let pending = MIGRATOR
        .migrations
        .iter()
        .filter(|m| !m.migration_type.is_down_migration())
        .count();
    info!("Checking {} migrations...", pending);

    MIGRATOR.run(pool).await.context("Migration failed")?;

    info!("Migrations complete");
    Ok(())
}

/// Pool with the schema applied, ready for a [`super::CompanionStore`].
pub async fn connect(database_url: &str, max_connections: u32) -> Result<SqlitePool> {
    let pool = create_pool(database_url, max_connections).await?;
    run_migrations(&pool).await?;
    Ok(pool)
}
