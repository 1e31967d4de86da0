use anyhow::Result;
use sqlx::{Pool, Postgres, postgres::PgPoolOptions};
use std::time::Duration;
use tracing::info;

use crate::config::Config;

pub type DatabasePool = Pool<Postgres>;

pub async fn setup_database(config: &Config) -> Result<DatabasePool> {
    info!("Connecting to database");

    let pool = PgPoolOptions::new()
        .max_connections(config.database_max_connections)
        .acquire_timeout(Duration::from_secs(3))
        .test_before_acquire(true)
        .connect(&config.database_url)
        .await?;

    // Fail fast on an unreachable database rather than at first request
    sqlx::query("SELECT 1").execute(&pool).await?;
    info!("Database connection established");

    Ok(pool)
}

pub async fn run_migrations(pool: &DatabasePool) -> Result<()> {
    info!("Running database migrations");

    sqlx::migrate!("./migrations").run(pool).await?;

    info!("Database migrations completed");
    Ok(())
}
