// server/src/db/mod.rs

//! PostgreSQL pool setup, migrations and the [`PgStore`] implementation of
//! the `stockwatch` store traits.

pub mod pg_store;

pub use pg_store::PgStore;

use crate::config::AppConfig;
use crate::errors::{AppError, Result};
use sqlx::postgres::{PgPool, PgPoolOptions};
use tracing::{error, info};

pub async fn connect_pool(config: &AppConfig) -> Result<PgPool> {
  PgPoolOptions::new()
    .max_connections(config.database_max_connections)
    .connect(&config.database_url)
    .await
    .map_err(|e| {
      error!(error = %e, "Failed to connect to the database.");
      AppError::Sqlx(e)
    })
}

pub async fn run_migrations(pool: &PgPool) -> Result<()> {
  sqlx::migrate!("./migrations").run(pool).await.map_err(|e| {
    error!(error = %e, "Database migration failed.");
    AppError::Internal(format!("Migration failed: {}", e))
  })?;
  info!("Database migrations applied.");
  Ok(())
}
