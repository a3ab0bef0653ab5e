//! CLI command implementations.

pub mod clear;
pub mod migrate;
pub mod seed;

use scout_sales_server::config::{ConfigError, ServerConfig};
use scout_sales_server::db::{self, PgDocumentStore, StoreError};
use thiserror::Error;

/// Errors surfaced by CLI commands.
#[derive(Debug, Error)]
pub enum CliError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Migration error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),

    #[error("Store error: {0}")]
    Store(#[from] StoreError),

    #[error("Failed to read {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid seed file: {0}")]
    InvalidSeed(String),

    #[error("Refusing to clear {0} without --yes")]
    NotConfirmed(&'static str),
}

/// Connect to the database configured in the environment.
async fn connect() -> Result<sqlx::PgPool, CliError> {
    let config = ServerConfig::from_env()?;

    tracing::info!("Connecting to database...");
    let pool = db::create_pool(&config.database_url, config.database_max_connections).await?;
    tracing::info!("Connected to database");
    Ok(pool)
}

/// Open a document store on the configured database.
async fn open_store() -> Result<PgDocumentStore, CliError> {
    Ok(PgDocumentStore::new(connect().await?))
}
