//! Document store access.
//!
//! # Store: `scout_sales.document`
//!
//! Every collection lives in one `PostgreSQL` table, one `JSONB` row per
//! document:
//!
//! - `contacts` - People the troop keeps in touch with
//! - `scouts` - Scouts selling this season
//! - `customers` - Buyers
//! - `salesheets` - Per-scout, per-year sales sheets
//!
//! Handlers talk to the store only through the [`DocumentStore`] trait, so
//! tests can swap in [`MemoryStore`].
//!
//! # Migrations
//!
//! Migrations are stored in `crates/server/migrations/` and run via:
//! ```bash
//! cargo run -p scout-sales-cli -- migrate
//! ```

pub mod memory;
pub mod postgres;

use std::time::Duration;

use async_trait::async_trait;
use secrecy::{ExposeSecret, SecretString};
use sqlx::PgPool;
use sqlx::postgres::PgPoolOptions;
use thiserror::Error;

use scout_sales_core::{
    Collection, DeleteResult, Document, DocumentId, Filter, IdError, UpdateResult,
};

pub use memory::MemoryStore;
pub use postgres::PgDocumentStore;

/// Errors that can occur during store operations.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Database error from sqlx.
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    /// An identifier could not be parsed.
    #[error("{0}")]
    MalformedId(#[from] IdError),

    /// Data in the store is corrupted or invalid.
    #[error("data corruption: {0}")]
    DataCorruption(String),

    /// The store cannot serve requests right now.
    #[error("store unavailable: {0}")]
    Unavailable(String),
}

/// Operations against named document collections.
///
/// Each method is a single store call. Implementations must be safe to share
/// between concurrently running handlers.
#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// Persist a new document under a freshly assigned identifier.
    ///
    /// Any `_id` already on the document is replaced. Returns the stored
    /// document including its identifier.
    async fn insert_one(
        &self,
        collection: Collection,
        document: Document,
    ) -> Result<Document, StoreError>;

    /// All documents matching the filter. Order is not guaranteed.
    async fn find(
        &self,
        collection: Collection,
        filter: &Filter,
    ) -> Result<Vec<Document>, StoreError>;

    /// The first document matching the filter, if any.
    async fn find_one(
        &self,
        collection: Collection,
        filter: &Filter,
    ) -> Result<Option<Document>, StoreError>;

    /// Replace the fields of the addressed document.
    ///
    /// The identifier and the stored `createDate` are kept. A missing
    /// document is not an error: the result reports zero matches.
    async fn replace_one(
        &self,
        collection: Collection,
        id: DocumentId,
        document: Document,
    ) -> Result<UpdateResult, StoreError>;

    /// Remove the addressed document. Zero deletions is not an error.
    async fn delete_one(
        &self,
        collection: Collection,
        id: DocumentId,
    ) -> Result<DeleteResult, StoreError>;

    /// Remove every document matching the filter.
    async fn delete_many(
        &self,
        collection: Collection,
        filter: &Filter,
    ) -> Result<DeleteResult, StoreError>;

    /// Check that the store is reachable.
    async fn ping(&self) -> Result<(), StoreError>;
}

/// Create a `PostgreSQL` connection pool with sensible defaults.
///
/// # Arguments
///
/// * `database_url` - `PostgreSQL` connection string (wrapped in `SecretString`)
/// * `max_connections` - Upper bound on pooled connections
///
/// # Errors
///
/// Returns `sqlx::Error` if the connection cannot be established.
pub async fn create_pool(
    database_url: &SecretString,
    max_connections: u32,
) -> Result<PgPool, sqlx::Error> {
    PgPoolOptions::new()
        .max_connections(max_connections)
        .min_connections(1)
        .acquire_timeout(Duration::from_secs(10))
        .connect(database_url.expose_secret())
        .await
}
