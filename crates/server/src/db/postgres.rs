//! `PostgreSQL`-backed document store.
//!
//! Documents are kept as `JSONB` rows in `scout_sales.document`. The
//! identifier lives in the `id` column and is merged into the body on read.
//! Queries are built at runtime with `QueryBuilder` since filters are dynamic.

use async_trait::async_trait;
use serde_json::Value;
use sqlx::types::Json;
use sqlx::{PgPool, Postgres, QueryBuilder};

use scout_sales_core::{
    Collection, DeleteResult, Document, DocumentId, Filter, UpdateResult,
};

use super::{DocumentStore, StoreError};

// =============================================================================
// Internal Row Types
// =============================================================================

/// Internal row type for document queries.
#[derive(Debug, sqlx::FromRow)]
struct DocumentRow {
    id: DocumentId,
    body: Json<Value>,
}

impl TryFrom<DocumentRow> for Document {
    type Error = StoreError;

    fn try_from(row: DocumentRow) -> Result<Self, Self::Error> {
        let doc = Self::try_from(row.body.0).map_err(|e| {
            StoreError::DataCorruption(format!("document {} in database: {e}", row.id))
        })?;
        Ok(doc.with_id(row.id))
    }
}

// =============================================================================
// Store
// =============================================================================

/// Document store over a shared `PostgreSQL` pool.
///
/// Cloning is cheap; all clones share the pool.
#[derive(Debug, Clone)]
pub struct PgDocumentStore {
    pool: PgPool,
}

impl PgDocumentStore {
    /// Create a store over an existing pool.
    #[must_use]
    pub const fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

/// Append `WHERE` conditions for a collection and filter.
fn push_conditions(qb: &mut QueryBuilder<'_, Postgres>, collection: Collection, filter: &Filter) {
    qb.push(" WHERE collection = ");
    qb.push_bind(collection.as_str());

    if let Some(id) = filter.id() {
        qb.push(" AND id = ");
        qb.push_bind(id);
    }

    for (field, value) in filter.fields() {
        qb.push(" AND body ->> ");
        qb.push_bind(field.clone());
        qb.push(" = ");
        qb.push_bind(value.clone());
    }
}

fn select_query(collection: Collection, filter: &Filter) -> QueryBuilder<'static, Postgres> {
    let mut qb = QueryBuilder::new("SELECT id, body FROM scout_sales.document");
    push_conditions(&mut qb, collection, filter);
    qb.push(" ORDER BY created_at, id");
    qb
}

#[async_trait]
impl DocumentStore for PgDocumentStore {
    async fn insert_one(
        &self,
        collection: Collection,
        mut document: Document,
    ) -> Result<Document, StoreError> {
        document.strip_id();
        let id = DocumentId::generate();

        sqlx::query(
            r"
            INSERT INTO scout_sales.document (id, collection, body)
            VALUES ($1, $2, $3)
            ",
        )
        .bind(id)
        .bind(collection.as_str())
        .bind(Json(&document))
        .execute(&self.pool)
        .await?;

        Ok(document.with_id(id))
    }

    async fn find(
        &self,
        collection: Collection,
        filter: &Filter,
    ) -> Result<Vec<Document>, StoreError> {
        let rows = select_query(collection, filter)
            .build_query_as::<DocumentRow>()
            .fetch_all(&self.pool)
            .await?;

        rows.into_iter().map(Document::try_from).collect()
    }

    async fn find_one(
        &self,
        collection: Collection,
        filter: &Filter,
    ) -> Result<Option<Document>, StoreError> {
        let mut qb = select_query(collection, filter);
        qb.push(" LIMIT 1");

        let row = qb
            .build_query_as::<DocumentRow>()
            .fetch_optional(&self.pool)
            .await?;

        row.map(Document::try_from).transpose()
    }

    async fn replace_one(
        &self,
        collection: Collection,
        id: DocumentId,
        mut document: Document,
    ) -> Result<UpdateResult, StoreError> {
        document.strip_id();
        document.remove(Document::CREATE_DATE_FIELD);

        // Stored createDate wins over the incoming body
        let result = sqlx::query(
            r"
            UPDATE scout_sales.document
            SET body = CASE
                WHEN body ? $4 THEN $3 || jsonb_build_object($4::text, body -> $4)
                ELSE $3
            END
            WHERE collection = $1 AND id = $2
            ",
        )
        .bind(collection.as_str())
        .bind(id)
        .bind(Json(&document))
        .bind(Document::CREATE_DATE_FIELD)
        .execute(&self.pool)
        .await?;

        Ok(UpdateResult::matched(result.rows_affected()))
    }

    async fn delete_one(
        &self,
        collection: Collection,
        id: DocumentId,
    ) -> Result<DeleteResult, StoreError> {
        let result = sqlx::query(
            r"
            DELETE FROM scout_sales.document
            WHERE collection = $1 AND id = $2
            ",
        )
        .bind(collection.as_str())
        .bind(id)
        .execute(&self.pool)
        .await?;

        Ok(DeleteResult::deleted(result.rows_affected()))
    }

    async fn delete_many(
        &self,
        collection: Collection,
        filter: &Filter,
    ) -> Result<DeleteResult, StoreError> {
        let mut qb = QueryBuilder::new("DELETE FROM scout_sales.document");
        push_conditions(&mut qb, collection, filter);

        let result = qb.build().execute(&self.pool).await?;

        Ok(DeleteResult::deleted(result.rows_affected()))
    }

    async fn ping(&self) -> Result<(), StoreError> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }
}
