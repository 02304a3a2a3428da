//! # Remote database strategy — PostgreSQL
//!
//! [`RemoteStore`] is the authoritative backend on server builds: a pooled
//! connection to PostgreSQL holding every collection in a single table.
//!
//! ## Schema
//!
//! | Column | Type | Purpose |
//! |--------|------|---------|
//! | `collection` | `TEXT` | logical collection name |
//! | `id` | `TEXT` primary key | backend-assigned document id |
//! | `doc` | `JSONB` | the document itself |
//!
//! Exact-match filters map onto JSONB containment (`doc @> filter`), which
//! gives the same every-key-equal semantics the local mock implements.
//! Updates are a shallow key merge (`doc || patch`), matching the mock.

use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;

use crate::error::DalError;
use crate::query::{Document, Filter};
use crate::store::{assign_insert_fields, StorageStrategy};

/// Connection-pooled strategy backed by PostgreSQL.
#[derive(Clone, Debug)]
pub struct RemoteStore {
    pool: PgPool,
}

impl RemoteStore {
    /// Connect to the database and make sure the documents table exists.
    pub async fn connect(database_url: &str) -> Result<Self, DalError> {
        let pool = PgPoolOptions::new()
            .max_connections(5)
            .connect(database_url)
            .await?;

        sqlx::query(
            "CREATE TABLE IF NOT EXISTS documents (
                collection TEXT NOT NULL,
                id TEXT PRIMARY KEY,
                doc JSONB NOT NULL
            )",
        )
        .execute(&pool)
        .await?;

        Ok(Self { pool })
    }

    fn filter_value(filter: &Filter) -> serde_json::Value {
        serde_json::Value::Object(filter.as_map().clone())
    }
}

impl StorageStrategy for RemoteStore {
    async fn find_one(
        &self,
        collection: &str,
        filter: &Filter,
    ) -> Result<Option<Document>, DalError> {
        let row: Option<(serde_json::Value,)> =
            sqlx::query_as("SELECT doc FROM documents WHERE collection = $1 AND doc @> $2 LIMIT 1")
                .bind(collection)
                .bind(Self::filter_value(filter))
                .fetch_optional(&self.pool)
                .await?;
        Ok(row.and_then(|(value,)| value.as_object().cloned()))
    }

    async fn find(&self, collection: &str, filter: &Filter) -> Result<Vec<Document>, DalError> {
        let rows: Vec<(serde_json::Value,)> =
            sqlx::query_as("SELECT doc FROM documents WHERE collection = $1 AND doc @> $2")
                .bind(collection)
                .bind(Self::filter_value(filter))
                .fetch_all(&self.pool)
                .await?;
        Ok(rows
            .into_iter()
            .filter_map(|(value,)| value.as_object().cloned())
            .collect())
    }

    async fn insert_one(&self, collection: &str, mut document: Document) -> Result<String, DalError> {
        let id = assign_insert_fields(&mut document);
        sqlx::query("INSERT INTO documents (collection, id, doc) VALUES ($1, $2, $3)")
            .bind(collection)
            .bind(&id)
            .bind(serde_json::Value::Object(document))
            .execute(&self.pool)
            .await?;
        Ok(id)
    }

    async fn update_one(
        &self,
        collection: &str,
        filter: &Filter,
        patch: &Document,
    ) -> Result<u64, DalError> {
        let result = sqlx::query(
            "UPDATE documents SET doc = doc || $3
             WHERE collection = $1
               AND id = (SELECT id FROM documents WHERE collection = $1 AND doc @> $2 LIMIT 1)",
        )
        .bind(collection)
        .bind(Self::filter_value(filter))
        .bind(serde_json::Value::Object(patch.clone()))
        .execute(&self.pool)
        .await?;
        Ok(result.rows_affected())
    }

    async fn delete_one(&self, collection: &str, filter: &Filter) -> Result<u64, DalError> {
        let result = sqlx::query(
            "DELETE FROM documents
             WHERE collection = $1
               AND id = (SELECT id FROM documents WHERE collection = $1 AND doc @> $2 LIMIT 1)",
        )
        .bind(collection)
        .bind(Self::filter_value(filter))
        .execute(&self.pool)
        .await?;
        Ok(result.rows_affected())
    }

    async fn ping(&self) -> Result<(), DalError> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }
}
