//! Postgres-backed document store.
//!
//! All collections share one `documents` table: `(collection, id)` primary
//! key and a JSONB body. Rows are encoded with serde, so every [`Document`]
//! works against this backend unchanged.
//!
//! ## Error mapping
//!
//! | sqlx error | StoreError |
//! |---|---|
//! | unique violation (`23505`) on insert | `Duplicate` |
//! | any other database/pool error | `Backend` |
//! | JSON (de)serialization failure | `Codec` |

use std::marker::PhantomData;

use sqlx::{postgres::PgPoolOptions, PgPool, Row};
use uuid::Uuid;

use super::r#trait::{Document, DocumentStore, StoreError};

const SCHEMA: &str = r#"
CREATE TABLE IF NOT EXISTS documents (
    collection TEXT NOT NULL,
    id         UUID NOT NULL,
    body       JSONB NOT NULL,
    PRIMARY KEY (collection, id)
)
"#;

/// Connect a pool and ensure the documents table exists.
pub async fn connect(database_url: &str) -> Result<PgPool, StoreError> {
    let pool = PgPoolOptions::new()
        .connect(database_url)
        .await
        .map_err(|e| StoreError::Backend(e.to_string()))?;

    sqlx::query(SCHEMA)
        .execute(&pool)
        .await
        .map_err(|e| StoreError::Backend(e.to_string()))?;

    tracing::info!("postgres document store ready");
    Ok(pool)
}

/// One collection's view over the shared `documents` table.
#[derive(Debug, Clone)]
pub struct PostgresStore<T> {
    pool: PgPool,
    _marker: PhantomData<T>,
}

impl<T> PostgresStore<T> {
    pub fn new(pool: PgPool) -> Self {
        Self {
            pool,
            _marker: PhantomData,
        }
    }
}

fn encode<T: Document>(doc: &T) -> Result<serde_json::Value, StoreError> {
    serde_json::to_value(doc).map_err(|e| StoreError::Codec(e.to_string()))
}

fn decode<T: Document>(body: serde_json::Value) -> Result<T, StoreError> {
    serde_json::from_value(body).map_err(|e| StoreError::Codec(e.to_string()))
}

fn is_unique_violation(err: &sqlx::Error) -> bool {
    matches!(
        err,
        sqlx::Error::Database(db) if db.code().as_deref() == Some("23505")
    )
}

#[async_trait::async_trait]
impl<T: Document> DocumentStore<T> for PostgresStore<T> {
    async fn get(&self, id: Uuid) -> Result<Option<T>, StoreError> {
        let row = sqlx::query("SELECT body FROM documents WHERE collection = $1 AND id = $2")
            .bind(T::COLLECTION)
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| StoreError::Backend(e.to_string()))?;

        match row {
            Some(row) => {
                let body: serde_json::Value = row
                    .try_get("body")
                    .map_err(|e| StoreError::Backend(e.to_string()))?;
                Ok(Some(decode(body)?))
            }
            None => Ok(None),
        }
    }

    async fn list(&self) -> Result<Vec<T>, StoreError> {
        let rows = sqlx::query("SELECT body FROM documents WHERE collection = $1 ORDER BY id")
            .bind(T::COLLECTION)
            .fetch_all(&self.pool)
            .await
            .map_err(|e| StoreError::Backend(e.to_string()))?;

        let mut docs = Vec::with_capacity(rows.len());
        for row in rows {
            let body: serde_json::Value = row
                .try_get("body")
                .map_err(|e| StoreError::Backend(e.to_string()))?;
            docs.push(decode(body)?);
        }
        Ok(docs)
    }

    async fn insert(&self, doc: &T) -> Result<(), StoreError> {
        let id = doc.document_id();
        sqlx::query("INSERT INTO documents (collection, id, body) VALUES ($1, $2, $3)")
            .bind(T::COLLECTION)
            .bind(id)
            .bind(encode(doc)?)
            .execute(&self.pool)
            .await
            .map_err(|e| {
                if is_unique_violation(&e) {
                    StoreError::Duplicate(id)
                } else {
                    StoreError::Backend(e.to_string())
                }
            })?;
        Ok(())
    }

    async fn replace(&self, doc: &T) -> Result<bool, StoreError> {
        let result =
            sqlx::query("UPDATE documents SET body = $3 WHERE collection = $1 AND id = $2")
                .bind(T::COLLECTION)
                .bind(doc.document_id())
                .bind(encode(doc)?)
                .execute(&self.pool)
                .await
                .map_err(|e| StoreError::Backend(e.to_string()))?;
        Ok(result.rows_affected() > 0)
    }

    async fn remove(&self, id: Uuid) -> Result<bool, StoreError> {
        let result = sqlx::query("DELETE FROM documents WHERE collection = $1 AND id = $2")
            .bind(T::COLLECTION)
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| StoreError::Backend(e.to_string()))?;
        Ok(result.rows_affected() > 0)
    }
}
