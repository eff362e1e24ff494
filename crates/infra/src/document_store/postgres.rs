//! Postgres-backed document store.
//!
//! Every collection lives in one `documents` table keyed by
//! `(collection, key)` with a JSONB body, which mirrors the get / set /
//! delete / scan surface of a hosted document database.
//!
//! ## Error Mapping
//!
//! | SQLx Error | StoreError |
//! |------------|------------|
//! | Database (any code) | `Unavailable` |
//! | PoolClosed / PoolTimedOut / Io / Tls | `Unavailable` |
//! | ColumnDecode / Decode | `Decode` |
//! | Other | `Unavailable` |

use std::sync::Arc;

use async_trait::async_trait;
use serde_json::Value as JsonValue;
use sqlx::types::Json;
use sqlx::{PgPool, Row};
use tracing::instrument;

use super::r#trait::{Document, DocumentStore, StoreError};

const CREATE_TABLE: &str = r#"
CREATE TABLE IF NOT EXISTS documents (
    collection TEXT NOT NULL,
    key TEXT NOT NULL,
    body JSONB NOT NULL,
    updated_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
    PRIMARY KEY (collection, key)
)
"#;

/// Postgres document store.
///
/// Uses the SQLx connection pool, so it is `Send + Sync` and cheap to clone.
/// Each operation is a single statement; read-modify-write sequences built on
/// top of it are not atomic.
#[derive(Debug, Clone)]
pub struct PostgresDocumentStore {
    pool: Arc<PgPool>,
}

impl PostgresDocumentStore {
    pub fn new(pool: PgPool) -> Self {
        Self {
            pool: Arc::new(pool),
        }
    }

    /// Connect and make sure the `documents` table exists.
    pub async fn connect(database_url: &str) -> Result<Self, StoreError> {
        let pool = PgPool::connect(database_url)
            .await
            .map_err(|e| map_sqlx_error("connect", e))?;
        let store = Self::new(pool);
        store.migrate().await?;
        Ok(store)
    }

    pub async fn migrate(&self) -> Result<(), StoreError> {
        sqlx::query(CREATE_TABLE)
            .execute(&*self.pool)
            .await
            .map_err(|e| map_sqlx_error("migrate", e))?;
        Ok(())
    }
}

#[async_trait]
impl DocumentStore for PostgresDocumentStore {
    #[instrument(skip(self), fields(operation = "get_document"))]
    async fn get(&self, collection: &str, key: &str) -> Result<Option<JsonValue>, StoreError> {
        let row = sqlx::query("SELECT body FROM documents WHERE collection = $1 AND key = $2")
            .bind(collection)
            .bind(key)
            .fetch_optional(&*self.pool)
            .await
            .map_err(|e| map_sqlx_error("get_document", e))?;

        match row {
            Some(row) => {
                let Json(body) = row
                    .try_get::<Json<JsonValue>, _>("body")
                    .map_err(|e| decode_error(key, e))?;
                Ok(Some(body))
            }
            None => Ok(None),
        }
    }

    #[instrument(skip(self, body), fields(operation = "set_document"))]
    async fn set(&self, collection: &str, key: &str, body: JsonValue) -> Result<(), StoreError> {
        sqlx::query(
            r#"
            INSERT INTO documents (collection, key, body)
            VALUES ($1, $2, $3)
            ON CONFLICT (collection, key)
            DO UPDATE SET
                body = EXCLUDED.body,
                updated_at = NOW()
            "#,
        )
        .bind(collection)
        .bind(key)
        .bind(Json(body))
        .execute(&*self.pool)
        .await
        .map_err(|e| map_sqlx_error("set_document", e))?;
        Ok(())
    }

    #[instrument(skip(self), fields(operation = "delete_document"))]
    async fn delete(&self, collection: &str, key: &str) -> Result<(), StoreError> {
        sqlx::query("DELETE FROM documents WHERE collection = $1 AND key = $2")
            .bind(collection)
            .bind(key)
            .execute(&*self.pool)
            .await
            .map_err(|e| map_sqlx_error("delete_document", e))?;
        Ok(())
    }

    #[instrument(skip(self), fields(operation = "scan_documents"))]
    async fn scan(&self, collection: &str) -> Result<Vec<Document>, StoreError> {
        let rows = sqlx::query("SELECT key, body FROM documents WHERE collection = $1 ORDER BY key")
            .bind(collection)
            .fetch_all(&*self.pool)
            .await
            .map_err(|e| map_sqlx_error("scan_documents", e))?;

        let mut documents = Vec::with_capacity(rows.len());
        for row in rows {
            let key: String = row
                .try_get("key")
                .map_err(|e| decode_error("<unknown>", e))?;
            let Json(body) = row
                .try_get::<Json<JsonValue>, _>("body")
                .map_err(|e| decode_error(&key, e))?;
            documents.push((key, body));
        }
        Ok(documents)
    }
}

fn decode_error(key: &str, err: sqlx::Error) -> StoreError {
    StoreError::Decode {
        key: key.to_string(),
        message: err.to_string(),
    }
}

fn map_sqlx_error(operation: &str, err: sqlx::Error) -> StoreError {
    let message = err.to_string();
    match err {
        sqlx::Error::Database(db_err) => StoreError::Unavailable(format!(
            "database error in {}: {}",
            operation,
            db_err.message()
        )),
        sqlx::Error::PoolClosed => {
            StoreError::Unavailable(format!("connection pool closed in {}", operation))
        }
        sqlx::Error::PoolTimedOut => {
            StoreError::Unavailable(format!("connection pool timed out in {}", operation))
        }
        sqlx::Error::ColumnDecode { .. } | sqlx::Error::Decode(_) => StoreError::Decode {
            key: operation.to_string(),
            message,
        },
        _ => StoreError::Unavailable(format!("{} failed: {}", operation, message)),
    }
}
