use std::sync::Arc;

use async_trait::async_trait;
use serde_json::Value as JsonValue;
use thiserror::Error;

/// A document read back from a collection scan: `(key, body)`.
pub type Document = (String, JsonValue);

/// Document store operation error.
///
/// These are **infrastructure errors** (availability, encoding) as opposed to
/// domain errors (validation, invariants).
#[derive(Debug, Error)]
pub enum StoreError {
    /// The store could not be reached or refused the operation.
    #[error("document store unavailable: {0}")]
    Unavailable(String),

    /// A stored document did not match the expected shape.
    #[error("failed to decode document '{key}': {message}")]
    Decode { key: String, message: String },

    /// A document could not be encoded for writing.
    #[error("failed to encode document '{key}': {message}")]
    Encode { key: String, message: String },
}

impl StoreError {
    pub fn unavailable(msg: impl Into<String>) -> Self {
        Self::Unavailable(msg.into())
    }

    pub fn is_unavailable(&self) -> bool {
        matches!(self, StoreError::Unavailable(_))
    }
}

/// Keyed JSON document collections.
///
/// ## Semantics
///
/// - `get`: `Ok(None)` when the key does not exist
/// - `set`: creates or fully overwrites the document under `key`
/// - `delete`: removes the document; deleting a missing key is not an error
/// - `scan`: every document of the collection, in no particular order
///
/// Operations are independent round-trips. Nothing here is transactional, so a
/// read followed by a write can race with another writer.
#[async_trait]
pub trait DocumentStore: Send + Sync {
    async fn get(&self, collection: &str, key: &str) -> Result<Option<JsonValue>, StoreError>;

    async fn set(&self, collection: &str, key: &str, body: JsonValue) -> Result<(), StoreError>;

    async fn delete(&self, collection: &str, key: &str) -> Result<(), StoreError>;

    async fn scan(&self, collection: &str) -> Result<Vec<Document>, StoreError>;
}

#[async_trait]
impl<S> DocumentStore for Arc<S>
where
    S: DocumentStore + ?Sized,
{
    async fn get(&self, collection: &str, key: &str) -> Result<Option<JsonValue>, StoreError> {
        (**self).get(collection, key).await
    }

    async fn set(&self, collection: &str, key: &str, body: JsonValue) -> Result<(), StoreError> {
        (**self).set(collection, key, body).await
    }

    async fn delete(&self, collection: &str, key: &str) -> Result<(), StoreError> {
        (**self).delete(collection, key).await
    }

    async fn scan(&self, collection: &str) -> Result<Vec<Document>, StoreError> {
        (**self).scan(collection).await
    }
}
