use std::collections::{BTreeMap, HashMap};
use std::sync::RwLock;
use std::sync::atomic::{AtomicBool, Ordering};

use async_trait::async_trait;
use serde_json::Value as JsonValue;

use super::r#trait::{Document, DocumentStore, StoreError};

/// In-memory document store.
///
/// Intended for tests/dev. Documents are kept per collection in key order.
#[derive(Debug, Default)]
pub struct InMemoryDocumentStore {
    collections: RwLock<HashMap<String, BTreeMap<String, JsonValue>>>,
    offline: AtomicBool,
}

impl InMemoryDocumentStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Simulate an outage: while offline every operation fails with
    /// [`StoreError::Unavailable`].
    pub fn set_offline(&self, offline: bool) {
        self.offline.store(offline, Ordering::SeqCst);
    }

    fn ensure_online(&self) -> Result<(), StoreError> {
        if self.offline.load(Ordering::SeqCst) {
            return Err(StoreError::unavailable("in-memory store is offline"));
        }
        Ok(())
    }
}

#[async_trait]
impl DocumentStore for InMemoryDocumentStore {
    async fn get(&self, collection: &str, key: &str) -> Result<Option<JsonValue>, StoreError> {
        self.ensure_online()?;
        let collections = self
            .collections
            .read()
            .map_err(|_| StoreError::unavailable("lock poisoned"))?;
        Ok(collections
            .get(collection)
            .and_then(|docs| docs.get(key))
            .cloned())
    }

    async fn set(&self, collection: &str, key: &str, body: JsonValue) -> Result<(), StoreError> {
        self.ensure_online()?;
        let mut collections = self
            .collections
            .write()
            .map_err(|_| StoreError::unavailable("lock poisoned"))?;
        collections
            .entry(collection.to_string())
            .or_default()
            .insert(key.to_string(), body);
        Ok(())
    }

    async fn delete(&self, collection: &str, key: &str) -> Result<(), StoreError> {
        self.ensure_online()?;
        let mut collections = self
            .collections
            .write()
            .map_err(|_| StoreError::unavailable("lock poisoned"))?;
        if let Some(docs) = collections.get_mut(collection) {
            docs.remove(key);
        }
        Ok(())
    }

    async fn scan(&self, collection: &str) -> Result<Vec<Document>, StoreError> {
        self.ensure_online()?;
        let collections = self
            .collections
            .read()
            .map_err(|_| StoreError::unavailable("lock poisoned"))?;
        Ok(collections
            .get(collection)
            .map(|docs| {
                docs.iter()
                    .map(|(k, v)| (k.clone(), v.clone()))
                    .collect()
            })
            .unwrap_or_default())
    }
}
