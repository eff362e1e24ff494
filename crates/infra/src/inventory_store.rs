//! Inventory store adapter: pantry operations on top of a [`DocumentStore`].
//!
//! Every mutation is a read followed by a write (or delete) in two separate
//! round-trips. There is no compare-and-set, so two concurrent mutations of
//! the same item can lose an update: both read quantity `n`, both write
//! `n + 1`. This mirrors the hosted store's plain get/set surface and is a
//! known limitation, not something callers can rely on being fixed here.

use serde_json::Value as JsonValue;
use thiserror::Error;

use pantry_core::{DomainError, Entity, ItemName, Quantity};
use pantry_inventory::{Decremented, ExpiryPolicy, InventoryDocument, InventoryItem};

use crate::document_store::{DocumentStore, StoreError};

/// Collection holding one document per pantry item, keyed by item name.
pub const INVENTORY_COLLECTION: &str = "inventory";

#[derive(Debug, Error)]
pub enum InventoryStoreError {
    #[error(transparent)]
    Store(#[from] StoreError),

    #[error(transparent)]
    Domain(#[from] DomainError),
}

/// What a mutation did to the stored record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Mutation {
    /// A new record was written.
    Created(InventoryItem),
    /// An existing record was overwritten with a new quantity.
    Updated(InventoryItem),
    /// The record was deleted (or was already absent, for `remove`).
    Deleted,
    /// The record did not exist; nothing was written.
    Missing,
}

/// Pantry operations over a keyed document collection.
#[derive(Debug, Clone)]
pub struct InventoryStore<S> {
    store: S,
    collection: String,
}

impl<S> InventoryStore<S>
where
    S: DocumentStore,
{
    pub fn new(store: S) -> Self {
        Self::with_collection(store, INVENTORY_COLLECTION)
    }

    pub fn with_collection(store: S, collection: impl Into<String>) -> Self {
        Self {
            store,
            collection: collection.into(),
        }
    }

    /// Read one record by exact (case-sensitive) name.
    pub async fn get(&self, name: &ItemName) -> Result<Option<InventoryDocument>, InventoryStoreError> {
        let body = self.store.get(&self.collection, name.as_str()).await?;
        body.map(|b| decode(name.as_str(), b)).transpose()
    }

    /// Add `delta` units, creating the record when it does not exist.
    pub async fn add_or_increment(
        &self,
        name: &ItemName,
        delta: Quantity,
        expiry: ExpiryPolicy,
    ) -> Result<Mutation, InventoryStoreError> {
        let mutation = match self.get(name).await? {
            Some(existing) => {
                let next = existing.added(delta, expiry)?;
                Mutation::Updated(self.write(name, next).await?)
            }
            None => {
                let next = InventoryDocument::created(delta, expiry);
                Mutation::Created(self.write(name, next).await?)
            }
        };
        tracing::info!(item = %name, delta = delta.get(), "added to inventory");
        Ok(mutation)
    }

    /// Add one unit to an existing record. Missing records are left alone.
    pub async fn increment(&self, name: &ItemName) -> Result<Mutation, InventoryStoreError> {
        let Some(existing) = self.get(name).await? else {
            tracing::debug!(item = %name, "increment of missing item ignored");
            return Ok(Mutation::Missing);
        };
        let item = self.write(name, existing.incremented()?).await?;
        tracing::info!(item = %name, quantity = item.quantity(), "incremented");
        Ok(Mutation::Updated(item))
    }

    /// Take one unit away, deleting the record when the last unit goes.
    pub async fn decrement(&self, name: &ItemName) -> Result<Mutation, InventoryStoreError> {
        let Some(existing) = self.get(name).await? else {
            tracing::debug!(item = %name, "decrement of missing item ignored");
            return Ok(Mutation::Missing);
        };
        match existing.decremented() {
            Decremented::Write(next) => {
                let item = self.write(name, next).await?;
                tracing::info!(item = %name, quantity = item.quantity(), "decremented");
                Ok(Mutation::Updated(item))
            }
            Decremented::Delete => {
                self.store.delete(&self.collection, name.as_str()).await?;
                tracing::info!(item = %name, "last unit used; record deleted");
                Ok(Mutation::Deleted)
            }
        }
    }

    /// Delete the record whether or not it exists.
    pub async fn remove(&self, name: &ItemName) -> Result<Mutation, InventoryStoreError> {
        self.store.delete(&self.collection, name.as_str()).await?;
        tracing::info!(item = %name, "removed from inventory");
        Ok(Mutation::Deleted)
    }

    /// Every record of the collection, sorted by name.
    ///
    /// Documents that cannot be turned into a list row (bad key, undecodable
    /// body, zero quantity) are skipped with a warning so one bad record does
    /// not hide the rest of the pantry.
    pub async fn list(&self) -> Result<Vec<InventoryItem>, InventoryStoreError> {
        let documents = self.store.scan(&self.collection).await?;
        let mut items = Vec::with_capacity(documents.len());
        for (key, body) in documents {
            let item = decode(&key, body)
                .and_then(|doc| InventoryItem::from_document(&key, doc).map_err(Into::into));
            match item {
                Ok(item) => items.push(item),
                Err(e) => tracing::warn!(key = %key, error = %e, "skipping malformed inventory document"),
            }
        }
        items.sort_by(|a, b| a.id().cmp(b.id()));
        Ok(items)
    }

    /// Case-insensitive lookup over a fresh listing.
    pub async fn lookup(&self, name: &str) -> Result<Option<InventoryItem>, InventoryStoreError> {
        Ok(self
            .list()
            .await?
            .into_iter()
            .find(|item| item.name().matches_ignore_case(name)))
    }

    async fn write(
        &self,
        name: &ItemName,
        doc: InventoryDocument,
    ) -> Result<InventoryItem, InventoryStoreError> {
        let body = serde_json::to_value(&doc).map_err(|e| StoreError::Encode {
            key: name.to_string(),
            message: e.to_string(),
        })?;
        self.store.set(&self.collection, name.as_str(), body).await?;
        Ok(InventoryItem::new(name.clone(), doc.quantity, doc.expiration_date)?)
    }
}

fn decode(key: &str, body: JsonValue) -> Result<InventoryDocument, InventoryStoreError> {
    serde_json::from_value(body).map_err(|e| {
        StoreError::Decode {
            key: key.to_string(),
            message: e.to_string(),
        }
        .into()
    })
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use chrono::{TimeZone, Utc};
    use serde_json::json;

    use super::*;
    use crate::document_store::InMemoryDocumentStore;

    fn name(s: &str) -> ItemName {
        ItemName::new(s).unwrap()
    }

    fn qty(n: u32) -> Quantity {
        Quantity::new(n).unwrap()
    }

    fn setup() -> (Arc<InMemoryDocumentStore>, InventoryStore<Arc<InMemoryDocumentStore>>) {
        let docs = Arc::new(InMemoryDocumentStore::new());
        (docs.clone(), InventoryStore::new(docs))
    }

    async fn quantity_of(store: &InventoryStore<Arc<InMemoryDocumentStore>>, n: &str) -> Option<u32> {
        store.get(&name(n)).await.unwrap().map(|d| d.quantity)
    }

    #[tokio::test]
    async fn add_creates_then_accumulates() {
        let (_, store) = setup();

        let first = store
            .add_or_increment(&name("milk"), qty(2), ExpiryPolicy::Preserve)
            .await
            .unwrap();
        assert!(matches!(first, Mutation::Created(ref i) if i.quantity() == 2));

        let second = store
            .add_or_increment(&name("milk"), qty(3), ExpiryPolicy::Preserve)
            .await
            .unwrap();
        assert!(matches!(second, Mutation::Updated(ref i) if i.quantity() == 5));
        assert_eq!(quantity_of(&store, "milk").await, Some(5));
    }

    #[tokio::test]
    async fn add_then_list_round_trip() {
        let (_, store) = setup();
        store
            .add_or_increment(&name("rice"), qty(4), ExpiryPolicy::Preserve)
            .await
            .unwrap();
        let items = store.list().await.unwrap();
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].name().as_str(), "rice");
        assert_eq!(items[0].quantity(), 4);
    }

    #[tokio::test]
    async fn manual_add_replaces_expiration_and_voice_add_keeps_it() {
        let (docs, store) = setup();
        let date = Utc.with_ymd_and_hms(2024, 9, 1, 0, 0, 0).unwrap();

        store
            .add_or_increment(&name("yogurt"), qty(1), ExpiryPolicy::Replace(Some(date)))
            .await
            .unwrap();
        store
            .add_or_increment(&name("yogurt"), qty(2), ExpiryPolicy::Preserve)
            .await
            .unwrap();
        let doc = store.get(&name("yogurt")).await.unwrap().unwrap();
        assert_eq!(doc.quantity, 3);
        assert_eq!(doc.expiration_date, Some(date));

        store
            .add_or_increment(&name("yogurt"), qty(1), ExpiryPolicy::Replace(None))
            .await
            .unwrap();
        let body = docs.get(INVENTORY_COLLECTION, "yogurt").await.unwrap().unwrap();
        assert_eq!(body, json!({ "quantity": 4 }));
    }

    #[tokio::test]
    async fn increment_missing_is_noop() {
        let (_, store) = setup();
        assert_eq!(store.increment(&name("salt")).await.unwrap(), Mutation::Missing);
        assert!(store.list().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn increment_existing_adds_one() {
        let (_, store) = setup();
        store
            .add_or_increment(&name("salt"), qty(1), ExpiryPolicy::Preserve)
            .await
            .unwrap();
        store.increment(&name("salt")).await.unwrap();
        assert_eq!(quantity_of(&store, "salt").await, Some(2));
    }

    #[tokio::test]
    async fn decrement_at_one_deletes_record() {
        let (_, store) = setup();
        store
            .add_or_increment(&name("eggs"), qty(1), ExpiryPolicy::Preserve)
            .await
            .unwrap();
        assert_eq!(store.decrement(&name("eggs")).await.unwrap(), Mutation::Deleted);
        assert!(store.list().await.unwrap().iter().all(|i| i.name().as_str() != "eggs"));
    }

    #[tokio::test]
    async fn decrement_above_one_keeps_record() {
        let (_, store) = setup();
        store
            .add_or_increment(&name("eggs"), qty(3), ExpiryPolicy::Preserve)
            .await
            .unwrap();
        let m = store.decrement(&name("eggs")).await.unwrap();
        assert!(matches!(m, Mutation::Updated(ref i) if i.quantity() == 2));
        assert_eq!(quantity_of(&store, "eggs").await, Some(2));
    }

    #[tokio::test]
    async fn decrement_missing_is_noop() {
        let (_, store) = setup();
        assert_eq!(store.decrement(&name("eggs")).await.unwrap(), Mutation::Missing);
    }

    #[tokio::test]
    async fn remove_is_idempotent() {
        let (_, store) = setup();
        store.remove(&name("nonexistent")).await.unwrap();
        store.remove(&name("nonexistent")).await.unwrap();
        assert!(store.list().await.unwrap().is_empty());

        store
            .add_or_increment(&name("flour"), qty(2), ExpiryPolicy::Preserve)
            .await
            .unwrap();
        store.remove(&name("flour")).await.unwrap();
        store.remove(&name("flour")).await.unwrap();
        assert_eq!(quantity_of(&store, "flour").await, None);
    }

    #[tokio::test]
    async fn names_are_case_sensitive_keys_but_lookup_is_not() {
        let (_, store) = setup();
        store
            .add_or_increment(&name("Milk"), qty(2), ExpiryPolicy::Preserve)
            .await
            .unwrap();
        assert_eq!(quantity_of(&store, "milk").await, None);
        let found = store.lookup("milk").await.unwrap().unwrap();
        assert_eq!(found.name().as_str(), "Milk");
        assert!(store.lookup("bread").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn list_is_sorted_and_skips_malformed_documents() {
        let (docs, store) = setup();
        docs.set(INVENTORY_COLLECTION, "tea", json!({ "quantity": 1 })).await.unwrap();
        docs.set(INVENTORY_COLLECTION, "beans", json!({ "quantity": 3 })).await.unwrap();
        docs.set(INVENTORY_COLLECTION, "ghost", json!({ "quantity": 0 })).await.unwrap();
        docs.set(INVENTORY_COLLECTION, "junk", json!({ "qty": "lots" })).await.unwrap();

        let names: Vec<String> = store
            .list()
            .await
            .unwrap()
            .iter()
            .map(|i| i.name().to_string())
            .collect();
        assert_eq!(names, vec!["beans", "tea"]);
    }

    #[tokio::test]
    async fn malformed_document_fails_mutation() {
        let (docs, store) = setup();
        docs.set(INVENTORY_COLLECTION, "junk", json!({ "qty": "lots" })).await.unwrap();
        let err = store.increment(&name("junk")).await.unwrap_err();
        assert!(matches!(err, InventoryStoreError::Store(StoreError::Decode { .. })));
    }

    #[tokio::test]
    async fn unavailable_store_propagates() {
        let (docs, store) = setup();
        docs.set_offline(true);
        let err = store
            .add_or_increment(&name("milk"), qty(1), ExpiryPolicy::Preserve)
            .await
            .unwrap_err();
        assert!(matches!(err, InventoryStoreError::Store(ref e) if e.is_unavailable()));
    }

    #[tokio::test]
    async fn custom_collection_is_isolated() {
        let docs = Arc::new(InMemoryDocumentStore::new());
        let main = InventoryStore::new(docs.clone());
        let other = InventoryStore::with_collection(docs, "cellar");
        other
            .add_or_increment(&name("wine"), qty(6), ExpiryPolicy::Preserve)
            .await
            .unwrap();
        assert!(main.list().await.unwrap().is_empty());
        assert_eq!(other.list().await.unwrap().len(), 1);
    }
}
