use std::sync::Arc;

use pantry_infra::{
    DocumentStore, InMemoryDocumentStore, InventoryStore, PantryDispatcher, PostgresDocumentStore,
    StoreError,
};

use crate::config::StoreBackend;

/// Store-agnostic dispatcher used by every handler.
pub type Dispatcher = PantryDispatcher<Arc<dyn DocumentStore>>;

/// Shared state handed to handlers through an `Extension`.
#[derive(Clone)]
pub struct AppServices {
    pub dispatcher: Arc<Dispatcher>,
}

impl AppServices {
    /// Wrap an already-built document store.
    pub fn with_store(store: Arc<dyn DocumentStore>) -> Self {
        Self {
            dispatcher: Arc::new(PantryDispatcher::new(InventoryStore::new(store))),
        }
    }

    pub fn in_memory() -> Self {
        Self::with_store(Arc::new(InMemoryDocumentStore::new()))
    }

    pub async fn from_config(backend: &StoreBackend) -> Result<Self, StoreError> {
        match backend {
            StoreBackend::Memory => {
                tracing::info!("using in-memory pantry store");
                Ok(Self::in_memory())
            }
            StoreBackend::Postgres { database_url } => {
                tracing::info!("using postgres pantry store");
                let store = PostgresDocumentStore::connect(database_url).await?;
                Ok(Self::with_store(Arc::new(store)))
            }
        }
    }
}
