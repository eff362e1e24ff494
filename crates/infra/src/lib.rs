//! Infrastructure layer: document store adapters and the action pipeline.

pub mod command_dispatcher;
pub mod document_store;
pub mod inventory_store;
pub mod voice_listener;


pub use command_dispatcher::{
    ActionResult, DispatchError, PantryDispatcher, PantrySnapshot, VoiceReport,
};
pub use document_store::{DocumentStore, InMemoryDocumentStore, PostgresDocumentStore, StoreError};
pub use inventory_store::{INVENTORY_COLLECTION, InventoryStore, InventoryStoreError, Mutation};
pub use voice_listener::{VoiceListenerHandle, run_voice_listener};
