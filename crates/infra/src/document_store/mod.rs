//! Document store boundary.
//!
//! The pantry only relies on four operations against a keyed collection:
//! get, set (upsert with full overwrite), delete and scan. Anything that
//! offers those can back the inventory.

pub mod in_memory;
pub mod postgres;
pub mod r#trait;

pub use in_memory::InMemoryDocumentStore;
pub use postgres::PostgresDocumentStore;
pub use r#trait::{Document, DocumentStore, StoreError};
