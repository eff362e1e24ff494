//! Inventory domain module.
//!
//! This crate contains the business rules for pantry items, implemented purely
//! as deterministic domain logic (no IO, no HTTP, no storage): how a stored
//! document evolves under add / increment / decrement, what the list shows
//! about each item, and the feedback text for each outcome.

pub mod feedback;
pub mod item;

pub use feedback::{LIST_NOT_RELOADED, Outcome, report};
pub use item::{
    Decremented, EXPIRING_SOON_DAYS, ExpiryPolicy, InventoryDocument, InventoryItem, ItemStatus,
};
