//! `pantry-core`: domain foundation building blocks.
//!
//! This crate contains **pure domain** primitives (no infrastructure concerns):
//! validated item names, positive quantities and the shared error model.

pub mod entity;
pub mod error;
pub mod name;
pub mod quantity;

pub use entity::Entity;
pub use error::{DomainError, DomainResult};
pub use name::ItemName;
pub use quantity::Quantity;
