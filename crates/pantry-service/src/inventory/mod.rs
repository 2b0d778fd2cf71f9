//! Inventory CRUD scoped to the caller's household.

pub mod service;

pub use service::{CreateItemInput, InventoryService};
