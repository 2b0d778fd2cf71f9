//! Inventory item entity.

pub mod model;

pub use model::{InventoryFilter, InventoryItem, InventoryPatch, NewInventoryItem};
