//! Shared grocery list management.

pub mod service;

pub use service::{AddItemInput, GroceryService};
