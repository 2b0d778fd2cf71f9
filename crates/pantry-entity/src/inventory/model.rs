//! Inventory item entity model.
//!
//! This is the one explicit, versioned contract the notification engine
//! depends on. External producers (the CRUD endpoints) must conform to
//! these field names and invariants; the engine never discovers fields
//! dynamically.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// A pantry item owned by a household.
///
/// Invariants: `quantity` and `threshold` are non-negative;
/// `expiry_date`, if present, is a valid calendar date.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct InventoryItem {
    /// Unique item identifier.
    pub id: Uuid,
    /// The owning household.
    pub household_id: Uuid,
    /// Item name.
    pub name: String,
    /// Category label (e.g. "Dairy", "Other").
    pub category: String,
    /// Quantity on hand.
    pub quantity: f64,
    /// Unit of measure (e.g. "pcs", "kg").
    pub unit: String,
    /// Low-stock trigger: a notification fires while `quantity <= threshold`
    /// and `threshold > 0`.
    pub threshold: f64,
    /// Calendar date the item expires, if known.
    pub expiry_date: Option<NaiveDate>,
    /// Storage location (pantry, fridge, ...).
    pub location: String,
    /// The member who last touched the item.
    pub last_updated_by: Option<Uuid>,
    /// When the item was created.
    pub created_at: DateTime<Utc>,
    /// When the item was last updated.
    pub updated_at: DateTime<Utc>,
}

impl InventoryItem {
    /// Whether the low-stock condition currently holds.
    pub fn is_low_stock(&self) -> bool {
        self.threshold > 0.0 && self.quantity <= self.threshold
    }
}

/// Data required to create a new inventory item.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewInventoryItem {
    /// The owning household.
    pub household_id: Uuid,
    /// Item name.
    pub name: String,
    /// Category label.
    pub category: String,
    /// Quantity on hand.
    pub quantity: f64,
    /// Unit of measure.
    pub unit: String,
    /// Low-stock trigger.
    pub threshold: f64,
    /// Expiry date, if known.
    pub expiry_date: Option<NaiveDate>,
    /// Storage location.
    pub location: String,
    /// The member creating the item.
    pub last_updated_by: Option<Uuid>,
}

/// Partial update to an inventory item. `None` leaves a field unchanged;
/// `expiry_date` distinguishes "leave unchanged" (`None`) from "clear"
/// (`Some(None)`).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct InventoryPatch {
    /// New item name.
    pub name: Option<String>,
    /// New category.
    pub category: Option<String>,
    /// New quantity.
    pub quantity: Option<f64>,
    /// New unit.
    pub unit: Option<String>,
    /// New threshold.
    pub threshold: Option<f64>,
    /// New expiry date (or `Some(None)` to clear it).
    pub expiry_date: Option<Option<NaiveDate>>,
    /// New location.
    pub location: Option<String>,
}

/// Query filter for inventory listings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InventoryFilter {
    /// All items for the household.
    All,
    /// Items at or below their low-stock threshold.
    LowStock,
    /// Items expiring within the given number of days from today.
    ExpiringWithin(i64),
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(quantity: f64, threshold: f64) -> InventoryItem {
        InventoryItem {
            id: Uuid::new_v4(),
            household_id: Uuid::new_v4(),
            name: "Milk".to_string(),
            category: "Dairy".to_string(),
            quantity,
            unit: "l".to_string(),
            threshold,
            expiry_date: None,
            location: "fridge".to_string(),
            last_updated_by: None,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn test_low_stock_at_threshold() {
        assert!(item(5.0, 5.0).is_low_stock());
        assert!(!item(6.0, 5.0).is_low_stock());
    }

    #[test]
    fn test_zero_threshold_never_low_stock() {
        assert!(!item(0.0, 0.0).is_low_stock());
    }
}
