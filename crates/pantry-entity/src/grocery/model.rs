//! Grocery list entity model.
//!
//! Each household has exactly one *active* list at a time (enforced by a
//! partial unique index); completing a list immediately starts a fresh one.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// Lifecycle state of a grocery list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "list_status", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum ListStatus {
    /// The household's current shopping list.
    Active,
    /// A finished shopping trip; kept for history.
    Completed,
}

/// Why a line exists on the list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "list_item_source", rename_all = "snake_case")]
#[serde(rename_all = "camelCase")]
pub enum ItemSource {
    /// Added by a household member.
    Manual,
    /// Synced from a low-stock inventory item.
    LowStock,
}

/// A household shopping list.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct GroceryList {
    /// Unique list identifier.
    pub id: Uuid,
    /// The owning household.
    pub household_id: Uuid,
    /// Lifecycle state.
    pub status: ListStatus,
    /// List title.
    pub title: String,
    /// When low-stock items were last synced in.
    pub generated_at: Option<DateTime<Utc>>,
    /// When the list was completed.
    pub completed_at: Option<DateTime<Utc>>,
    /// When the list was created.
    pub created_at: DateTime<Utc>,
}

/// A line item on a grocery list.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct GroceryListItem {
    /// Unique line identifier.
    pub id: Uuid,
    /// The list this line belongs to.
    pub list_id: Uuid,
    /// Item name.
    pub name: String,
    /// Category label.
    pub category: String,
    /// Quantity to buy.
    pub quantity: f64,
    /// Unit of measure.
    pub unit: String,
    /// Whether the line has been picked up.
    pub checked: bool,
    /// How the line got onto the list.
    pub source: ItemSource,
    /// Free-form notes.
    pub notes: String,
    /// The member who added the line, if added manually.
    pub added_by: Option<Uuid>,
    /// When the line was added.
    pub created_at: DateTime<Utc>,
}

/// Data required to add a line to a list.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewListItem {
    /// Item name.
    pub name: String,
    /// Category label.
    pub category: String,
    /// Quantity to buy.
    pub quantity: f64,
    /// Unit of measure.
    pub unit: String,
    /// How the line got onto the list.
    pub source: ItemSource,
    /// Free-form notes.
    pub notes: String,
    /// The member adding the line.
    pub added_by: Option<Uuid>,
}

/// Partial update to a list line. `None` leaves a field unchanged.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ListItemPatch {
    /// New name.
    pub name: Option<String>,
    /// New category.
    pub category: Option<String>,
    /// New quantity.
    pub quantity: Option<f64>,
    /// New unit.
    pub unit: Option<String>,
    /// New checked state.
    pub checked: Option<bool>,
    /// New notes.
    pub notes: Option<String>,
}

/// A list together with its lines, as served over HTTP.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GroceryListWithItems {
    /// The list row.
    #[serde(flatten)]
    pub list: GroceryList,
    /// The list's lines, oldest first.
    pub items: Vec<GroceryListItem>,
}
