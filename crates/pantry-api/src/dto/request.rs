//! Request DTOs with validation.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use validator::Validate;

/// Registration request body.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct RegisterRequest {
    /// Display name (optional).
    #[serde(default)]
    #[validate(length(max = 50))]
    pub name: Option<String>,
    /// Email address.
    #[validate(email(message = "A valid email is required"))]
    pub email: String,
    /// Password.
    #[validate(length(min = 8, max = 72, message = "Password must be 8-72 characters"))]
    pub password: String,
}

/// Login request body.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct LoginRequest {
    /// Email address.
    #[validate(email(message = "A valid email is required"))]
    pub email: String,
    /// Password.
    #[validate(length(min = 1, message = "Password is required"))]
    pub password: String,
}

/// Token refresh request body.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RefreshRequest {
    /// Refresh token.
    pub refresh_token: String,
}

/// Create household request.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CreateHouseholdRequest {
    /// Household name.
    #[validate(length(min = 2, max = 60, message = "Name must be 2-60 characters"))]
    pub name: String,
}

/// Join household request.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct JoinHouseholdRequest {
    /// Invite code.
    #[validate(length(min = 6, max = 16, message = "Invite code must be 6-16 characters"))]
    pub invite_code: String,
}

/// Create inventory item request.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateInventoryItemRequest {
    /// Item name.
    #[validate(length(min = 1, max = 80, message = "Name must be 1-80 characters"))]
    pub name: String,
    /// Category label.
    #[serde(default)]
    #[validate(length(max = 40))]
    pub category: Option<String>,
    /// Quantity on hand.
    #[serde(default)]
    pub quantity: Option<f64>,
    /// Unit of measure.
    #[serde(default)]
    #[validate(length(max = 16))]
    pub unit: Option<String>,
    /// Low-stock threshold.
    #[serde(default)]
    pub threshold: Option<f64>,
    /// Expiry date (`YYYY-MM-DD`).
    #[serde(default)]
    pub expiry_date: Option<NaiveDate>,
    /// Storage location.
    #[serde(default)]
    #[validate(length(max = 40))]
    pub location: Option<String>,
}

/// Update inventory item request. All fields optional; `expiryDate`
/// distinguishes absent (leave unchanged) from `null` (clear).
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateInventoryItemRequest {
    /// New name.
    #[serde(default)]
    #[validate(length(min = 1, max = 80))]
    pub name: Option<String>,
    /// New category.
    #[serde(default)]
    #[validate(length(max = 40))]
    pub category: Option<String>,
    /// New quantity.
    #[serde(default)]
    pub quantity: Option<f64>,
    /// New unit.
    #[serde(default)]
    #[validate(length(max = 16))]
    pub unit: Option<String>,
    /// New threshold.
    #[serde(default)]
    pub threshold: Option<f64>,
    /// New expiry date, or `null` to clear.
    #[serde(default)]
    pub expiry_date: Option<Option<NaiveDate>>,
    /// New location.
    #[serde(default)]
    #[validate(length(max = 40))]
    pub location: Option<String>,
}

/// Query parameters for inventory listing.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct InventoryQuery {
    /// Condition filter: `lowStock` or `expiringSoon`.
    #[serde(default)]
    pub filter: Option<String>,
    /// Day horizon for `expiringSoon` (default 7).
    #[serde(default)]
    pub days: Option<i64>,
}

/// Add grocery list item request.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct AddListItemRequest {
    /// Item name.
    #[validate(length(min = 2, message = "Item name must be at least 2 characters"))]
    pub name: String,
    /// Category label.
    #[serde(default)]
    pub category: Option<String>,
    /// Quantity to buy.
    #[serde(default)]
    pub quantity: Option<f64>,
    /// Unit of measure.
    #[serde(default)]
    pub unit: Option<String>,
    /// Free-form notes.
    #[serde(default)]
    pub notes: Option<String>,
}

/// Update grocery list item request.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateListItemRequest {
    /// New name.
    #[serde(default)]
    pub name: Option<String>,
    /// New category.
    #[serde(default)]
    pub category: Option<String>,
    /// New quantity.
    #[serde(default)]
    pub quantity: Option<f64>,
    /// New unit.
    #[serde(default)]
    pub unit: Option<String>,
    /// New checked state.
    #[serde(default)]
    pub checked: Option<bool>,
    /// New notes.
    #[serde(default)]
    pub notes: Option<String>,
}

/// Update notification preferences request.
///
/// Entries are raw JSON values: invalid ones are dropped during
/// normalization rather than failing deserialization.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdatePrefsRequest {
    /// Proposed lead-time windows in days.
    pub expiry_windows: Vec<serde_json::Value>,
}

/// Trigger a generation run for the caller's household.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateRequest {
    /// Optional lead-time window override.
    #[serde(default)]
    pub expiry_windows: Option<Vec<serde_json::Value>>,
}
