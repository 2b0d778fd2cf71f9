//! Response DTOs.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use pantry_entity::grocery::{GroceryList, GroceryListWithItems};
use pantry_entity::household::HouseholdSummary;
use pantry_entity::user::User;

/// User summary for responses.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserResponse {
    /// User ID.
    pub id: Uuid,
    /// Display name.
    pub name: String,
    /// Email address.
    pub email: String,
    /// Household the user belongs to, if any.
    pub household_id: Option<Uuid>,
    /// When the user registered.
    pub created_at: DateTime<Utc>,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            name: user.name,
            email: user.email,
            household_id: user.household_id,
            created_at: user.created_at,
        }
    }
}

/// Login/register/refresh response.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthResponse {
    /// The authenticated user.
    pub user: UserResponse,
    /// Access token.
    pub token: String,
    /// Refresh token.
    pub refresh_token: String,
}

/// `{ user }` envelope.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserBody {
    /// The user.
    pub user: UserResponse,
}

/// `{ household }` envelope.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HouseholdBody {
    /// The household summary (absent when the user has none).
    pub household: Option<HouseholdSummary>,
}

/// `{ items }` envelope for list endpoints.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ItemsBody<T: Serialize> {
    /// The items.
    pub items: Vec<T>,
}

/// `{ item }` envelope for single-resource endpoints.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ItemBody<T: Serialize> {
    /// The item.
    pub item: T,
}

/// `{ ok }` envelope for deletions.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OkBody {
    /// Always true on success.
    pub ok: bool,
}

/// `{ list }` envelope for grocery list endpoints.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ListBody {
    /// The active list with its lines.
    pub list: GroceryListWithItems,
}

/// Response for the low-stock sync endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SyncListBody {
    /// The refreshed list.
    pub list: GroceryListWithItems,
    /// Number of low-stock inventory items considered.
    pub added_from_low_stock: usize,
}

/// Response for completing a list.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CompleteListBody {
    /// The completed list (absent when there was none).
    pub completed: Option<GroceryList>,
    /// The next active list.
    pub list: GroceryListWithItems,
}

/// Notification preference payload.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PrefsBody {
    /// Lead-time windows, largest first.
    pub expiry_windows: Vec<i32>,
}

/// Generation run result.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerateBody {
    /// Notifications newly created.
    pub created: usize,
    /// The normalized windows used for the run.
    pub windows: Vec<i32>,
}

/// Health check response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthBody {
    /// Whether the service is up.
    pub ok: bool,
    /// Service name.
    pub service: String,
    /// Current server time.
    pub time: DateTime<Utc>,
}
