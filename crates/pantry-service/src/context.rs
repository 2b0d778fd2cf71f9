//! Request context carrying the authenticated user.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use pantry_core::error::AppError;
use pantry_core::result::AppResult;

/// Context for the current authenticated request.
///
/// Extracted by the API layer and passed into service methods so that
/// every operation knows *who* is acting and which household scopes it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RequestContext {
    /// The authenticated user's ID.
    pub user_id: Uuid,
    /// The user's email (convenience field from JWT claims).
    pub email: String,
    /// The household the user belongs to, if any.
    pub household_id: Option<Uuid>,
    /// When the request was received.
    pub request_time: DateTime<Utc>,
}

impl RequestContext {
    /// Creates a new request context.
    pub fn new(user_id: Uuid, email: String, household_id: Option<Uuid>) -> Self {
        Self {
            user_id,
            email,
            household_id,
            request_time: Utc::now(),
        }
    }

    /// Returns the caller's household id, or a validation error for
    /// endpoints that require household scope.
    pub fn require_household(&self) -> AppResult<Uuid> {
        self.household_id
            .ok_or_else(|| AppError::validation("User is not in a household"))
    }
}
