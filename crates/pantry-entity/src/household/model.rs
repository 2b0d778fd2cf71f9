//! Household entity model.
//!
//! A household is a group of users sharing one inventory and one active
//! grocery list. Membership is tracked in a separate rows table so the
//! notification engine can enumerate recipients cheaply.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// A household shared by one or more users.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Household {
    /// Unique household identifier.
    pub id: Uuid,
    /// Household display name.
    pub name: String,
    /// Human-friendly invite code, unique across the system.
    pub invite_code: String,
    /// The user who created the household.
    pub created_by: Uuid,
    /// When the household was created.
    pub created_at: DateTime<Utc>,
}

/// Role of a user within a household.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "member_role", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum MemberRole {
    /// Created the household; may later manage it.
    Owner,
    /// Joined via invite code.
    Member,
}

/// Membership row linking a user to a household.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct HouseholdMember {
    /// The household.
    pub household_id: Uuid,
    /// The member user.
    pub user_id: Uuid,
    /// The member's role.
    pub role: MemberRole,
    /// When the user joined.
    pub joined_at: DateTime<Utc>,
}

/// Household summary returned by the HTTP API.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HouseholdSummary {
    /// Household identifier.
    pub id: Uuid,
    /// Household display name.
    pub name: String,
    /// Invite code for adding new members.
    pub invite_code: String,
    /// Number of members.
    pub members_count: i64,
    /// When the household was created.
    pub created_at: DateTime<Utc>,
}

impl HouseholdSummary {
    /// Build a summary from a household row and its member count.
    pub fn new(household: Household, members_count: i64) -> Self {
        Self {
            id: household.id,
            name: household.name,
            invite_code: household.invite_code,
            members_count,
            created_at: household.created_at,
        }
    }
}
