//! Household repository implementation.

use sqlx::PgPool;
use uuid::Uuid;

use pantry_core::error::{AppError, ErrorKind};
use pantry_core::result::AppResult;
use pantry_entity::household::{Household, MemberRole};

use super::is_unique_violation;

/// Repository for household and membership operations.
#[derive(Debug, Clone)]
pub struct HouseholdRepository {
    pool: PgPool,
}

impl HouseholdRepository {
    /// Create a new household repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Insert a household together with its owner membership row.
    ///
    /// A duplicate invite code surfaces as a conflict so the caller can
    /// retry with a fresh code.
    pub async fn create(
        &self,
        name: &str,
        invite_code: &str,
        created_by: Uuid,
    ) -> AppResult<Household> {
        let mut tx = self.pool.begin().await.map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to begin transaction", e)
        })?;

        let household = sqlx::query_as::<_, Household>(
            "INSERT INTO households (name, invite_code, created_by) \
             VALUES ($1, $2, $3) RETURNING *",
        )
        .bind(name)
        .bind(invite_code)
        .bind(created_by)
        .fetch_one(&mut *tx)
        .await
        .map_err(|e| {
            if is_unique_violation(&e) {
                AppError::conflict("Invite code already in use")
            } else {
                AppError::with_source(ErrorKind::Database, "Failed to create household", e)
            }
        })?;

        sqlx::query(
            "INSERT INTO household_members (household_id, user_id, role) VALUES ($1, $2, $3)",
        )
        .bind(household.id)
        .bind(created_by)
        .bind(MemberRole::Owner)
        .execute(&mut *tx)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to add owner member", e))?;

        tx.commit().await.map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to commit transaction", e)
        })?;

        Ok(household)
    }

    /// Find a household by primary key.
    pub async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Household>> {
        sqlx::query_as::<_, Household>("SELECT * FROM households WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to find household", e))
    }

    /// Find a household by invite code (case-insensitive).
    pub async fn find_by_invite_code(&self, code: &str) -> AppResult<Option<Household>> {
        sqlx::query_as::<_, Household>(
            "SELECT * FROM households WHERE UPPER(invite_code) = UPPER($1)",
        )
        .bind(code)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to find household by code", e)
        })
    }

    /// Add a member to a household. Adding an existing member is a no-op.
    pub async fn add_member(
        &self,
        household_id: Uuid,
        user_id: Uuid,
        role: MemberRole,
    ) -> AppResult<()> {
        sqlx::query(
            "INSERT INTO household_members (household_id, user_id, role) VALUES ($1, $2, $3) \
             ON CONFLICT (household_id, user_id) DO NOTHING",
        )
        .bind(household_id)
        .bind(user_id)
        .bind(role)
        .execute(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to add member", e))?;
        Ok(())
    }

    /// List the user ids of all members of a household.
    pub async fn members_of(&self, household_id: Uuid) -> AppResult<Vec<Uuid>> {
        sqlx::query_scalar::<_, Uuid>(
            "SELECT user_id FROM household_members WHERE household_id = $1 ORDER BY joined_at",
        )
        .bind(household_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to list members", e))
    }

    /// Count the members of a household.
    pub async fn member_count(&self, household_id: Uuid) -> AppResult<i64> {
        sqlx::query_scalar::<_, i64>(
            "SELECT COUNT(*) FROM household_members WHERE household_id = $1",
        )
        .bind(household_id)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to count members", e))
    }

    /// List the ids of every household in the system.
    pub async fn all_household_ids(&self) -> AppResult<Vec<Uuid>> {
        sqlx::query_scalar::<_, Uuid>("SELECT id FROM households ORDER BY created_at")
            .fetch_all(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to list households", e))
    }
}
