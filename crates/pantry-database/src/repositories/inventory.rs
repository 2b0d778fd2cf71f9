//! Inventory item repository implementation.

use sqlx::PgPool;
use uuid::Uuid;

use pantry_core::error::{AppError, ErrorKind};
use pantry_core::result::AppResult;
use pantry_entity::inventory::{InventoryFilter, InventoryItem, InventoryPatch, NewInventoryItem};

/// Upper bound on rows returned by a single inventory listing.
const LIST_LIMIT: i64 = 500;

/// Repository for inventory CRUD and query operations, always scoped to a
/// household.
#[derive(Debug, Clone)]
pub struct InventoryRepository {
    pool: PgPool,
}

impl InventoryRepository {
    /// Create a new inventory repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// List items for a household with an optional condition filter,
    /// most recently updated first, bounded.
    pub async fn list(
        &self,
        household_id: Uuid,
        filter: InventoryFilter,
    ) -> AppResult<Vec<InventoryItem>> {
        let query = match filter {
            InventoryFilter::All => sqlx::query_as::<_, InventoryItem>(
                "SELECT * FROM inventory_items WHERE household_id = $1 \
                 ORDER BY updated_at DESC LIMIT $2",
            )
            .bind(household_id)
            .bind(LIST_LIMIT),
            InventoryFilter::LowStock => sqlx::query_as::<_, InventoryItem>(
                "SELECT * FROM inventory_items WHERE household_id = $1 \
                 AND threshold > 0 AND quantity <= threshold \
                 ORDER BY updated_at DESC LIMIT $2",
            )
            .bind(household_id)
            .bind(LIST_LIMIT),
            InventoryFilter::ExpiringWithin(days) => sqlx::query_as::<_, InventoryItem>(
                "SELECT * FROM inventory_items WHERE household_id = $1 \
                 AND expiry_date IS NOT NULL \
                 AND expiry_date >= CURRENT_DATE \
                 AND expiry_date <= CURRENT_DATE + $3::int \
                 ORDER BY expiry_date ASC LIMIT $2",
            )
            .bind(household_id)
            .bind(LIST_LIMIT)
            .bind(days as i32),
        };

        query.fetch_all(&self.pool).await.map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to list inventory", e)
        })
    }

    /// Fetch every item for a household (the notification engine's view).
    pub async fn items_for_household(&self, household_id: Uuid) -> AppResult<Vec<InventoryItem>> {
        sqlx::query_as::<_, InventoryItem>("SELECT * FROM inventory_items WHERE household_id = $1")
            .bind(household_id)
            .fetch_all(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to fetch household inventory", e)
            })
    }

    /// Insert a new inventory item.
    pub async fn create(&self, item: &NewInventoryItem) -> AppResult<InventoryItem> {
        sqlx::query_as::<_, InventoryItem>(
            "INSERT INTO inventory_items \
             (household_id, name, category, quantity, unit, threshold, expiry_date, location, last_updated_by) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9) RETURNING *",
        )
        .bind(item.household_id)
        .bind(&item.name)
        .bind(&item.category)
        .bind(item.quantity)
        .bind(&item.unit)
        .bind(item.threshold)
        .bind(item.expiry_date)
        .bind(&item.location)
        .bind(item.last_updated_by)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to create inventory item", e))
    }

    /// Apply a partial update to an item, scoped to its household.
    /// Returns `None` when no matching row exists.
    pub async fn update(
        &self,
        id: Uuid,
        household_id: Uuid,
        patch: &InventoryPatch,
        updated_by: Uuid,
    ) -> AppResult<Option<InventoryItem>> {
        sqlx::query_as::<_, InventoryItem>(
            "UPDATE inventory_items SET \
                name = COALESCE($3, name), \
                category = COALESCE($4, category), \
                quantity = COALESCE($5, quantity), \
                unit = COALESCE($6, unit), \
                threshold = COALESCE($7, threshold), \
                expiry_date = CASE WHEN $8 THEN $9 ELSE expiry_date END, \
                location = COALESCE($10, location), \
                last_updated_by = $11, \
                updated_at = NOW() \
             WHERE id = $1 AND household_id = $2 RETURNING *",
        )
        .bind(id)
        .bind(household_id)
        .bind(&patch.name)
        .bind(&patch.category)
        .bind(patch.quantity)
        .bind(&patch.unit)
        .bind(patch.threshold)
        .bind(patch.expiry_date.is_some())
        .bind(patch.expiry_date.flatten())
        .bind(&patch.location)
        .bind(updated_by)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to update inventory item", e))
    }

    /// Delete an item, scoped to its household. Returns `true` if a row
    /// was removed.
    pub async fn delete(&self, id: Uuid, household_id: Uuid) -> AppResult<bool> {
        let result = sqlx::query("DELETE FROM inventory_items WHERE id = $1 AND household_id = $2")
            .bind(id)
            .bind(household_id)
            .execute(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to delete inventory item", e)
            })?;
        Ok(result.rows_affected() > 0)
    }
}
