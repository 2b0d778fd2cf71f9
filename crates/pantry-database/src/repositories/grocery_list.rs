//! Grocery list repository implementation.

use sqlx::PgPool;
use uuid::Uuid;

use pantry_core::error::{AppError, ErrorKind};
use pantry_core::result::AppResult;
use pantry_entity::grocery::{GroceryList, GroceryListItem, ListItemPatch, NewListItem};

/// Repository for grocery lists and their line items.
#[derive(Debug, Clone)]
pub struct GroceryListRepository {
    pool: PgPool,
}

impl GroceryListRepository {
    /// Create a new grocery list repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Fetch the household's active list, creating it if missing.
    ///
    /// The insert races safely against concurrent callers: the partial
    /// unique index on `(household_id) WHERE status = 'active'` makes the
    /// conditional insert a no-op for the loser.
    pub async fn ensure_active(&self, household_id: Uuid) -> AppResult<GroceryList> {
        sqlx::query(
            "INSERT INTO grocery_lists (household_id, status, title) \
             VALUES ($1, 'active', 'Grocery List') \
             ON CONFLICT (household_id) WHERE status = 'active' DO NOTHING",
        )
        .bind(household_id)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to ensure active list", e)
        })?;

        sqlx::query_as::<_, GroceryList>(
            "SELECT * FROM grocery_lists WHERE household_id = $1 AND status = 'active'",
        )
        .bind(household_id)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to fetch active list", e))
    }

    /// List the lines of a list, oldest first.
    pub async fn items_of(&self, list_id: Uuid) -> AppResult<Vec<GroceryListItem>> {
        sqlx::query_as::<_, GroceryListItem>(
            "SELECT * FROM grocery_list_items WHERE list_id = $1 ORDER BY created_at",
        )
        .bind(list_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to list items", e))
    }

    /// Add a line to a list.
    pub async fn add_item(&self, list_id: Uuid, item: &NewListItem) -> AppResult<GroceryListItem> {
        sqlx::query_as::<_, GroceryListItem>(
            "INSERT INTO grocery_list_items \
             (list_id, name, category, quantity, unit, source, notes, added_by) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8) RETURNING *",
        )
        .bind(list_id)
        .bind(&item.name)
        .bind(&item.category)
        .bind(item.quantity)
        .bind(&item.unit)
        .bind(item.source)
        .bind(&item.notes)
        .bind(item.added_by)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to add list item", e))
    }

    /// Apply a partial update to a line, scoped to its list. Returns
    /// `None` when no matching row exists.
    pub async fn update_item(
        &self,
        list_id: Uuid,
        item_id: Uuid,
        patch: &ListItemPatch,
    ) -> AppResult<Option<GroceryListItem>> {
        sqlx::query_as::<_, GroceryListItem>(
            "UPDATE grocery_list_items SET \
                name = COALESCE($3, name), \
                category = COALESCE($4, category), \
                quantity = COALESCE($5, quantity), \
                unit = COALESCE($6, unit), \
                checked = COALESCE($7, checked), \
                notes = COALESCE($8, notes) \
             WHERE id = $2 AND list_id = $1 RETURNING *",
        )
        .bind(list_id)
        .bind(item_id)
        .bind(&patch.name)
        .bind(&patch.category)
        .bind(patch.quantity)
        .bind(&patch.unit)
        .bind(patch.checked)
        .bind(&patch.notes)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to update list item", e))
    }

    /// Delete a line, scoped to its list. Returns `true` if a row was
    /// removed.
    pub async fn delete_item(&self, list_id: Uuid, item_id: Uuid) -> AppResult<bool> {
        let result = sqlx::query("DELETE FROM grocery_list_items WHERE id = $2 AND list_id = $1")
            .bind(list_id)
            .bind(item_id)
            .execute(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to delete list item", e)
            })?;
        Ok(result.rows_affected() > 0)
    }

    /// Find a line matching an inventory item by name and unit
    /// (case-insensitive), used when syncing low-stock items.
    pub async fn find_matching_item(
        &self,
        list_id: Uuid,
        name: &str,
        unit: &str,
    ) -> AppResult<Option<GroceryListItem>> {
        sqlx::query_as::<_, GroceryListItem>(
            "SELECT * FROM grocery_list_items WHERE list_id = $1 \
             AND LOWER(TRIM(name)) = LOWER(TRIM($2)) AND LOWER(TRIM(unit)) = LOWER(TRIM($3))",
        )
        .bind(list_id)
        .bind(name)
        .bind(unit)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to find matching item", e))
    }

    /// Raise a line's quantity to at least `needed` and refresh its
    /// category, as part of a low-stock sync.
    pub async fn merge_low_stock_line(
        &self,
        list_id: Uuid,
        item_id: Uuid,
        needed: f64,
        category: &str,
    ) -> AppResult<()> {
        sqlx::query(
            "UPDATE grocery_list_items SET quantity = GREATEST(quantity, $3), category = $4 \
             WHERE id = $2 AND list_id = $1",
        )
        .bind(list_id)
        .bind(item_id)
        .bind(needed)
        .bind(category)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to merge low-stock line", e)
        })?;
        Ok(())
    }

    /// Record that low-stock items were synced into the list.
    pub async fn touch_generated(&self, list_id: Uuid) -> AppResult<()> {
        sqlx::query("UPDATE grocery_lists SET generated_at = NOW() WHERE id = $1")
            .bind(list_id)
            .execute(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to touch list", e))?;
        Ok(())
    }

    /// Complete the household's active list, if one exists. Returns the
    /// completed list. The caller starts the next active list via
    /// [`ensure_active`].
    ///
    /// [`ensure_active`]: GroceryListRepository::ensure_active
    pub async fn complete_active(&self, household_id: Uuid) -> AppResult<Option<GroceryList>> {
        sqlx::query_as::<_, GroceryList>(
            "UPDATE grocery_lists SET status = 'completed', completed_at = NOW() \
             WHERE household_id = $1 AND status = 'active' RETURNING *",
        )
        .bind(household_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to complete list", e))
    }
}
