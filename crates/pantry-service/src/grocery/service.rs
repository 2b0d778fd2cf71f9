//! Shared grocery list management.

use std::sync::Arc;

use tracing::info;
use uuid::Uuid;

use pantry_core::error::AppError;
use pantry_core::result::AppResult;
use pantry_database::repositories::grocery_list::GroceryListRepository;
use pantry_database::repositories::inventory::InventoryRepository;
use pantry_entity::grocery::{
    GroceryList, GroceryListWithItems, ItemSource, ListItemPatch, NewListItem,
};
use pantry_entity::inventory::InventoryFilter;

use crate::context::RequestContext;

/// Input for manually adding a line to the list.
#[derive(Debug, Clone, Default)]
pub struct AddItemInput {
    /// Item name.
    pub name: String,
    /// Category label.
    pub category: Option<String>,
    /// Quantity to buy.
    pub quantity: Option<f64>,
    /// Unit of measure.
    pub unit: Option<String>,
    /// Free-form notes.
    pub notes: Option<String>,
}

/// Manages the household's active grocery list.
pub struct GroceryService {
    /// Grocery list repository.
    lists: Arc<GroceryListRepository>,
    /// Inventory repository (for the low-stock sync).
    inventory: Arc<InventoryRepository>,
}

impl GroceryService {
    /// Creates a new grocery service.
    pub fn new(lists: Arc<GroceryListRepository>, inventory: Arc<InventoryRepository>) -> Self {
        Self { lists, inventory }
    }

    /// Returns the household's active list, creating it if missing.
    pub async fn current(&self, ctx: &RequestContext) -> AppResult<GroceryListWithItems> {
        let household_id = ctx.require_household()?;
        let list = self.lists.ensure_active(household_id).await?;
        self.with_items(list).await
    }

    /// Adds a line to the active list.
    pub async fn add_item(
        &self,
        ctx: &RequestContext,
        input: AddItemInput,
    ) -> AppResult<GroceryListWithItems> {
        let household_id = ctx.require_household()?;

        let name = input.name.trim().to_string();
        if name.len() < 2 {
            return Err(AppError::validation(
                "Item name must be at least 2 characters",
            ));
        }
        let quantity = input.quantity.unwrap_or(1.0);
        if !quantity.is_finite() || quantity < 0.0 {
            return Err(AppError::validation(
                "Quantity must be a non-negative number",
            ));
        }

        let list = self.lists.ensure_active(household_id).await?;
        self.lists
            .add_item(
                list.id,
                &NewListItem {
                    name,
                    category: input.category.unwrap_or_else(|| "Other".to_string()),
                    quantity,
                    unit: input.unit.unwrap_or_else(|| "pcs".to_string()),
                    source: ItemSource::Manual,
                    notes: input.notes.unwrap_or_default(),
                    added_by: Some(ctx.user_id),
                },
            )
            .await?;

        self.with_items(list).await
    }

    /// Applies a partial update to a line on the active list.
    pub async fn update_item(
        &self,
        ctx: &RequestContext,
        item_id: Uuid,
        patch: ListItemPatch,
    ) -> AppResult<GroceryListWithItems> {
        let household_id = ctx.require_household()?;

        if let Some(quantity) = patch.quantity {
            if !quantity.is_finite() || quantity < 0.0 {
                return Err(AppError::validation(
                    "Quantity must be a non-negative number",
                ));
            }
        }

        let list = self.lists.ensure_active(household_id).await?;
        self.lists
            .update_item(list.id, item_id, &patch)
            .await?
            .ok_or_else(|| AppError::not_found("Item not found"))?;

        self.with_items(list).await
    }

    /// Removes a line from the active list.
    pub async fn delete_item(
        &self,
        ctx: &RequestContext,
        item_id: Uuid,
    ) -> AppResult<GroceryListWithItems> {
        let household_id = ctx.require_household()?;

        let list = self.lists.ensure_active(household_id).await?;
        let deleted = self.lists.delete_item(list.id, item_id).await?;
        if !deleted {
            return Err(AppError::not_found("Item not found"));
        }

        self.with_items(list).await
    }

    /// Pulls every low-stock inventory item onto the active list.
    ///
    /// Lines are merged by (name, unit): an existing line's quantity is
    /// raised to the shortfall, a missing one is added with source
    /// `lowStock`. Returns the refreshed list and how many inventory
    /// items were considered.
    pub async fn sync_low_stock(
        &self,
        ctx: &RequestContext,
    ) -> AppResult<(GroceryListWithItems, usize)> {
        let household_id = ctx.require_household()?;

        let low = self
            .inventory
            .list(household_id, InventoryFilter::LowStock)
            .await?;
        let list = self.lists.ensure_active(household_id).await?;

        for item in &low {
            let needed = (item.threshold - item.quantity).max(1.0);
            match self
                .lists
                .find_matching_item(list.id, &item.name, &item.unit)
                .await?
            {
                Some(line) => {
                    self.lists
                        .merge_low_stock_line(list.id, line.id, needed, &item.category)
                        .await?;
                }
                None => {
                    self.lists
                        .add_item(
                            list.id,
                            &NewListItem {
                                name: item.name.clone(),
                                category: item.category.clone(),
                                quantity: needed,
                                unit: item.unit.clone(),
                                source: ItemSource::LowStock,
                                notes: String::new(),
                                added_by: None,
                            },
                        )
                        .await?;
                }
            }
        }

        self.lists.touch_generated(list.id).await?;
        info!(%household_id, synced = low.len(), "Low-stock items synced to list");

        Ok((self.with_items(list).await?, low.len()))
    }

    /// Completes the active list and starts the next one.
    pub async fn complete(
        &self,
        ctx: &RequestContext,
    ) -> AppResult<(Option<GroceryList>, GroceryListWithItems)> {
        let household_id = ctx.require_household()?;

        let completed = self.lists.complete_active(household_id).await?;
        let next = self.lists.ensure_active(household_id).await?;

        Ok((completed, self.with_items(next).await?))
    }

    /// Attach a list's lines.
    async fn with_items(&self, list: GroceryList) -> AppResult<GroceryListWithItems> {
        let items = self.lists.items_of(list.id).await?;
        Ok(GroceryListWithItems { list, items })
    }
}
