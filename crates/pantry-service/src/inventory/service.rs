//! Inventory CRUD scoped to the caller's household.

use std::sync::Arc;

use chrono::NaiveDate;
use uuid::Uuid;

use pantry_core::error::AppError;
use pantry_core::result::AppResult;
use pantry_database::repositories::inventory::InventoryRepository;
use pantry_entity::inventory::{InventoryFilter, InventoryItem, InventoryPatch, NewInventoryItem};

use crate::context::RequestContext;

/// Input for creating an inventory item; unset fields take the same
/// defaults the UI assumes.
#[derive(Debug, Clone, Default)]
pub struct CreateItemInput {
    /// Item name.
    pub name: String,
    /// Category label.
    pub category: Option<String>,
    /// Quantity on hand.
    pub quantity: Option<f64>,
    /// Unit of measure.
    pub unit: Option<String>,
    /// Low-stock threshold.
    pub threshold: Option<f64>,
    /// Expiry date.
    pub expiry_date: Option<NaiveDate>,
    /// Storage location.
    pub location: Option<String>,
}

/// Manages a household's pantry inventory.
pub struct InventoryService {
    /// Inventory repository.
    inventory: Arc<InventoryRepository>,
}

impl InventoryService {
    /// Creates a new inventory service.
    pub fn new(inventory: Arc<InventoryRepository>) -> Self {
        Self { inventory }
    }

    /// Lists the household's items with an optional condition filter.
    pub async fn list(
        &self,
        ctx: &RequestContext,
        filter: InventoryFilter,
    ) -> AppResult<Vec<InventoryItem>> {
        let household_id = ctx.require_household()?;
        self.inventory.list(household_id, filter).await
    }

    /// Creates an item in the caller's household.
    pub async fn create(
        &self,
        ctx: &RequestContext,
        input: CreateItemInput,
    ) -> AppResult<InventoryItem> {
        let household_id = ctx.require_household()?;

        let quantity = input.quantity.unwrap_or(1.0);
        let threshold = input.threshold.unwrap_or(0.0);
        validate_amount("quantity", quantity)?;
        validate_amount("threshold", threshold)?;

        self.inventory
            .create(&NewInventoryItem {
                household_id,
                name: input.name.trim().to_string(),
                category: input.category.unwrap_or_else(|| "Other".to_string()),
                quantity,
                unit: input.unit.unwrap_or_else(|| "pcs".to_string()),
                threshold,
                expiry_date: input.expiry_date,
                location: input.location.unwrap_or_default(),
                last_updated_by: Some(ctx.user_id),
            })
            .await
    }

    /// Applies a partial update to an item in the caller's household.
    pub async fn update(
        &self,
        ctx: &RequestContext,
        id: Uuid,
        patch: InventoryPatch,
    ) -> AppResult<InventoryItem> {
        let household_id = ctx.require_household()?;

        if let Some(quantity) = patch.quantity {
            validate_amount("quantity", quantity)?;
        }
        if let Some(threshold) = patch.threshold {
            validate_amount("threshold", threshold)?;
        }

        self.inventory
            .update(id, household_id, &patch, ctx.user_id)
            .await?
            .ok_or_else(|| AppError::not_found("Inventory item not found"))
    }

    /// Deletes an item from the caller's household.
    pub async fn delete(&self, ctx: &RequestContext, id: Uuid) -> AppResult<()> {
        let household_id = ctx.require_household()?;

        let deleted = self.inventory.delete(id, household_id).await?;
        if !deleted {
            return Err(AppError::not_found("Inventory item not found"));
        }
        Ok(())
    }
}

/// Reject negative or non-finite quantities/thresholds.
fn validate_amount(field: &str, value: f64) -> AppResult<()> {
    if !value.is_finite() || value < 0.0 {
        return Err(AppError::validation(format!(
            "{field} must be a non-negative number"
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_amount() {
        assert!(validate_amount("quantity", 0.0).is_ok());
        assert!(validate_amount("quantity", 2.5).is_ok());
        assert!(validate_amount("quantity", -1.0).is_err());
        assert!(validate_amount("threshold", f64::NAN).is_err());
    }
}
