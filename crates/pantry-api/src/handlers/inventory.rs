//! Inventory handlers.

use axum::Json;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use uuid::Uuid;

use pantry_entity::inventory::{InventoryFilter, InventoryItem, InventoryPatch};
use pantry_service::inventory::CreateItemInput;

use crate::dto::request::{CreateInventoryItemRequest, InventoryQuery, UpdateInventoryItemRequest};
use crate::dto::response::{ItemBody, ItemsBody, OkBody};
use crate::error::ApiError;
use crate::extractors::AuthUser;
use crate::handlers::validated;
use crate::state::AppState;

/// Default day horizon for the `expiringSoon` filter.
const DEFAULT_EXPIRING_DAYS: i64 = 7;

/// GET /api/inventory?filter=lowStock|expiringSoon&days=N
pub async fn list(
    State(state): State<AppState>,
    auth: AuthUser,
    Query(query): Query<InventoryQuery>,
) -> Result<Json<ItemsBody<InventoryItem>>, ApiError> {
    let filter = match query.filter.as_deref() {
        Some("lowStock") => InventoryFilter::LowStock,
        Some("expiringSoon") => {
            InventoryFilter::ExpiringWithin(query.days.unwrap_or(DEFAULT_EXPIRING_DAYS))
        }
        _ => InventoryFilter::All,
    };

    let items = state.inventory_service.list(auth.context(), filter).await?;
    Ok(Json(ItemsBody { items }))
}

/// POST /api/inventory
pub async fn create(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(req): Json<CreateInventoryItemRequest>,
) -> Result<(StatusCode, Json<ItemBody<InventoryItem>>), ApiError> {
    validated(&req)?;

    let item = state
        .inventory_service
        .create(
            auth.context(),
            CreateItemInput {
                name: req.name,
                category: req.category,
                quantity: req.quantity,
                unit: req.unit,
                threshold: req.threshold,
                expiry_date: req.expiry_date,
                location: req.location,
            },
        )
        .await?;

    Ok((StatusCode::CREATED, Json(ItemBody { item })))
}

/// PUT /api/inventory/{id}
pub async fn update(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
    Json(req): Json<UpdateInventoryItemRequest>,
) -> Result<Json<ItemBody<InventoryItem>>, ApiError> {
    validated(&req)?;

    let item = state
        .inventory_service
        .update(
            auth.context(),
            id,
            InventoryPatch {
                name: req.name,
                category: req.category,
                quantity: req.quantity,
                unit: req.unit,
                threshold: req.threshold,
                expiry_date: req.expiry_date,
                location: req.location,
            },
        )
        .await?;

    Ok(Json(ItemBody { item }))
}

/// DELETE /api/inventory/{id}
pub async fn delete(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
) -> Result<Json<OkBody>, ApiError> {
    state.inventory_service.delete(auth.context(), id).await?;
    Ok(Json(OkBody { ok: true }))
}
