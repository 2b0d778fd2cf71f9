//! Grocery list handlers.

use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use uuid::Uuid;

use pantry_entity::grocery::ListItemPatch;
use pantry_service::grocery::AddItemInput;

use crate::dto::request::{AddListItemRequest, UpdateListItemRequest};
use crate::dto::response::{CompleteListBody, ListBody, SyncListBody};
use crate::error::ApiError;
use crate::extractors::AuthUser;
use crate::handlers::validated;
use crate::state::AppState;

/// GET /api/lists/current
pub async fn current(
    State(state): State<AppState>,
    auth: AuthUser,
) -> Result<Json<ListBody>, ApiError> {
    let list = state.grocery_service.current(auth.context()).await?;
    Ok(Json(ListBody { list }))
}

/// POST /api/lists/current/items
pub async fn add_item(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(req): Json<AddListItemRequest>,
) -> Result<(StatusCode, Json<ListBody>), ApiError> {
    validated(&req)?;

    let list = state
        .grocery_service
        .add_item(
            auth.context(),
            AddItemInput {
                name: req.name,
                category: req.category,
                quantity: req.quantity,
                unit: req.unit,
                notes: req.notes,
            },
        )
        .await?;

    Ok((StatusCode::CREATED, Json(ListBody { list })))
}

/// PATCH /api/lists/current/items/{id}
pub async fn update_item(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(item_id): Path<Uuid>,
    Json(req): Json<UpdateListItemRequest>,
) -> Result<Json<ListBody>, ApiError> {
    let list = state
        .grocery_service
        .update_item(
            auth.context(),
            item_id,
            ListItemPatch {
                name: req.name,
                category: req.category,
                quantity: req.quantity,
                unit: req.unit,
                checked: req.checked,
                notes: req.notes,
            },
        )
        .await?;

    Ok(Json(ListBody { list }))
}

/// DELETE /api/lists/current/items/{id}
pub async fn delete_item(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(item_id): Path<Uuid>,
) -> Result<Json<ListBody>, ApiError> {
    let list = state
        .grocery_service
        .delete_item(auth.context(), item_id)
        .await?;
    Ok(Json(ListBody { list }))
}

/// POST /api/lists/current/sync-low-stock
pub async fn sync_low_stock(
    State(state): State<AppState>,
    auth: AuthUser,
) -> Result<Json<SyncListBody>, ApiError> {
    let (list, added) = state.grocery_service.sync_low_stock(auth.context()).await?;
    Ok(Json(SyncListBody {
        list,
        added_from_low_stock: added,
    }))
}

/// POST /api/lists/current/complete
pub async fn complete(
    State(state): State<AppState>,
    auth: AuthUser,
) -> Result<Json<CompleteListBody>, ApiError> {
    let (completed, list) = state.grocery_service.complete(auth.context()).await?;
    Ok(Json(CompleteListBody { completed, list }))
}
