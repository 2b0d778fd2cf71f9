//! Notification handlers.

use axum::Json;
use axum::extract::{Path, State};
use uuid::Uuid;

use pantry_entity::notification::model::Notification;

use crate::dto::request::{GenerateRequest, UpdatePrefsRequest};
use crate::dto::response::{GenerateBody, ItemBody, ItemsBody, PrefsBody};
use crate::error::ApiError;
use crate::extractors::AuthUser;
use crate::state::AppState;

/// GET /api/notifications
pub async fn list(
    State(state): State<AppState>,
    auth: AuthUser,
) -> Result<Json<ItemsBody<Notification>>, ApiError> {
    let items = state
        .notification_service
        .list_active(auth.context())
        .await?;
    Ok(Json(ItemsBody { items }))
}

/// GET /api/notifications/prefs
pub async fn get_prefs(
    State(state): State<AppState>,
    auth: AuthUser,
) -> Result<Json<PrefsBody>, ApiError> {
    let windows = state
        .notification_service
        .get_preferences(auth.context())
        .await?;
    Ok(Json(PrefsBody {
        expiry_windows: windows.into_vec(),
    }))
}

/// PUT /api/notifications/prefs
pub async fn update_prefs(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(req): Json<UpdatePrefsRequest>,
) -> Result<Json<PrefsBody>, ApiError> {
    let windows = state
        .notification_service
        .update_preferences(auth.context(), &req.expiry_windows)
        .await?;
    Ok(Json(PrefsBody {
        expiry_windows: windows.into_vec(),
    }))
}

/// POST /api/notifications/generate-expiry
pub async fn generate(
    State(state): State<AppState>,
    auth: AuthUser,
    body: Option<Json<GenerateRequest>>,
) -> Result<Json<GenerateBody>, ApiError> {
    let req = body.map(|Json(req)| req).unwrap_or_default();

    let (created, windows) = state
        .notification_service
        .generate(auth.context(), req.expiry_windows.as_deref())
        .await?;

    Ok(Json(GenerateBody {
        created,
        windows: windows.into_vec(),
    }))
}

/// PATCH /api/notifications/{id}/read
pub async fn mark_read(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
) -> Result<Json<ItemBody<Notification>>, ApiError> {
    let item = state
        .notification_service
        .mark_read(auth.context(), id)
        .await?;
    Ok(Json(ItemBody { item }))
}

/// PATCH /api/notifications/{id}/dismiss
pub async fn dismiss(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
) -> Result<Json<ItemBody<Notification>>, ApiError> {
    let item = state
        .notification_service
        .dismiss(auth.context(), id)
        .await?;
    Ok(Json(ItemBody { item }))
}
