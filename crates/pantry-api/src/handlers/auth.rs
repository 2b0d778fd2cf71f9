//! Authentication handlers.

use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;

use crate::dto::request::{LoginRequest, RefreshRequest, RegisterRequest};
use crate::dto::response::{AuthResponse, UserBody};
use crate::error::ApiError;
use crate::extractors::AuthUser;
use crate::handlers::validated;
use crate::state::AppState;

/// POST /api/auth/register
pub async fn register(
    State(state): State<AppState>,
    Json(req): Json<RegisterRequest>,
) -> Result<(StatusCode, Json<AuthResponse>), ApiError> {
    validated(&req)?;

    let (user, tokens) = state
        .auth_service
        .register(req.name.as_deref().unwrap_or(""), &req.email, &req.password)
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(AuthResponse {
            user: user.into(),
            token: tokens.access_token,
            refresh_token: tokens.refresh_token,
        }),
    ))
}

/// POST /api/auth/login
pub async fn login(
    State(state): State<AppState>,
    Json(req): Json<LoginRequest>,
) -> Result<Json<AuthResponse>, ApiError> {
    validated(&req)?;

    let (user, tokens) = state.auth_service.login(&req.email, &req.password).await?;

    Ok(Json(AuthResponse {
        user: user.into(),
        token: tokens.access_token,
        refresh_token: tokens.refresh_token,
    }))
}

/// POST /api/auth/refresh
pub async fn refresh(
    State(state): State<AppState>,
    Json(req): Json<RefreshRequest>,
) -> Result<Json<AuthResponse>, ApiError> {
    let (user, tokens) = state.auth_service.refresh(&req.refresh_token).await?;

    Ok(Json(AuthResponse {
        user: user.into(),
        token: tokens.access_token,
        refresh_token: tokens.refresh_token,
    }))
}

/// GET /api/auth/me
pub async fn me(
    State(state): State<AppState>,
    auth: AuthUser,
) -> Result<Json<UserBody>, ApiError> {
    let user = state.auth_service.me(auth.context()).await?;
    Ok(Json(UserBody { user: user.into() }))
}
