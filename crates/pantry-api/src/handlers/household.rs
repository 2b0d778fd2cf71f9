//! Household handlers.

use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;

use crate::dto::request::{CreateHouseholdRequest, JoinHouseholdRequest};
use crate::dto::response::HouseholdBody;
use crate::error::ApiError;
use crate::extractors::AuthUser;
use crate::handlers::validated;
use crate::state::AppState;

/// POST /api/households
pub async fn create(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(req): Json<CreateHouseholdRequest>,
) -> Result<(StatusCode, Json<HouseholdBody>), ApiError> {
    validated(&req)?;

    let household = state
        .household_service
        .create(auth.context(), req.name.trim())
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(HouseholdBody {
            household: Some(household),
        }),
    ))
}

/// POST /api/households/join
pub async fn join(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(req): Json<JoinHouseholdRequest>,
) -> Result<Json<HouseholdBody>, ApiError> {
    validated(&req)?;

    let household = state
        .household_service
        .join(auth.context(), &req.invite_code)
        .await?;

    Ok(Json(HouseholdBody {
        household: Some(household),
    }))
}

/// GET /api/households/current
pub async fn current(
    State(state): State<AppState>,
    auth: AuthUser,
) -> Result<Json<HouseholdBody>, ApiError> {
    let household = state.household_service.current(auth.context()).await?;
    Ok(Json(HouseholdBody { household }))
}
