//! Health check handler.

use axum::Json;
use axum::extract::State;
use chrono::Utc;

use crate::dto::response::HealthBody;
use crate::state::AppState;

/// GET /health (no auth required)
pub async fn health_check(State(state): State<AppState>) -> Json<HealthBody> {
    let db_ok = state.db.health_check().await.unwrap_or(false);
    Json(HealthBody {
        ok: db_ok,
        service: "api".to_string(),
        time: Utc::now(),
    })
}
