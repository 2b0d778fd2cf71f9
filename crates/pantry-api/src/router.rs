//! Route definitions for the Smart Pantry HTTP API.
//!
//! All routes are organized by domain and mounted under `/api` (except
//! the health check). The router receives `AppState` and passes it to
//! all handlers via Axum's `State` extractor.

use axum::{
    Router,
    extract::DefaultBodyLimit,
    routing::{delete, get, patch, post, put},
};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::handlers;
use crate::state::AppState;

/// Build the complete Axum router with all routes and middleware.
pub fn build_router(state: AppState) -> Router {
    let max_body = state.config.server.max_body_bytes;

    let api_routes = Router::new()
        .merge(auth_routes())
        .merge(household_routes())
        .merge(inventory_routes())
        .merge(list_routes())
        .merge(notification_routes());

    let cors = build_cors_layer(&state);

    Router::new()
        .nest("/api", api_routes)
        .route("/health", get(handlers::health::health_check))
        .layer(DefaultBodyLimit::max(max_body))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}

/// Auth endpoints: register, login, refresh, me
fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/auth/register", post(handlers::auth::register))
        .route("/auth/login", post(handlers::auth::login))
        .route("/auth/refresh", post(handlers::auth::refresh))
        .route("/auth/me", get(handlers::auth::me))
}

/// Household creation, joining, and lookup
fn household_routes() -> Router<AppState> {
    Router::new()
        .route("/households", post(handlers::household::create))
        .route("/households/join", post(handlers::household::join))
        .route("/households/current", get(handlers::household::current))
}

/// Inventory CRUD with condition filters
fn inventory_routes() -> Router<AppState> {
    Router::new()
        .route("/inventory", get(handlers::inventory::list))
        .route("/inventory", post(handlers::inventory::create))
        .route("/inventory/{id}", put(handlers::inventory::update))
        .route("/inventory/{id}", delete(handlers::inventory::delete))
}

/// Grocery list endpoints
fn list_routes() -> Router<AppState> {
    Router::new()
        .route("/lists/current", get(handlers::grocery::current))
        .route("/lists/current/items", post(handlers::grocery::add_item))
        .route(
            "/lists/current/items/{id}",
            patch(handlers::grocery::update_item),
        )
        .route(
            "/lists/current/items/{id}",
            delete(handlers::grocery::delete_item),
        )
        .route(
            "/lists/current/sync-low-stock",
            post(handlers::grocery::sync_low_stock),
        )
        .route("/lists/current/complete", post(handlers::grocery::complete))
}

/// Notification endpoints
fn notification_routes() -> Router<AppState> {
    Router::new()
        .route("/notifications", get(handlers::notification::list))
        .route("/notifications/prefs", get(handlers::notification::get_prefs))
        .route(
            "/notifications/prefs",
            put(handlers::notification::update_prefs),
        )
        .route(
            "/notifications/generate-expiry",
            post(handlers::notification::generate),
        )
        .route(
            "/notifications/{id}/read",
            patch(handlers::notification::mark_read),
        )
        .route(
            "/notifications/{id}/dismiss",
            patch(handlers::notification::dismiss),
        )
}

/// Build CORS layer from configuration
fn build_cors_layer(state: &AppState) -> CorsLayer {
    use axum::http::Method;
    use tower_http::cors::Any;

    let cors_config = &state.config.server.cors;

    let mut cors = CorsLayer::new()
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::PATCH,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers(Any);

    if cors_config.allowed_origins.contains(&"*".to_string()) {
        cors = cors.allow_origin(Any);
    } else {
        let origins: Vec<axum::http::HeaderValue> = cors_config
            .allowed_origins
            .iter()
            .filter_map(|o| o.parse().ok())
            .collect();
        cors = cors.allow_origin(origins);
    }

    cors.max_age(std::time::Duration::from_secs(cors_config.max_age_seconds))
}
