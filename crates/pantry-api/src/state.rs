//! Application state shared across all handlers and extractors.

use std::sync::Arc;

use pantry_auth::jwt::decoder::JwtDecoder;
use pantry_core::config::AppConfig;
use pantry_database::DatabasePool;
use pantry_database::repositories::user::UserRepository;
use pantry_service::auth::AuthService;
use pantry_service::grocery::GroceryService;
use pantry_service::household::HouseholdService;
use pantry_service::inventory::InventoryService;
use pantry_service::notification::NotificationService;

/// Application state containing all shared dependencies.
///
/// Passed to every Axum handler via `State<AppState>`.
/// All fields are `Arc`-wrapped for cheap cloning across tasks.
#[derive(Clone)]
pub struct AppState {
    /// Application configuration.
    pub config: Arc<AppConfig>,
    /// PostgreSQL connection pool (health checks).
    pub db: DatabasePool,

    /// JWT token decoder and validator.
    pub jwt_decoder: Arc<JwtDecoder>,
    /// User repository (auth extractor lookups).
    pub user_repo: Arc<UserRepository>,

    /// Registration, login, refresh.
    pub auth_service: Arc<AuthService>,
    /// Household membership management.
    pub household_service: Arc<HouseholdService>,
    /// Inventory CRUD.
    pub inventory_service: Arc<InventoryService>,
    /// Grocery list management.
    pub grocery_service: Arc<GroceryService>,
    /// Notification lifecycle and generation.
    pub notification_service: Arc<NotificationService>,
}
