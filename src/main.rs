//! Smart Pantry API server.
//!
//! Main entry point that wires all crates together and starts the server.

use std::sync::Arc;

use tracing_subscriber::{EnvFilter, fmt};

use pantry_core::config::AppConfig;
use pantry_core::error::AppError;

use pantry_auth::jwt::decoder::JwtDecoder;
use pantry_auth::jwt::encoder::JwtEncoder;
use pantry_auth::password::hasher::PasswordHasher;
use pantry_database::DatabasePool;
use pantry_database::repositories::grocery_list::GroceryListRepository;
use pantry_database::repositories::household::HouseholdRepository;
use pantry_database::repositories::inventory::InventoryRepository;
use pantry_database::repositories::notification::NotificationRepository;
use pantry_database::repositories::preference::PreferenceRepository;
use pantry_database::repositories::user::UserRepository;
use pantry_service::auth::AuthService;
use pantry_service::grocery::GroceryService;
use pantry_service::household::HouseholdService;
use pantry_service::inventory::InventoryService;
use pantry_service::notification::NotificationService;
use pantry_service::notification::engine::GenerationEngine;
use pantry_service::notification::stores::{
    HouseholdDirectory, InventorySource, NotificationSink, PreferenceSource,
};
use pantry_worker::NotificationScheduler;

use pantry_entity::notification::preference::ExpiryWindows;

#[tokio::main]
async fn main() {
    let env = std::env::var("PANTRY_ENV").unwrap_or_else(|_| "development".to_string());

    let config = match AppConfig::load(&env) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Failed to load configuration: {e}");
            std::process::exit(1);
        }
    };

    init_logging(&config);

    if let Err(e) = run(config).await {
        tracing::error!("Server error: {e}");
        std::process::exit(1);
    }
}

/// Initialize tracing/logging
fn init_logging(config: &AppConfig) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.logging.level));

    match config.logging.format.as_str() {
        "json" => {
            fmt().json().with_env_filter(filter).with_target(true).init();
        }
        _ => {
            fmt().pretty().with_env_filter(filter).with_target(true).init();
        }
    }
}

/// Main server run function
async fn run(config: AppConfig) -> Result<(), AppError> {
    tracing::info!("Starting Smart Pantry v{}", env!("CARGO_PKG_VERSION"));

    // ── Step 1: Database connection + migrations ─────────────────
    let db = DatabasePool::connect(&config.database).await?;
    pantry_database::migration::run_migrations(db.pool()).await?;

    // ── Step 2: Repositories ─────────────────────────────────────
    let pool = db.pool().clone();
    let user_repo = Arc::new(UserRepository::new(pool.clone()));
    let household_repo = Arc::new(HouseholdRepository::new(pool.clone()));
    let inventory_repo = Arc::new(InventoryRepository::new(pool.clone()));
    let grocery_repo = Arc::new(GroceryListRepository::new(pool.clone()));
    let notification_repo = Arc::new(NotificationRepository::new(pool.clone()));
    let preference_repo = Arc::new(PreferenceRepository::new(pool));

    // ── Step 3: Auth primitives ──────────────────────────────────
    let password_hasher = Arc::new(PasswordHasher::new());
    let jwt_encoder = Arc::new(JwtEncoder::new(&config.auth));
    let jwt_decoder = Arc::new(JwtDecoder::new(&config.auth));

    // ── Step 4: Notification engine ──────────────────────────────
    let default_windows =
        ExpiryWindows::from_days(&config.notifications.default_expiry_windows).unwrap_or_default();
    let engine = Arc::new(GenerationEngine::new(
        Arc::clone(&inventory_repo) as Arc<dyn InventorySource>,
        Arc::clone(&household_repo) as Arc<dyn HouseholdDirectory>,
        Arc::clone(&preference_repo) as Arc<dyn PreferenceSource>,
        Arc::clone(&notification_repo) as Arc<dyn NotificationSink>,
        default_windows,
    ));

    // ── Step 5: Services ─────────────────────────────────────────
    let auth_service = Arc::new(AuthService::new(
        Arc::clone(&user_repo),
        Arc::clone(&password_hasher),
        Arc::clone(&jwt_encoder),
        Arc::clone(&jwt_decoder),
    ));
    let household_service = Arc::new(HouseholdService::new(
        Arc::clone(&household_repo),
        Arc::clone(&user_repo),
    ));
    let inventory_service = Arc::new(InventoryService::new(Arc::clone(&inventory_repo)));
    let grocery_service = Arc::new(GroceryService::new(
        Arc::clone(&grocery_repo),
        Arc::clone(&inventory_repo),
    ));
    let notification_service = Arc::new(NotificationService::new(
        Arc::clone(&notification_repo),
        Arc::clone(&preference_repo),
        Arc::clone(&engine),
        config.notifications.clone(),
    ));

    // ── Step 6: Background scheduler ─────────────────────────────
    let scheduler = Arc::new(NotificationScheduler::new(
        Arc::clone(&engine),
        config.notifications.clone(),
    ));
    if config.notifications.enabled {
        scheduler.start().await?;
    } else {
        tracing::info!("Notification scheduler disabled");
    }

    // ── Step 7: HTTP server ──────────────────────────────────────
    let app_state = pantry_api::state::AppState {
        config: Arc::new(config.clone()),
        db: db.clone(),
        jwt_decoder,
        user_repo,
        auth_service,
        household_service,
        inventory_service,
        grocery_service,
        notification_service,
    };

    let app = pantry_api::router::build_router(app_state);
    let addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .map_err(|e| AppError::internal(format!("Failed to bind {addr}: {e}")))?;

    tracing::info!("Smart Pantry API listening on {addr}");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| AppError::internal(format!("Server error: {e}")))?;

    // ── Step 8: Graceful shutdown ────────────────────────────────
    scheduler.shutdown().await?;
    db.close().await;

    tracing::info!("Smart Pantry shut down gracefully");
    Ok(())
}

/// Wait for shutdown signal (Ctrl+C or SIGTERM)
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("Failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
