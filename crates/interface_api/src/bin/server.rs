//! Storefront Core - API Server Binary
//!
//! This binary starts the HTTP API server for the storefront system.
//!
//! # Usage
//!
//! ```bash
//! # Run with default configuration
//! cargo run --bin storefront-api
//!
//! # Run with environment variables
//! API_HOST=0.0.0.0 API_PORT=8080 DATABASE_URL=postgres://... cargo run --bin storefront-api
//! ```
//!
//! # Environment Variables
//!
//! * `API_HOST` - Server host (default: 0.0.0.0)
//! * `API_PORT` - Server port (default: 8080)
//! * `API_JWT_SECRET` - JWT signing secret (required in production)
//! * `API_JWT_EXPIRATION_SECS` - JWT token expiration in seconds (default: 3600)
//! * `API_DATABASE_URL` - PostgreSQL connection string
//! * `API_LOG_LEVEL` - Log level: trace, debug, info, warn, error (default: info)

use std::net::SocketAddr;
use std::sync::Arc;

use tokio::net::TcpListener;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use core_kernel::{Role, StoreSettings, StoreTimezone, UserId, UserRecord};
use domain_invoicing::CodeGenerator;
use infra_db::{
    create_pool_from_url, CounterRepository, InvoiceRepository, ProductRepository,
    SettingsRepository, UserRepository, MIGRATOR,
};
use interface_api::{auth, config::ApiConfig, create_router, AppState};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load .env file if present (useful for local development)
    dotenvy::dotenv().ok();

    // Load configuration from environment
    let config = load_config()?;

    // Initialize tracing/logging
    init_tracing(&config.log_level);

    tracing::info!(
        host = %config.host,
        port = %config.port,
        "Starting Storefront Core API Server"
    );

    // Create database connection pool and apply migrations
    let pool = create_pool_from_url(&config.database_url).await?;
    tracing::info!("Running database migrations...");
    MIGRATOR.run(&pool).await?;
    tracing::info!("Database ready");

    // Wire the repositories into shared state
    let state = AppState {
        products: Arc::new(ProductRepository::new(pool.clone())),
        invoices: Arc::new(InvoiceRepository::new(pool.clone())),
        users: Arc::new(UserRepository::new(pool.clone())),
        settings: Arc::new(SettingsRepository::new(pool.clone())),
        code_gen: CodeGenerator::new(Arc::new(CounterRepository::new(pool.clone()))),
        tz: StoreTimezone::default(),
        config: config.clone(),
    };

    // First-run seeding: an admin account and an empty store profile
    seed_defaults(&state).await?;

    // Create the API router
    let app = create_router(state);

    // Parse server address
    let addr: SocketAddr = config.server_addr().parse()?;

    tracing::info!(%addr, "Server listening");

    // Create TCP listener and serve
    let listener = TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server shutdown complete");
    Ok(())
}

/// Loads API configuration from environment variables.
///
/// Falls back to default values if environment variables are not set.
fn load_config() -> Result<ApiConfig, Box<dyn std::error::Error>> {
    // Try to load from environment with API_ prefix
    let config = ApiConfig::from_env().unwrap_or_else(|_| {
        // Fall back to individual env vars or defaults
        ApiConfig {
            host: std::env::var("API_HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
            port: std::env::var("API_PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(8080),
            jwt_secret: std::env::var("API_JWT_SECRET")
                .unwrap_or_else(|_| "dev-secret-change-in-production".to_string()),
            jwt_expiration_secs: std::env::var("API_JWT_EXPIRATION_SECS")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(3600),
            database_url: std::env::var("DATABASE_URL")
                .or_else(|_| std::env::var("API_DATABASE_URL"))
                .unwrap_or_else(|_| "postgres://localhost/storefront".to_string()),
            log_level: std::env::var("API_LOG_LEVEL")
                .or_else(|_| std::env::var("RUST_LOG"))
                .unwrap_or_else(|_| "info".to_string()),
        }
    });

    Ok(config)
}

/// Initializes the tracing subscriber for structured logging.
fn init_tracing(log_level: &str) {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(log_level))
        .unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_target(true))
        .init();
}

/// Seeds the default admin account and store profile on an empty database.
///
/// The default credentials (admin / admin123) exist so a fresh deployment is
/// reachable; operators are expected to change them immediately.
async fn seed_defaults(state: &AppState) -> Result<(), Box<dyn std::error::Error>> {
    if state.users.count().await? == 0 {
        let admin = UserRecord {
            id: UserId::new(),
            username: "admin".to_string(),
            password_hash: auth::hash_password("admin123")?,
            role: Role::Admin,
        };
        state.users.insert(&admin).await?;
        tracing::warn!("Seeded default admin account; change its password");
    }

    if state.settings.get().await?.is_none() {
        state
            .settings
            .upsert(&StoreSettings {
                store_name: "My Store".to_string(),
                phone: String::new(),
                logo_url: String::new(),
            })
            .await?;
        tracing::info!("Seeded default store settings");
    }

    Ok(())
}

/// Waits for shutdown signal (Ctrl+C or SIGTERM).
///
/// This enables graceful shutdown of the server, allowing in-flight
/// requests to complete before the process exits.
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("Failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::info!("Received Ctrl+C, initiating graceful shutdown");
        }
        _ = terminate => {
            tracing::info!("Received SIGTERM, initiating graceful shutdown");
        }
    }
}
