//! Shopdash Product Gateway Server
//!
//! HTTP service persisting products to a relational store or a document
//! store, selected by configuration, with owner validation proxied to the
//! external users service.

use anyhow::{Context, Result};
use shopdash_server::services::UsersApiClient;
use shopdash_server::storage::Database;
use shopdash_server::{build_router, AppState, BackendKind};
use std::net::SocketAddr;
use std::sync::Arc;
use tracing::{error, info, Level};
use tracing_subscriber::FmtSubscriber;

#[tokio::main]
async fn main() {
    // Set up panic hook to log crashes
    std::panic::set_hook(Box::new(|info| {
        let location = info
            .location()
            .map(|l| format!("{}:{}", l.file(), l.line()));
        let payload = if let Some(s) = info.payload().downcast_ref::<&str>() {
            s.to_string()
        } else if let Some(s) = info.payload().downcast_ref::<String>() {
            s.clone()
        } else {
            "Unknown panic".to_string()
        };
        eprintln!("[PANIC] at {:?}: {}", location, payload);
        tracing::error!("PANIC at {:?}: {}", location, payload);
    }));

    // Initialize tracing
    let subscriber = FmtSubscriber::builder()
        .with_max_level(Level::INFO)
        .finish();
    if let Err(e) = tracing::subscriber::set_global_default(subscriber) {
        eprintln!("[FATAL] Failed to initialize logging: {}", e);
        std::process::exit(1);
    }

    info!(
        "Starting Shopdash Product Gateway v{}",
        env!("CARGO_PKG_VERSION")
    );

    if let Err(e) = run_server().await {
        error!("Server failed: {:#}", e);
        std::process::exit(1);
    }
}

async fn run_server() -> Result<()> {
    let config = load_config();
    info!(
        "Config loaded: bind={}, db={}, backend={:?}, users_api={}",
        config.bind_address, config.database_path, config.backend, config.users_api_url
    );

    // Initialize SQLite database
    let db = Arc::new(
        Database::new(&config.database_path)
            .await
            .context("Failed to initialize database")?,
    );
    info!("SQLite database initialized at: {}", config.database_path);

    // Users service client for owner validation
    let users = Arc::new(UsersApiClient::new(config.users_api_url.clone()));

    // Create app state; both backends are wired, one answers /products
    let state = AppState::new(db, users, config.backend);

    let app = build_router(state);

    // Start server
    let addr: SocketAddr = config
        .bind_address
        .parse()
        .context("Failed to parse bind address")?;
    info!("Server listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .context("Failed to bind to address")?;

    axum::serve(listener, app).await.context("Server error")?;

    Ok(())
}

#[derive(Debug, Clone)]
struct Config {
    bind_address: String,
    database_path: String,
    backend: BackendKind,
    users_api_url: String,
}

fn load_config() -> Config {
    let bind_address =
        std::env::var("BIND_ADDRESS").unwrap_or_else(|_| "0.0.0.0:4002".to_string());

    let database_path =
        std::env::var("DATABASE_PATH").unwrap_or_else(|_| "data/shopdash.db".to_string());

    let backend = BackendKind::parse(
        &std::env::var("PRODUCTS_BACKEND").unwrap_or_else(|_| "relational".to_string()),
    );

    let users_api_url =
        std::env::var("USERS_API_URL").unwrap_or_else(|_| "http://users-api:4001".to_string());

    Config {
        bind_address,
        database_path,
        backend,
        users_api_url,
    }
}
