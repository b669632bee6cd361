//! Shopdash Product Gateway
//!
//! One CRUD surface over two interchangeable product stores: an embedded
//! relational database and a partitioned in-memory document collection. The
//! active backend is chosen once at startup; the relational write path
//! additionally validates product owners against the external users service.

pub mod error;
pub mod extractors;
pub mod handlers;
pub mod services;
pub mod storage;

use axum::routing::{get, post, put};
use axum::Router;
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use services::{DocumentGateway, ProductGateway, RelationalGateway, UserDirectory};
use storage::{Database, DocumentCollection};

/// Which storage backend answers `/products`. Fixed for the process lifetime.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BackendKind {
    Relational,
    Document,
}

impl BackendKind {
    /// Parse the configured backend name; anything unrecognized falls back
    /// to the relational default.
    pub fn parse(s: &str) -> Self {
        match s.to_ascii_lowercase().as_str() {
            "document" => BackendKind::Document,
            _ => BackendKind::Relational,
        }
    }
}

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub db: Arc<Database>,
    pub documents: Arc<DocumentGateway>,
    pub products: Arc<dyn ProductGateway>,
}

impl AppState {
    /// Wire both backends and select the one answering `/products`.
    ///
    /// The document gateway is always constructed: its `/cosmos` surface and
    /// health probe stay reachable regardless of the selection.
    pub fn new(db: Arc<Database>, users: Arc<dyn UserDirectory>, backend: BackendKind) -> Self {
        let documents = Arc::new(DocumentGateway::new(Arc::new(DocumentCollection::new())));

        let products: Arc<dyn ProductGateway> = match backend {
            BackendKind::Relational => Arc::new(RelationalGateway::new(db.clone(), users)),
            BackendKind::Document => documents.clone(),
        };

        Self {
            db,
            documents,
            products,
        }
    }
}

/// Assemble the full HTTP surface with CORS and request tracing.
pub fn build_router(state: AppState) -> Router {
    Router::new()
        // Health checks
        .route("/health", get(handlers::health::health))
        .route("/db/health", get(handlers::health::db_health))
        .route("/cosmos/health", get(handlers::health::cosmos_health))
        // Gateway surface, answered by the selected backend
        .route(
            "/products",
            get(handlers::products::list).post(handlers::products::create),
        )
        .route(
            "/products/:id",
            get(handlers::products::get)
                .put(handlers::products::update)
                .delete(handlers::products::delete),
        )
        .route(
            "/products/:id/with-user",
            get(handlers::products::with_user),
        )
        // Document surface, always reachable
        .route(
            "/cosmos/products",
            get(handlers::cosmos::list).post(handlers::cosmos::create),
        )
        .route(
            "/cosmos/products/:id",
            put(handlers::cosmos::update).delete(handlers::cosmos::delete),
        )
        .route("/cosmos/seed", post(handlers::cosmos::seed))
        // Layers
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
