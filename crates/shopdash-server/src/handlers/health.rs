//! Health handlers

use crate::error::ApiError;
use crate::services::ProductGateway;
use crate::AppState;
use axum::extract::State;
use axum::Json;
use serde_json::{json, Value};

/// Liveness; reports which backend answers `/products`.
pub async fn health(State(state): State<AppState>) -> Json<Value> {
    Json(json!({
        "status": "ok",
        "service": env!("CARGO_PKG_NAME"),
        "backend": state.products.backend_name(),
    }))
}

/// Relational probe: a `SELECT 1` round trip through the pool.
pub async fn db_health(State(state): State<AppState>) -> Result<Json<Value>, ApiError> {
    state.db.ping().await?;
    Ok(Json(json!({ "ok": true })))
}

/// Document probe: a trivial query against the collection.
pub async fn cosmos_health(State(state): State<AppState>) -> Json<Value> {
    let items = state.documents.probe();
    Json(json!({ "ok": true, "items": items }))
}
