//! Document-backend handlers
//!
//! The `/cosmos` surface addresses the document backend directly and stays
//! mounted whichever backend answers `/products`, so a dashboard pointed at
//! it keeps working while the relational backend is active.

use crate::error::ApiError;
use crate::extractors::ApiJson;
use crate::handlers::{extract_owner, OwnerQuery};
use crate::services::ProductGateway;
use crate::AppState;
use axum::extract::{Path, Query, State};
use axum::http::header::HeaderMap;
use axum::http::StatusCode;
use axum::Json;
use serde_json::{json, Value};
use shopdash_types::{Product, ProductDraft, ProductPatch};

pub async fn list(
    State(state): State<AppState>,
    Query(query): Query<OwnerQuery>,
    headers: HeaderMap,
) -> Result<Json<Vec<Product>>, ApiError> {
    let owner = extract_owner(&query, &headers);
    let products = state.documents.list(owner).await?;
    Ok(Json(products))
}

pub async fn create(
    State(state): State<AppState>,
    ApiJson(draft): ApiJson<ProductDraft>,
) -> Result<(StatusCode, Json<Product>), ApiError> {
    let product = state.documents.create(draft).await?;
    Ok((StatusCode::CREATED, Json(product)))
}

pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<String>,
    ApiJson(patch): ApiJson<ProductPatch>,
) -> Result<Json<Product>, ApiError> {
    let product = state.documents.update(&id, patch).await?;
    Ok(Json(product))
}

pub async fn delete(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Query(query): Query<OwnerQuery>,
    headers: HeaderMap,
) -> Result<StatusCode, ApiError> {
    let owner = extract_owner(&query, &headers);
    state.documents.delete(&id, owner).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Fixture load; the partition defaults to `u1` like the dashboard expects.
pub async fn seed(
    State(state): State<AppState>,
    Query(query): Query<OwnerQuery>,
) -> Json<Value> {
    let owner = query.user_id.unwrap_or_else(|| "u1".to_string());
    let inserted = state.documents.seed(&owner);
    Json(json!({ "inserted": inserted, "userId": owner }))
}
