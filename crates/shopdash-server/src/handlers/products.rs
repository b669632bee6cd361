//! Product handlers
//!
//! The stable `/products` surface. Every handler goes through the injected
//! [`ProductGateway`](crate::services::ProductGateway); which storage backend
//! answers was decided once at startup.

use crate::error::ApiError;
use crate::extractors::ApiJson;
use crate::handlers::{extract_owner, OwnerQuery};
use crate::services::ProductGateway;
use crate::AppState;
use axum::extract::{Path, Query, State};
use axum::http::header::HeaderMap;
use axum::http::StatusCode;
use axum::Json;
use serde::Serialize;
use shopdash_types::{Product, ProductDraft, ProductPatch, ProductWithOwner};

#[derive(Debug, Serialize)]
pub struct DeleteResponse {
    deleted: String,
}

pub async fn list(
    State(state): State<AppState>,
    Query(query): Query<OwnerQuery>,
    headers: HeaderMap,
) -> Result<Json<Vec<Product>>, ApiError> {
    let owner = extract_owner(&query, &headers);
    let products = state.products.list(owner).await?;
    Ok(Json(products))
}

pub async fn create(
    State(state): State<AppState>,
    ApiJson(draft): ApiJson<ProductDraft>,
) -> Result<(StatusCode, Json<Product>), ApiError> {
    let product = state.products.create(draft).await?;
    Ok((StatusCode::CREATED, Json(product)))
}

pub async fn get(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Product>, ApiError> {
    let product = state.products.get(&id).await?;
    Ok(Json(product))
}

pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<String>,
    ApiJson(patch): ApiJson<ProductPatch>,
) -> Result<Json<Product>, ApiError> {
    let product = state.products.update(&id, patch).await?;
    Ok(Json(product))
}

pub async fn delete(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Query(query): Query<OwnerQuery>,
    headers: HeaderMap,
) -> Result<Json<DeleteResponse>, ApiError> {
    let owner = extract_owner(&query, &headers);
    let deleted = state.products.delete(&id, owner).await?;
    Ok(Json(DeleteResponse { deleted }))
}

pub async fn with_user(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<ProductWithOwner>, ApiError> {
    let joined = state.products.get_with_owner(&id).await?;
    Ok(Json(joined))
}
