//! HTTP handlers

pub mod cosmos;
pub mod health;
pub mod products;

use axum::http::header::HeaderMap;
use serde::Deserialize;

/// Query string carrying the owner / partition key.
#[derive(Debug, Deserialize)]
pub struct OwnerQuery {
    #[serde(rename = "userId")]
    pub user_id: Option<String>,
}

/// `userId` query parameter, falling back to the `x-user-id` header.
fn extract_owner(query: &OwnerQuery, headers: &HeaderMap) -> Option<String> {
    query.user_id.clone().or_else(|| {
        headers
            .get("x-user-id")
            .and_then(|h| h.to_str().ok())
            .map(|s| s.to_string())
    })
}
