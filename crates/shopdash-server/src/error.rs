//! Request-boundary error taxonomy
//!
//! Every failure is serialized as `{"error": message}` plus the HTTP status.
//! The dashboard shows the message text verbatim, so variants carry the exact
//! operator-facing wording.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ApiError {
    /// Missing or malformed required field (400).
    #[error("{0}")]
    Validation(String),

    /// No matching row or item (404).
    #[error("{0}")]
    NotFound(String),

    /// The users service is unreachable or answered outside 2xx/404 (502).
    #[error("{0}")]
    Upstream(String),

    /// Driver, query, or collection failure (500).
    #[error("{0:#}")]
    Storage(#[from] anyhow::Error),
}

impl ApiError {
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::NotFound(message.into())
    }

    pub fn upstream(message: impl Into<String>) -> Self {
        Self::Upstream(message.into())
    }

    fn status(&self) -> StatusCode {
        match self {
            ApiError::Validation(_) => StatusCode::BAD_REQUEST,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::Upstream(_) => StatusCode::BAD_GATEWAY,
            ApiError::Storage(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let message = self.to_string();

        if status.is_server_error() {
            tracing::error!("request failed: {}", message);
        }

        (status, Json(json!({ "error": message }))).into_response()
    }
}
