//! Users service client
//!
//! The users service is the system of record for user identities. The
//! relational write path consults it synchronously before every create and
//! update; `get_with_owner` fetches the full user body for the join.
//!
//! A 404 means "no such user". Any other non-2xx status, and any transport
//! failure, is an upstream fault. No retries, no caching of the answer.

use async_trait::async_trait;
use reqwest::Client as ReqwestClient;
use reqwest::StatusCode;
use shopdash_types::User;

use crate::error::ApiError;

/// Read-side view of the users service.
#[async_trait]
pub trait UserDirectory: Send + Sync {
    /// Existence check used by relational writes; status-only, the body is
    /// never parsed.
    async fn exists(&self, id: &str) -> Result<bool, ApiError>;

    /// Fetch the full user body; `Ok(None)` when the directory reports 404.
    async fn find(&self, id: &str) -> Result<Option<User>, ApiError>;
}

/// HTTP implementation talking to the real users service.
pub struct UsersApiClient {
    http: ReqwestClient,
    base_url: String,
}

impl UsersApiClient {
    pub fn new(base_url: String) -> Self {
        Self {
            http: ReqwestClient::new(),
            base_url,
        }
    }

    fn user_url(&self, id: &str) -> String {
        format!("{}/users/{}", self.base_url, id)
    }
}

#[async_trait]
impl UserDirectory for UsersApiClient {
    async fn exists(&self, id: &str) -> Result<bool, ApiError> {
        let response = self
            .http
            .get(self.user_url(id))
            .send()
            .await
            .map_err(|e| {
                tracing::warn!("users-api unreachable: {}", e);
                ApiError::upstream("users-api error")
            })?;

        match response.status() {
            StatusCode::NOT_FOUND => Ok(false),
            status if status.is_success() => Ok(true),
            status => {
                tracing::warn!("users-api answered {}", status);
                Err(ApiError::upstream("users-api error"))
            }
        }
    }

    async fn find(&self, id: &str) -> Result<Option<User>, ApiError> {
        let response = self
            .http
            .get(self.user_url(id))
            .send()
            .await
            .map_err(|e| {
                tracing::warn!("users-api unreachable: {}", e);
                ApiError::upstream("users-api error")
            })?;

        match response.status() {
            StatusCode::NOT_FOUND => Ok(None),
            status if status.is_success() => {
                let user = response
                    .json::<User>()
                    .await
                    .map_err(|_| ApiError::upstream("users-api error"))?;
                Ok(Some(user))
            }
            status => {
                tracing::warn!("users-api answered {}", status);
                Err(ApiError::upstream("users-api error"))
            }
        }
    }
}
