//! Product gateway contract
//!
//! One CRUD contract over either storage backend. The implementation is
//! chosen once at startup and injected into the router state; handlers call
//! through this trait and never ask which backend is active.

use async_trait::async_trait;
use shopdash_types::{Product, ProductDraft, ProductPatch, ProductWithOwner};

use crate::error::ApiError;

#[async_trait]
pub trait ProductGateway: Send + Sync {
    /// Name reported by `/health`.
    fn backend_name(&self) -> &'static str;

    /// Persist a new product. Each backend enforces its own required fields;
    /// the relational backend also checks that the owner exists.
    async fn create(&self, draft: ProductDraft) -> Result<Product, ApiError>;

    /// List products. The document backend requires `owner` (its partition
    /// key); the relational backend ignores it and returns everything.
    async fn list(&self, owner: Option<String>) -> Result<Vec<Product>, ApiError>;

    async fn get(&self, id: &str) -> Result<Product, ApiError>;

    async fn update(&self, id: &str, patch: ProductPatch) -> Result<Product, ApiError>;

    /// Delete by id, returning the deleted id. The document backend needs
    /// `owner` to address the partition.
    async fn delete(&self, id: &str, owner: Option<String>) -> Result<String, ApiError>;

    /// Product plus its owning user, joined via the users service.
    async fn get_with_owner(&self, id: &str) -> Result<ProductWithOwner, ApiError>;
}
