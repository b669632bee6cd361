//! Document product gateway
//!
//! Backed by the partitioned in-memory collection. The partition key is the
//! owning user's id, so every operation except the cross-partition `get`
//! needs a `userId`. Ids are caller-supplied. Ownership is never checked
//! against the users service on this path.
//!
//! Updates are read-modify-write: the stored item is read, the provided
//! fields are merged over it, and the whole document is upserted. Nothing is
//! held across that sequence, so two concurrent writers to the same
//! `(id, userId)` race and the later upsert wins with its complete document.

use async_trait::async_trait;
use shopdash_types::{Product, ProductDraft, ProductPatch, ProductWithOwner};
use std::sync::Arc;
use tracing::info;

use crate::error::ApiError;
use crate::services::gateway::ProductGateway;
use crate::storage::DocumentCollection;

/// Fixture set loaded by `/cosmos/seed`.
const SEED_PRODUCTS: &[(&str, &str, f64)] = &[
    ("1", "Laptop", 999.99),
    ("2", "Phone", 699.0),
    ("3", "Headphones", 149.5),
    ("4", "Keyboard", 89.99),
    ("5", "Monitor", 249.0),
];

pub struct DocumentGateway {
    docs: Arc<DocumentCollection>,
}

impl DocumentGateway {
    pub fn new(docs: Arc<DocumentCollection>) -> Self {
        Self { docs }
    }

    /// Bulk-upsert the fixture set into one partition, last write wins per
    /// id. Returns the number of items written.
    pub fn seed(&self, owner: &str) -> usize {
        for (id, name, price) in SEED_PRODUCTS {
            self.docs.upsert(Product {
                id: (*id).to_string(),
                name: (*name).to_string(),
                price: *price,
                user_id: owner.to_string(),
                created_at: None,
                updated_at: None,
                extra: serde_json::Map::new(),
            });
        }
        info!("seeded {} products for user {}", SEED_PRODUCTS.len(), owner);
        SEED_PRODUCTS.len()
    }

    /// Liveness probe used by `/cosmos/health`.
    pub fn probe(&self) -> usize {
        self.docs.len()
    }

    fn require_owner(owner: Option<String>) -> Result<String, ApiError> {
        owner
            .filter(|s| !s.is_empty())
            .ok_or_else(|| ApiError::validation("userId is required"))
    }
}

#[async_trait]
impl ProductGateway for DocumentGateway {
    fn backend_name(&self) -> &'static str {
        "document"
    }

    async fn create(&self, draft: ProductDraft) -> Result<Product, ApiError> {
        let (id, name, price, user_id) = match (
            draft.id.filter(|s| !s.is_empty()),
            draft.name.filter(|s| !s.is_empty()),
            draft.price,
            draft.user_id.filter(|s| !s.is_empty()),
        ) {
            (Some(id), Some(name), Some(price), Some(user_id)) => (id, name, price, user_id),
            _ => {
                return Err(ApiError::validation("id, name, price, userId are required"));
            }
        };

        let created = self
            .docs
            .insert(Product {
                id,
                name,
                price,
                user_id,
                created_at: None,
                updated_at: None,
                extra: serde_json::Map::new(),
            })
            .map_err(|conflict| ApiError::Storage(anyhow::Error::new(conflict)))?;

        info!(
            "created document {} in partition {}",
            created.id, created.user_id
        );
        Ok(created)
    }

    async fn list(&self, owner: Option<String>) -> Result<Vec<Product>, ApiError> {
        let owner = Self::require_owner(owner)?;
        Ok(self.docs.list(&owner))
    }

    async fn get(&self, id: &str) -> Result<Product, ApiError> {
        self.docs
            .find_any(id)
            .ok_or_else(|| ApiError::not_found("product not found"))
    }

    async fn update(&self, id: &str, patch: ProductPatch) -> Result<Product, ApiError> {
        let owner = Self::require_owner(patch.user_id.clone())?;

        // Read, merge, upsert. Absent fields keep their stored values; an
        // absent item is seeded from the patch alone.
        let mut doc = self.docs.read(&owner, id).unwrap_or_else(|| Product {
            id: id.to_string(),
            name: String::new(),
            price: 0.0,
            user_id: owner.clone(),
            created_at: None,
            updated_at: None,
            extra: serde_json::Map::new(),
        });

        if let Some(name) = patch.name {
            doc.name = name;
        }
        if let Some(price) = patch.price {
            doc.price = price;
        }

        Ok(self.docs.upsert(doc))
    }

    async fn delete(&self, id: &str, owner: Option<String>) -> Result<String, ApiError> {
        let owner = Self::require_owner(owner)?;

        match self.docs.remove(&owner, id) {
            Some(removed) => {
                info!("deleted document {} in partition {}", removed.id, owner);
                Ok(removed.id)
            }
            None => Err(ApiError::not_found("product not found")),
        }
    }

    async fn get_with_owner(&self, _id: &str) -> Result<ProductWithOwner, ApiError> {
        Err(ApiError::validation(
            "owner join is not supported by the document backend",
        ))
    }
}
