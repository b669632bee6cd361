//! Relational product gateway
//!
//! Backed by the SQLite `products` table. The id is a server-generated
//! surrogate key; any caller-supplied id is ignored. Creates and updates are
//! full-row writes gated on a users-service existence check, so the `userId`
//! column behaves as a soft foreign key with no constraint in the schema.

use async_trait::async_trait;
use shopdash_types::{Product, ProductDraft, ProductPatch, ProductWithOwner};
use std::sync::Arc;
use tracing::info;

use crate::error::ApiError;
use crate::services::gateway::ProductGateway;
use crate::services::users_api::UserDirectory;
use crate::storage::Database;

pub struct RelationalGateway {
    db: Arc<Database>,
    users: Arc<dyn UserDirectory>,
}

struct WriteFields<'a> {
    name: &'a str,
    price: f64,
    user_id: &'a str,
}

impl RelationalGateway {
    pub fn new(db: Arc<Database>, users: Arc<dyn UserDirectory>) -> Self {
        Self { db, users }
    }

    /// Both create and update take the full field set; a missing or empty
    /// field rejects the whole write.
    fn require_write_fields<'a>(
        name: &'a Option<String>,
        price: &Option<f64>,
        user_id: &'a Option<String>,
    ) -> Result<WriteFields<'a>, ApiError> {
        let name = name.as_deref().filter(|s| !s.is_empty());
        let user_id = user_id.as_deref().filter(|s| !s.is_empty());
        match (name, *price, user_id) {
            (Some(name), Some(price), Some(user_id)) => Ok(WriteFields {
                name,
                price,
                user_id,
            }),
            _ => Err(ApiError::validation("name, price, userId required")),
        }
    }

    /// Point-in-time ownership check against the users service.
    async fn check_owner(&self, user_id: &str) -> Result<(), ApiError> {
        if self.users.exists(user_id).await? {
            Ok(())
        } else {
            Err(ApiError::validation("user does not exist"))
        }
    }
}

#[async_trait]
impl ProductGateway for RelationalGateway {
    fn backend_name(&self) -> &'static str {
        "relational"
    }

    async fn create(&self, draft: ProductDraft) -> Result<Product, ApiError> {
        let fields = Self::require_write_fields(&draft.name, &draft.price, &draft.user_id)?;
        self.check_owner(fields.user_id).await?;

        let product = self
            .db
            .insert_product(fields.name, fields.price, fields.user_id)
            .await
            .map_err(|e| e.context("insert failed"))?;

        info!("created product {} for user {}", product.id, product.user_id);
        Ok(product)
    }

    async fn list(&self, _owner: Option<String>) -> Result<Vec<Product>, ApiError> {
        // No server-side owner filter on the relational path
        let products = self
            .db
            .list_products()
            .await
            .map_err(|e| e.context("query failed"))?;
        Ok(products)
    }

    async fn get(&self, id: &str) -> Result<Product, ApiError> {
        self.db
            .get_product(id)
            .await
            .map_err(|e| e.context("query failed"))?
            .ok_or_else(|| ApiError::not_found("product not found"))
    }

    async fn update(&self, id: &str, patch: ProductPatch) -> Result<Product, ApiError> {
        let fields = Self::require_write_fields(&patch.name, &patch.price, &patch.user_id)?;
        self.check_owner(fields.user_id).await?;

        self.db
            .update_product(id, fields.name, fields.price, fields.user_id)
            .await
            .map_err(|e| e.context("update failed"))?
            .ok_or_else(|| ApiError::not_found("product not found"))
    }

    async fn delete(&self, id: &str, _owner: Option<String>) -> Result<String, ApiError> {
        let deleted = self
            .db
            .delete_product(id)
            .await
            .map_err(|e| e.context("delete failed"))?;

        if deleted {
            info!("deleted product {}", id);
            Ok(id.to_string())
        } else {
            Err(ApiError::not_found("product not found"))
        }
    }

    async fn get_with_owner(&self, id: &str) -> Result<ProductWithOwner, ApiError> {
        let product = self.get(id).await?;

        // Any miss here, including a since-deleted owner, is an upstream
        // fault on this path
        let user = self
            .users
            .find(&product.user_id)
            .await?
            .ok_or_else(|| ApiError::upstream("users-api error"))?;

        Ok(ProductWithOwner { product, user })
    }
}
