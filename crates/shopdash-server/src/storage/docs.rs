//! In-memory partitioned document collection using DashMap (replaces a
//! managed document store for simplicity)
//!
//! Items are keyed by `(partition, id)` where the partition is the owning
//! user's id. Reads, upserts, and deletes all address a single partition;
//! only [`DocumentCollection::find_any`] looks across partitions.

use dashmap::DashMap;
use shopdash_types::Product;
use std::sync::Arc;

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
struct DocumentKey {
    partition: String,
    id: String,
}

pub struct DocumentCollection {
    items: Arc<DashMap<DocumentKey, Product>>,
}

impl DocumentCollection {
    pub fn new() -> Self {
        Self {
            items: Arc::new(DashMap::new()),
        }
    }

    /// Read a single item from a partition.
    pub fn read(&self, partition: &str, id: &str) -> Option<Product> {
        let key = DocumentKey {
            partition: partition.to_string(),
            id: id.to_string(),
        };
        self.items.get(&key).map(|entry| entry.value().clone())
    }

    /// Insert a new item; fails if `(partition, id)` is already taken.
    pub fn insert(&self, product: Product) -> Result<Product, DocumentConflict> {
        let key = DocumentKey {
            partition: product.user_id.clone(),
            id: product.id.clone(),
        };
        match self.items.entry(key) {
            dashmap::mapref::entry::Entry::Occupied(_) => Err(DocumentConflict {
                id: product.id,
                partition: product.user_id,
            }),
            dashmap::mapref::entry::Entry::Vacant(slot) => {
                slot.insert(product.clone());
                Ok(product)
            }
        }
    }

    /// Insert or replace the whole item, last write wins.
    pub fn upsert(&self, product: Product) -> Product {
        let key = DocumentKey {
            partition: product.user_id.clone(),
            id: product.id.clone(),
        };
        self.items.insert(key, product.clone());
        product
    }

    /// Remove an item, returning it if it existed.
    pub fn remove(&self, partition: &str, id: &str) -> Option<Product> {
        let key = DocumentKey {
            partition: partition.to_string(),
            id: id.to_string(),
        };
        self.items.remove(&key).map(|(_, product)| product)
    }

    /// All items in one partition, ordered by id for stable responses.
    pub fn list(&self, partition: &str) -> Vec<Product> {
        let mut items: Vec<Product> = self
            .items
            .iter()
            .filter(|entry| entry.key().partition == partition)
            .map(|entry| entry.value().clone())
            .collect();
        items.sort_by(|a, b| a.id.cmp(&b.id));
        items
    }

    /// Cross-partition lookup by id alone.
    pub fn find_any(&self, id: &str) -> Option<Product> {
        self.items
            .iter()
            .find(|entry| entry.key().id == id)
            .map(|entry| entry.value().clone())
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

impl Default for DocumentCollection {
    fn default() -> Self {
        Self::new()
    }
}

/// An insert hit an existing `(partition, id)` slot.
#[derive(Debug)]
pub struct DocumentConflict {
    pub id: String,
    pub partition: String,
}

impl std::fmt::Display for DocumentConflict {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "document {} already exists in partition {}",
            self.id, self.partition
        )
    }
}

impl std::error::Error for DocumentConflict {}
