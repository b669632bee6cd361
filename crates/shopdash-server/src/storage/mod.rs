//! Storage layer
//!
//! Uses SQLite (embedded) for the relational backend.
//! Uses DashMap (in-memory) for the partitioned document backend.

pub mod db;
pub mod docs;

pub use db::Database;
pub use docs::{DocumentCollection, DocumentConflict};
