//! User types
//!
//! Users are owned by the external users service; the gateway only relays
//! them. Unknown fields are kept in `extra` so whatever the users service
//! returns reaches the dashboard unchanged.

use serde::{Deserialize, Serialize};

/// User account, as reported by the users service.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}
