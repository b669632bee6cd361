//! Product types and request payloads
//!
//! Products are camelCase on the wire (`userId`, `createdAt`). The document
//! backend stores free-form items, so `Product` keeps unknown fields in
//! `extra` instead of dropping them. Request payloads accept the loose input
//! the dashboard actually sends: ids may arrive as JSON numbers and prices as
//! numeric strings, both coerced on deserialization.

use serde::de::{self, Deserializer};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::user::User;

/// A product as persisted by either storage backend.
///
/// `created_at`/`updated_at` are assigned by the relational backend only and
/// omitted from document items.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: String,
    pub name: String,
    pub price: f64,
    pub user_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<chrono::DateTime<chrono::Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<chrono::DateTime<chrono::Utc>>,
    /// Free-form fields carried through the document backend untouched.
    #[serde(flatten)]
    pub extra: serde_json::Map<String, Value>,
}

/// Body of a product create request.
///
/// Everything is optional at the parsing layer; each backend enforces its own
/// required set (the relational backend generates the id itself, the document
/// backend demands one from the caller).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductDraft {
    #[serde(default, deserialize_with = "lenient_id")]
    pub id: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "lenient_price")]
    pub price: Option<f64>,
    #[serde(default)]
    pub user_id: Option<String>,
}

/// Body of a product update request.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductPatch {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "lenient_price")]
    pub price: Option<f64>,
    #[serde(default)]
    pub user_id: Option<String>,
}

/// Composite returned by the owner join: the product and its owning user.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProductWithOwner {
    pub product: Product,
    pub user: User,
}

/// Accept a string or a JSON number as an id; numbers are stringified.
fn lenient_id<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<Value>::deserialize(deserializer)? {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(s)) => Ok(Some(s)),
        Some(Value::Number(n)) => Ok(Some(n.to_string())),
        Some(other) => Err(de::Error::custom(format!(
            "id must be a string or number, got {other}"
        ))),
    }
}

/// Accept a number or a numeric string as a price.
fn lenient_price<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<Value>::deserialize(deserializer)? {
        None | Some(Value::Null) => Ok(None),
        Some(Value::Number(n)) => n
            .as_f64()
            .map(Some)
            .ok_or_else(|| de::Error::custom("price is out of range")),
        Some(Value::String(s)) => s
            .parse::<f64>()
            .map(Some)
            .map_err(|_| de::Error::custom(format!("price is not numeric: {s:?}"))),
        Some(other) => Err(de::Error::custom(format!(
            "price must be a number, got {other}"
        ))),
    }
}
