//! Wire types for the two resources served by the backend.
//!
//! Entities are what the backend returns; drafts are what the console sends.
//! Drafts never carry `id` or `created_at`.
//!
use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};

use super::Entity;

/// Opaque server-assigned identifier.
///
/// Backends differ on whether ids are numbers or strings, so both are accepted
/// and the value is kept as text for URL paths and display.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(from = "RawId", into = "String")]
pub struct EntityId(String);

#[derive(Deserialize)]
#[serde(untagged)]
enum RawId {
    Int(i64),
    Text(String),
}

impl From<RawId> for EntityId {
    fn from(raw: RawId) -> Self {
        match raw {
            RawId::Int(n) => Self(n.to_string()),
            RawId::Text(s) => Self(s),
        }
    }
}

impl From<EntityId> for String {
    fn from(id: EntityId) -> Self {
        id.0
    }
}

impl EntityId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Display for EntityId {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
pub struct Product {
    pub id: EntityId,
    pub name: String,
    pub description: String,
    pub price: f64,
    pub category: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub tags: Vec<String>,
    pub in_stock: bool,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ProductDraft {
    pub name: String,
    pub description: String,
    pub price: f64,
    pub category: String,
    pub tags: Vec<String>,
    pub in_stock: bool,
}

#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
pub struct User {
    pub id: EntityId,
    pub name: String,
    pub email: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub created_at: String,
}

/// A user as submitted. `password: None` leaves the stored password alone.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct UserDraft {
    pub name: String,
    pub email: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
}

impl Entity for Product {
    type Draft = ProductDraft;
    const COLLECTION: &'static str = "products";
    const NOUN: &'static str = "product";

    fn id(&self) -> &EntityId {
        &self.id
    }
}

impl Entity for User {
    type Draft = UserDraft;
    const COLLECTION: &'static str = "users";
    const NOUN: &'static str = "user";

    fn id(&self) -> &EntityId {
        &self.id
    }
}

impl User {
    /// Calendar date of `created_at`, or the raw value when it is not a known timestamp format.
    pub fn created_date(&self) -> String {
        let raw = self.created_at.trim();
        if let Ok(dt) = chrono::DateTime::parse_from_rfc3339(raw) {
            return dt.date_naive().format("%Y-%m-%d").to_string();
        }
        if let Ok(dt) = chrono::NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f") {
            return dt.date().format("%Y-%m-%d").to_string();
        }
        if let Ok(dt) = chrono::NaiveDateTime::parse_from_str(raw, "%Y-%m-%d %H:%M:%S%.f") {
            return dt.date().format("%Y-%m-%d").to_string();
        }
        raw.to_string()
    }
}

/// Explicit `null` reads as the default, same as a missing key.
fn null_as_default<'de, D, T>(deserializer: D) -> std::result::Result<T, D::Error>
where
    D: serde::Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}
