//! Category Model

use serde::{Deserialize, Serialize};

/// Category entity
///
/// `slug` is the stable public key used in filters and in featured-spec
/// configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Category {
    pub id: String,
    pub name: String,
    pub slug: String,
    pub sort_order: i32,
    pub is_active: bool,
}

/// Create category payload
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryCreate {
    pub name: String,
    pub slug: String,
    pub sort_order: Option<i32>,
    pub is_active: Option<bool>,
}
