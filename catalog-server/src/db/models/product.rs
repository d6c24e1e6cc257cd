//! Product Model

use super::serde_helpers;
use serde::{Deserialize, Serialize};
use shared::models::{AttributeGroup, Availability};
use std::collections::BTreeMap;
use surrealdb::RecordId;

/// Product entity
///
/// `spec_facets` mirrors `specs` with normalized keys. It is derived on every
/// write by the repository and is what spec filters match against.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Product {
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "serde_helpers::option_record_id::deserialize"
    )]
    pub id: Option<RecordId>,
    pub title: String,
    #[serde(default)]
    pub slug: Option<String>,
    #[serde(default)]
    pub sku: Option<String>,
    pub price: f64,
    #[serde(default)]
    pub stock: i64,
    #[serde(default)]
    pub availability: Availability,
    #[serde(default)]
    pub specs: BTreeMap<String, String>,
    #[serde(default)]
    pub spec_facets: BTreeMap<String, String>,
    #[serde(default)]
    pub attribute_groups: Vec<AttributeGroup>,
    #[serde(
        default,
        deserialize_with = "serde_helpers::option_record_id::deserialize"
    )]
    pub brand: Option<RecordId>,
    #[serde(default, deserialize_with = "serde_helpers::vec_record_id::deserialize")]
    pub categories: Vec<RecordId>,
    #[serde(
        default = "default_true",
        deserialize_with = "serde_helpers::bool_true"
    )]
    pub is_active: bool,
    #[serde(default)]
    pub created_at: i64,
    #[serde(default)]
    pub updated_at: i64,
}

fn default_true() -> bool {
    true
}
