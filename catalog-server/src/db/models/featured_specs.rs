//! Category featured-spec configuration row

use serde::{Deserialize, Serialize};

/// `category_featured_specs:⟨category_key⟩`
///
/// Row presence drives the featured mode; see [`shared::models::FeaturedMode`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FeaturedSpecsRecord {
    pub category_key: String,
    #[serde(default)]
    pub featured_spec_keys: Vec<String>,
    #[serde(default)]
    pub updated_at: i64,
}
