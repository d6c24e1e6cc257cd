//! Brand Model

use super::serde_helpers;
use serde::{Deserialize, Serialize};
use surrealdb::RecordId;

/// Brand entity
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Brand {
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "serde_helpers::option_record_id::deserialize"
    )]
    pub id: Option<RecordId>,
    pub name: String,
    pub slug: String,
    #[serde(
        default = "default_true",
        deserialize_with = "serde_helpers::bool_true"
    )]
    pub is_active: bool,
}

fn default_true() -> bool {
    true
}
