//! Shared types for the storefront catalog
//!
//! Types used by the catalog server and by API clients: the unified error
//! system, API-facing models, facet result shapes and the spec key
//! normalizer.

pub mod error;
pub mod models;
pub mod spec_key;
pub mod util;

// Re-exports
pub use axum::Json;
pub use error::{ApiResponse, AppError, AppResult, ErrorCategory, ErrorCode};
pub use http;
pub use serde::{Deserialize, Serialize};
pub use spec_key::{normalize_spec_key, normalize_spec_keys, normalize_spec_map};
