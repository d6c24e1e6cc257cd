//! Database Models
//!
//! Rows as stored in SurrealDB. Record links are `surrealdb::RecordId`;
//! conversion into the API shapes lives in `api::convert`.

pub mod serde_helpers;

pub mod brand;
pub mod category;
pub mod featured_specs;
pub mod product;

// Re-exports
pub use brand::Brand;
pub use category::Category;
pub use featured_specs::FeaturedSpecsRecord;
pub use product::Product;
