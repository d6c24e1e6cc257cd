//! Data models
//!
//! API-facing shapes shared between the catalog server and its clients.
//! Record ids are rendered as `"table:key"` strings.

pub mod brand;
pub mod category;
pub mod facet;
pub mod featured_specs;
pub mod product;

// Re-exports
pub use brand::*;
pub use category::*;
pub use facet::*;
pub use featured_specs::*;
pub use product::*;
