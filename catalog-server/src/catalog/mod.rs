//! Catalog engine
//!
//! - [`filter`] - listing query parsing
//! - [`match_stage`] - product predicate builder with per-dimension relaxation
//! - [`facets`] - facet aggregation
//! - [`gate`] - featured-spec gate

pub mod facets;
pub mod filter;
pub mod gate;
pub mod match_stage;

pub use facets::{CatalogPage, FacetEngine};
pub use filter::ProductFilter;
pub use match_stage::{BindValue, Dimension, MatchStage, MatchStageBuilder, Resolution};
