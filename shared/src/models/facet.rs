//! Facet and listing response shapes

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use super::featured_specs::FeaturedMode;
use super::product::Product;

/// Min / max price across the price-relaxed result set
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct PriceRange {
    pub min: f64,
    pub max: f64,
}

/// Labelled facet option (categories, brands)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FacetOption {
    /// Public key (slug) to send back as filter value
    pub value: String,
    pub label: String,
    pub count: u64,
}

/// Unlabelled facet option (availability, spec values)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValueCount {
    pub value: String,
    pub count: u64,
}

/// Normalized spec key → value histogram
pub type SpecHistogram = BTreeMap<String, Vec<ValueCount>>;

/// All facet groups of a listing
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Facets {
    pub price: PriceRange,
    pub categories: Vec<FacetOption>,
    pub brands: Vec<FacetOption>,
    pub availability: Vec<ValueCount>,
    pub specs: SpecHistogram,
}

/// Pagination metadata (1-based pages)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pagination {
    pub total: u64,
    pub page: u32,
    pub limit: u32,
    pub pages: u32,
}

impl Pagination {
    pub fn new(total: u64, page: u32, limit: u32) -> Self {
        let pages = if limit == 0 {
            0
        } else {
            total.div_ceil(u64::from(limit)) as u32
        };
        Self {
            total,
            page,
            limit,
            pages,
        }
    }

    /// Number of rows to skip
    pub fn offset(&self) -> u64 {
        u64::from(self.page.saturating_sub(1)) * u64::from(self.limit)
    }
}

/// Listing sort order
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortOrder {
    #[default]
    Newest,
    PriceAsc,
    PriceDesc,
}

impl SortOrder {
    /// Lenient parse, unknown values fall back to `newest`
    pub fn parse(s: &str) -> Self {
        match s {
            "price_asc" => Self::PriceAsc,
            "price_desc" => Self::PriceDesc,
            _ => Self::Newest,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Newest => "newest",
            Self::PriceAsc => "price_asc",
            Self::PriceDesc => "price_desc",
        }
    }
}

/// GET `/api/products` response
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductListResponse {
    pub products: Vec<Product>,
    pub pagination: Pagination,
    pub category_key: Option<String>,
    pub featured_mode: FeaturedMode,
    pub featured_spec_keys: Vec<String>,
    pub facets: Facets,
}

/// GET `/api/products/facets` response
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FacetsResponse {
    pub total: u64,
    pub category_key: Option<String>,
    pub featured_mode: FeaturedMode,
    pub featured_spec_keys: Vec<String>,
    pub facets: Facets,
}
