//! Product Model

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

/// Product availability
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Availability {
    ComingSoon,
    InStock,
    OutOfStock,
    PreOrder,
}

impl Availability {
    pub const ALL: [Availability; 4] = [
        Availability::ComingSoon,
        Availability::InStock,
        Availability::OutOfStock,
        Availability::PreOrder,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::ComingSoon => "coming_soon",
            Self::InStock => "in_stock",
            Self::OutOfStock => "out_of_stock",
            Self::PreOrder => "pre_order",
        }
    }
}

impl Default for Availability {
    fn default() -> Self {
        Self::InStock
    }
}

impl fmt::Display for Availability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Availability {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|a| a.as_str() == s)
            .ok_or_else(|| format!("unknown availability '{s}'"))
    }
}

/// One display-only attribute row
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AttributeItem {
    pub name: String,
    pub value: String,
}

/// Ordered group of display attributes (not filterable)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AttributeGroup {
    pub category: String,
    #[serde(default)]
    pub items: Vec<AttributeItem>,
}

/// Product entity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: String,
    pub title: String,
    pub slug: Option<String>,
    pub sku: Option<String>,
    pub price: f64,
    pub stock: i64,
    pub availability: Availability,
    /// Facet-eligible attributes, keys as entered
    pub specs: BTreeMap<String, String>,
    pub attribute_groups: Vec<AttributeGroup>,
    /// Brand reference (String ID)
    pub brand: Option<String>,
    /// Category references (String IDs)
    pub categories: Vec<String>,
    pub is_active: bool,
    pub created_at: i64,
    pub updated_at: i64,
}

/// Create product payload
///
/// `brand` / `categories` accept record ids (`brand:abc` or bare `abc`).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductCreate {
    pub title: String,
    pub slug: Option<String>,
    pub sku: Option<String>,
    pub price: f64,
    #[serde(default)]
    pub stock: i64,
    pub availability: Option<Availability>,
    #[serde(default)]
    pub specs: BTreeMap<String, String>,
    #[serde(default)]
    pub attribute_groups: Vec<AttributeGroup>,
    pub brand: Option<String>,
    #[serde(default)]
    pub categories: Vec<String>,
    pub is_active: Option<bool>,
}
