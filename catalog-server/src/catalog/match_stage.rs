//! Product match stage
//!
//! Builds the `WHERE` predicate of product queries from a [`ProductFilter`].
//! Brand and category tokens are resolved against the database once per
//! request; every predicate variant (strict, or with one dimension relaxed
//! for its own facet) reuses that resolution and one shared set of bind
//! parameters.

use serde::Serialize;
use surrealdb::engine::local::Db;
use surrealdb::{RecordId, Surreal};

use super::filter::ProductFilter;
use crate::core::config::UnresolvedFilterPolicy;
use crate::db::models::Category;
use crate::db::repository::{BrandRepository, CategoryRepository};
use crate::utils::AppResult;

/// Filter dimension that can be left out of a predicate
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Dimension {
    Search,
    Price,
    InStock,
    Availability,
    Brand,
    Category,
    Spec,
}

/// Typed query parameter
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum BindValue {
    Text(String),
    Number(f64),
    TextList(Vec<String>),
    Records(Vec<RecordId>),
}

/// Brand / category filters after lookup
///
/// `None` means the request had no filter on that dimension; `Some(empty)`
/// means it had one and nothing matched.
#[derive(Debug, Clone, Default)]
pub struct Resolution {
    pub brands: Option<Vec<RecordId>>,
    pub categories: Option<Vec<Category>>,
}

/// Conjunction of SurrealQL conditions
#[derive(Debug, Clone, PartialEq)]
pub struct MatchStage {
    clauses: Vec<String>,
}

impl MatchStage {
    pub fn clauses(&self) -> &[String] {
        &self.clauses
    }

    /// Text to place after `WHERE`
    pub fn where_clause(&self) -> String {
        self.clauses.join(" AND ")
    }
}

/// Request-scoped builder
#[derive(Debug, Clone)]
pub struct MatchStageBuilder {
    filter: ProductFilter,
    resolution: Resolution,
    policy: UnresolvedFilterPolicy,
    /// (normalized key, bind name) for spec filters
    spec_params: Vec<(String, String)>,
    bindings: Vec<(String, BindValue)>,
}

impl MatchStageBuilder {
    /// Resolve brand / category tokens, then build
    pub async fn resolve(
        db: &Surreal<Db>,
        filter: ProductFilter,
        policy: UnresolvedFilterPolicy,
    ) -> AppResult<Self> {
        let brands = if filter.brands.is_empty() {
            None
        } else {
            Some(
                BrandRepository::new(db.clone())
                    .resolve_ids(&filter.brands)
                    .await?,
            )
        };
        let categories = if filter.categories.is_empty() {
            None
        } else {
            Some(
                CategoryRepository::new(db.clone())
                    .resolve_keys(&filter.categories)
                    .await?,
            )
        };

        if brands.as_ref().is_some_and(Vec::is_empty)
            || categories.as_ref().is_some_and(Vec::is_empty)
        {
            tracing::debug!(
                brands = ?filter.brands,
                categories = ?filter.categories,
                policy = ?policy,
                "Unresolved brand/category filter"
            );
        }

        Ok(Self::new(filter, Resolution { brands, categories }, policy))
    }

    pub fn new(filter: ProductFilter, resolution: Resolution, policy: UnresolvedFilterPolicy) -> Self {
        let mut bindings = Vec::new();

        if let Some(search) = &filter.search {
            bindings.push(("search".to_string(), BindValue::Text(search.clone())));
        }
        if let Some(min) = filter.min_price {
            bindings.push(("min_price".to_string(), BindValue::Number(min)));
        }
        if let Some(max) = filter.max_price {
            bindings.push(("max_price".to_string(), BindValue::Number(max)));
        }
        if !filter.availability.is_empty() {
            let values = filter
                .availability
                .iter()
                .map(|a| a.as_str().to_string())
                .collect();
            bindings.push(("availability".to_string(), BindValue::TextList(values)));
        }
        if let Some(ids) = resolution.brands.as_ref().filter(|ids| !ids.is_empty()) {
            bindings.push(("brand_ids".to_string(), BindValue::Records(ids.clone())));
        }
        if let Some(categories) = resolution.categories.as_ref().filter(|c| !c.is_empty()) {
            let ids = categories.iter().filter_map(|c| c.id.clone()).collect();
            bindings.push(("category_ids".to_string(), BindValue::Records(ids)));
        }

        let mut spec_params = Vec::with_capacity(filter.specs.len());
        for (i, (key, values)) in filter.specs.iter().enumerate() {
            let param = format!("spec_{i}");
            bindings.push((param.clone(), BindValue::TextList(values.clone())));
            spec_params.push((key.clone(), param));
        }

        Self {
            filter,
            resolution,
            policy,
            spec_params,
            bindings,
        }
    }

    pub fn filter(&self) -> &ProductFilter {
        &self.filter
    }

    /// All parameters referenced by any predicate variant
    pub fn bindings(&self) -> &[(String, BindValue)] {
        &self.bindings
    }

    /// The category when the filter resolves to exactly one
    pub fn single_category(&self) -> Option<&Category> {
        match self.resolution.categories.as_deref() {
            Some([only]) => Some(only),
            _ => None,
        }
    }

    /// Predicate with the `exclude` dimensions left out
    pub fn build(&self, exclude: &[Dimension]) -> MatchStage {
        let included = |d: Dimension| !exclude.contains(&d);
        let mut clauses = vec!["is_active = true".to_string()];

        if included(Dimension::Search) && self.filter.search.is_some() {
            clauses.push("string::contains(string::lowercase(title), $search)".to_string());
        }
        if included(Dimension::Price) {
            if self.filter.min_price.is_some() {
                clauses.push("price >= $min_price".to_string());
            }
            if self.filter.max_price.is_some() {
                clauses.push("price <= $max_price".to_string());
            }
        }
        if included(Dimension::InStock) && self.filter.in_stock {
            clauses.push("stock > 0".to_string());
        }
        if included(Dimension::Availability) && !self.filter.availability.is_empty() {
            clauses.push("availability IN $availability".to_string());
        }
        if included(Dimension::Brand)
            && let Some(ids) = &self.resolution.brands
        {
            if !ids.is_empty() {
                clauses.push("brand IN $brand_ids".to_string());
            } else if self.policy == UnresolvedFilterPolicy::MatchNone {
                clauses.push("false".to_string());
            }
        }
        if included(Dimension::Category)
            && let Some(categories) = &self.resolution.categories
        {
            if !categories.is_empty() {
                clauses.push("categories CONTAINSANY $category_ids".to_string());
            } else if self.policy == UnresolvedFilterPolicy::MatchNone {
                clauses.push("false".to_string());
            }
        }
        if included(Dimension::Spec) {
            for (key, param) in &self.spec_params {
                clauses.push(format!("spec_facets.`{key}` IN ${param}"));
            }
        }

        MatchStage { clauses }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared::models::Availability;

    fn category(key: &str) -> Category {
        Category {
            id: Some(RecordId::from_table_key("category", key)),
            name: key.to_uppercase(),
            slug: key.to_string(),
            sort_order: 0,
            is_active: true,
        }
    }

    fn full_filter() -> ProductFilter {
        let mut filter = ProductFilter {
            search: Some("rtx".into()),
            min_price: Some(100.0),
            max_price: Some(900.0),
            in_stock: true,
            availability: vec![Availability::InStock],
            brands: vec!["nvidia".into()],
            categories: vec!["graphics-cards".into()],
            ..ProductFilter::default()
        };
        filter.specs.insert("Chipset".into(), vec!["AD104".into()]);
        filter.specs.insert("Vram".into(), vec!["8GB".into(), "12GB".into()]);
        filter
    }

    fn resolved() -> Resolution {
        Resolution {
            brands: Some(vec![RecordId::from_table_key("brand", "nvidia")]),
            categories: Some(vec![category("graphics-cards")]),
        }
    }

    #[test]
    fn test_empty_filter_only_active() {
        let builder = MatchStageBuilder::new(
            ProductFilter::default(),
            Resolution::default(),
            UnresolvedFilterPolicy::MatchNone,
        );
        assert_eq!(builder.build(&[]).where_clause(), "is_active = true");
        assert!(builder.bindings().is_empty());
        assert!(builder.single_category().is_none());
    }

    #[test]
    fn test_strict_predicate() {
        let builder =
            MatchStageBuilder::new(full_filter(), resolved(), UnresolvedFilterPolicy::MatchNone);
        let stage = builder.build(&[]);
        assert_eq!(
            stage.clauses(),
            &[
                "is_active = true",
                "string::contains(string::lowercase(title), $search)",
                "price >= $min_price",
                "price <= $max_price",
                "stock > 0",
                "availability IN $availability",
                "brand IN $brand_ids",
                "categories CONTAINSANY $category_ids",
                "spec_facets.`Chipset` IN $spec_0",
                "spec_facets.`Vram` IN $spec_1",
            ]
        );
        let names: Vec<&str> = builder.bindings().iter().map(|(n, _)| n.as_str()).collect();
        assert_eq!(
            names,
            vec![
                "search",
                "min_price",
                "max_price",
                "availability",
                "brand_ids",
                "category_ids",
                "spec_0",
                "spec_1"
            ]
        );
        assert_eq!(builder.single_category().unwrap().slug, "graphics-cards");
    }

    #[test]
    fn test_relaxed_dimension_omitted() {
        let builder =
            MatchStageBuilder::new(full_filter(), resolved(), UnresolvedFilterPolicy::MatchNone);

        let price = builder.build(&[Dimension::Price]).where_clause();
        assert!(!price.contains("price"));
        assert!(price.contains("brand IN $brand_ids"));

        let category = builder.build(&[Dimension::Category]).where_clause();
        assert!(!category.contains("categories"));
        assert!(category.contains("price >= $min_price"));

        let brand = builder.build(&[Dimension::Brand]).where_clause();
        assert!(!brand.contains("brand"));
        assert!(brand.contains("categories CONTAINSANY"));
    }

    #[test]
    fn test_unresolved_policy() {
        let filter = full_filter();
        let unresolved = Resolution {
            brands: Some(vec![]),
            categories: Some(vec![]),
        };

        let strict =
            MatchStageBuilder::new(filter.clone(), unresolved.clone(), UnresolvedFilterPolicy::MatchNone);
        let clauses = strict.build(&[]);
        assert_eq!(
            clauses.clauses().iter().filter(|c| c.as_str() == "false").count(),
            2
        );
        // 放开 category 后只剩 brand 的 false
        assert_eq!(
            strict
                .build(&[Dimension::Category])
                .clauses()
                .iter()
                .filter(|c| c.as_str() == "false")
                .count(),
            1
        );

        let permissive = MatchStageBuilder::new(filter, unresolved, UnresolvedFilterPolicy::Ignore);
        let where_clause = permissive.build(&[]).where_clause();
        assert!(!where_clause.contains("false"));
        assert!(!where_clause.contains("brand"));
        assert!(!where_clause.contains("categories"));
    }

    #[test]
    fn test_multiple_categories_no_single() {
        let builder = MatchStageBuilder::new(
            ProductFilter::default(),
            Resolution {
                brands: None,
                categories: Some(vec![category("gpu"), category("cpu")]),
            },
            UnresolvedFilterPolicy::MatchNone,
        );
        assert!(builder.single_category().is_none());
    }
}
