//! Facet aggregation engine
//!
//! Produces a listing page and its facets from one multi-statement query:
//!
//! | statement | predicate |
//! |-----------|-----------|
//! | products page, total, availability, specs | strict |
//! | price range | price relaxed |
//! | categories | category relaxed |
//! | brands | brand relaxed |
//!
//! Spec facets stay strict: selecting a value of one spec narrows the value
//! counts of every other spec, including its own.

use std::collections::{BTreeMap, HashMap};

use serde::Deserialize;
use shared::models::{
    FacetOption, Facets, FeaturedMode, Pagination, PriceRange, Product, SortOrder, SpecHistogram,
    ValueCount,
};
use surrealdb::engine::local::Db;
use surrealdb::{RecordId, Surreal};

use super::filter::ProductFilter;
use super::gate;
use super::match_stage::{Dimension, MatchStageBuilder};
use crate::core::config::UnresolvedFilterPolicy;
use crate::db::models::{self, serde_helpers};
use crate::db::repository::{BrandRepository, CategoryRepository, FeaturedSpecsRepository};
use crate::utils::{AppError, AppResult};

#[derive(Debug, Deserialize)]
struct CountRow {
    total: u64,
}

#[derive(Debug, Deserialize)]
struct PriceRow {
    #[serde(default)]
    min: Option<f64>,
    #[serde(default)]
    max: Option<f64>,
}

#[derive(Debug, Deserialize)]
struct CategoriesRow {
    #[serde(default, deserialize_with = "serde_helpers::vec_record_id::deserialize")]
    categories: Vec<RecordId>,
}

#[derive(Debug, Deserialize)]
struct BrandCountRow {
    #[serde(default, deserialize_with = "serde_helpers::option_record_id::deserialize")]
    brand: Option<RecordId>,
    count: u64,
}

#[derive(Debug, Deserialize)]
struct AvailabilityCountRow {
    #[serde(default)]
    availability: Option<String>,
    count: u64,
}

#[derive(Debug, Deserialize)]
struct SpecRow {
    #[serde(default)]
    spec_facets: Option<BTreeMap<String, String>>,
}

/// Result shared by the listing and the facets-only endpoints
#[derive(Debug, Clone)]
pub struct CatalogPage {
    /// Empty when products were not requested
    pub products: Vec<Product>,
    pub pagination: Pagination,
    pub category_key: Option<String>,
    pub featured_mode: FeaturedMode,
    pub featured_spec_keys: Vec<String>,
    pub facets: Facets,
}

fn order_by(sort: SortOrder) -> &'static str {
    match sort {
        SortOrder::Newest => "created_at DESC, id ASC",
        SortOrder::PriceAsc => "price ASC, id ASC",
        SortOrder::PriceDesc => "price DESC, id ASC",
    }
}

/// Sort facet options: count desc, then label asc
fn sort_options(options: &mut [FacetOption]) {
    options.sort_by(|a, b| b.count.cmp(&a.count).then_with(|| a.label.cmp(&b.label)));
}

/// Sort value counts: count desc, then value asc
fn sort_value_counts(values: &mut [ValueCount]) {
    values.sort_by(|a, b| b.count.cmp(&a.count).then_with(|| a.value.cmp(&b.value)));
}

/// Count `(spec key, value)` pairs over normalized spec maps
pub fn spec_histogram<'a>(maps: impl IntoIterator<Item = &'a BTreeMap<String, String>>) -> SpecHistogram {
    let mut counts: BTreeMap<String, HashMap<String, u64>> = BTreeMap::new();
    for map in maps {
        for (key, value) in map {
            let value = value.trim();
            if key.is_empty() || value.is_empty() {
                continue;
            }
            *counts
                .entry(key.clone())
                .or_default()
                .entry(value.to_string())
                .or_default() += 1;
        }
    }

    counts
        .into_iter()
        .map(|(key, values)| {
            let mut values: Vec<ValueCount> = values
                .into_iter()
                .map(|(value, count)| ValueCount { value, count })
                .collect();
            sort_value_counts(&mut values);
            (key, values)
        })
        .collect()
}

/// Faceted listing over the product table
#[derive(Clone)]
pub struct FacetEngine {
    db: Surreal<Db>,
    policy: UnresolvedFilterPolicy,
}

impl FacetEngine {
    pub fn new(db: Surreal<Db>, policy: UnresolvedFilterPolicy) -> Self {
        Self { db, policy }
    }

    /// Compute facets, plus the requested page of products when
    /// `include_products` is set
    pub async fn compute(
        &self,
        filter: ProductFilter,
        include_products: bool,
    ) -> AppResult<CatalogPage> {
        let builder = MatchStageBuilder::resolve(&self.db, filter, self.policy).await?;

        // featured 配置只在过滤恰好解析到一个分类时生效
        let category_key = builder.single_category().map(|c| c.slug.clone());
        let (featured_mode, featured_spec_keys) = match &category_key {
            Some(key) => {
                let stored = FeaturedSpecsRepository::new(self.db.clone())
                    .find(key)
                    .await?
                    .map(|r| r.featured_spec_keys);
                let mode = FeaturedMode::derive(stored.as_deref());
                (mode, stored.unwrap_or_default())
            }
            None => (FeaturedMode::DefaultAll, Vec::new()),
        };

        let strict = builder.build(&[]).where_clause();
        let price = builder.build(&[Dimension::Price]).where_clause();
        let by_category = builder.build(&[Dimension::Category]).where_clause();
        let by_brand = builder.build(&[Dimension::Brand]).where_clause();

        let filter = builder.filter();
        let mut statements = Vec::with_capacity(7);
        if include_products {
            statements.push(format!(
                "SELECT * FROM product WHERE {strict} ORDER BY {} LIMIT $limit START $start",
                order_by(filter.sort)
            ));
        }
        statements.push(format!(
            "SELECT count() AS total FROM product WHERE {strict} GROUP ALL"
        ));
        statements.push(format!(
            "SELECT math::min(price) AS min, math::max(price) AS max FROM product WHERE {price} GROUP ALL"
        ));
        // categories 是数组，按商品取回后在内存中计数；行数随匹配商品数增长
        statements.push(format!(
            "SELECT categories FROM product WHERE {by_category}"
        ));
        statements.push(format!(
            "SELECT brand, count() AS count FROM product WHERE {by_brand} GROUP BY brand"
        ));
        statements.push(format!(
            "SELECT availability, count() AS count FROM product WHERE {strict} GROUP BY availability"
        ));
        // spec 键是动态字段，无法 GROUP BY；同样每个匹配商品一行
        statements.push(format!("SELECT spec_facets FROM product WHERE {strict}"));

        let pagination_probe = Pagination::new(0, filter.page, filter.limit);
        let mut query = self
            .db
            .query(statements.join(";\n"))
            .bind(("limit", filter.limit))
            .bind(("start", pagination_probe.offset()));
        for (name, value) in builder.bindings() {
            query = query.bind((name.clone(), value.clone()));
        }

        let mut response = query.await.map_err(|e| {
            tracing::error!(error = %e, "Facet query failed");
            AppError::database(e.to_string())
        })?;

        // 不取商品时所有语句下标前移一位
        let base = usize::from(include_products);
        let products: Vec<models::Product> = if include_products {
            response.take(0).map_err(db_error)?
        } else {
            Vec::new()
        };
        let count_rows: Vec<CountRow> = response.take(base).map_err(db_error)?;
        let price_rows: Vec<PriceRow> = response.take(base + 1).map_err(db_error)?;
        let category_rows: Vec<CategoriesRow> = response.take(base + 2).map_err(db_error)?;
        let brand_rows: Vec<BrandCountRow> = response.take(base + 3).map_err(db_error)?;
        let availability_rows: Vec<AvailabilityCountRow> =
            response.take(base + 4).map_err(db_error)?;
        let spec_rows: Vec<SpecRow> = response.take(base + 5).map_err(db_error)?;

        let total = count_rows.first().map(|r| r.total).unwrap_or(0);
        let price = price_rows
            .first()
            .map(|r| PriceRange {
                min: r.min.unwrap_or(0.0),
                max: r.max.unwrap_or(0.0),
            })
            .unwrap_or_default();

        let categories = self.category_options(category_rows).await?;
        let brands = self.brand_options(brand_rows).await?;

        let mut availability: Vec<ValueCount> = availability_rows
            .into_iter()
            .filter_map(|r| {
                r.availability.map(|value| ValueCount {
                    value,
                    count: r.count,
                })
            })
            .collect();
        sort_value_counts(&mut availability);

        let histogram = spec_histogram(spec_rows.iter().filter_map(|r| r.spec_facets.as_ref()));
        let specs = gate::apply(histogram, featured_mode, &featured_spec_keys);

        let featured_spec_keys = match featured_mode {
            FeaturedMode::DefaultAll => Vec::new(),
            _ => featured_spec_keys,
        };

        Ok(CatalogPage {
            products: products.into_iter().map(Into::into).collect(),
            pagination: Pagination::new(total, filter.page, filter.limit),
            category_key,
            featured_mode,
            featured_spec_keys,
            facets: Facets {
                price,
                categories,
                brands,
                availability,
                specs,
            },
        })
    }

    async fn category_options(&self, rows: Vec<CategoriesRow>) -> AppResult<Vec<FacetOption>> {
        let mut ids: Vec<RecordId> = Vec::new();
        let mut counts: HashMap<String, u64> = HashMap::new();
        for row in rows {
            // 同一商品内重复的分类只计一次
            let mut seen: Vec<&RecordId> = Vec::with_capacity(row.categories.len());
            for id in &row.categories {
                if seen.contains(&id) {
                    continue;
                }
                seen.push(id);
                let count = counts.entry(id.to_string()).or_default();
                if *count == 0 {
                    ids.push(id.clone());
                }
                *count += 1;
            }
        }
        if ids.is_empty() {
            return Ok(Vec::new());
        }

        let categories = CategoryRepository::new(self.db.clone())
            .find_by_ids(ids)
            .await?;
        let mut options: Vec<FacetOption> = categories
            .into_iter()
            .filter_map(|c| {
                let count = counts.get(&c.id.as_ref()?.to_string())?;
                Some(FacetOption {
                    value: c.slug,
                    label: c.name,
                    count: *count,
                })
            })
            .collect();
        sort_options(&mut options);
        Ok(options)
    }

    async fn brand_options(&self, rows: Vec<BrandCountRow>) -> AppResult<Vec<FacetOption>> {
        let mut ids: Vec<RecordId> = Vec::with_capacity(rows.len());
        let mut counts: HashMap<String, u64> = HashMap::with_capacity(rows.len());
        for row in rows {
            if let Some(brand) = row.brand {
                counts.insert(brand.to_string(), row.count);
                ids.push(brand);
            }
        }
        if ids.is_empty() {
            return Ok(Vec::new());
        }

        let brands = BrandRepository::new(self.db.clone())
            .find_by_ids(ids)
            .await?;
        let mut options: Vec<FacetOption> = brands
            .into_iter()
            .filter_map(|b| {
                let count = counts.get(&b.id.as_ref()?.to_string())?;
                Some(FacetOption {
                    value: b.slug,
                    label: b.name,
                    count: *count,
                })
            })
            .collect();
        sort_options(&mut options);
        Ok(options)
    }
}

fn db_error(e: surrealdb::Error) -> AppError {
    tracing::error!(error = %e, "Failed to decode facet query result");
    AppError::database(e.to_string())
}
