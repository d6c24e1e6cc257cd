//! Product Repository
//!
//! Every write recomputes `spec_facets` from `specs` so spec filters and spec
//! facets always see normalized keys.

use super::{
    BaseRepository, BrandRepository, CategoryRepository, RepoError, RepoResult, invalid,
    parse_record_id,
};
use crate::utils::ErrorCode;
use crate::utils::validation::{
    MAX_NAME_LEN, MAX_SLUG_LEN, validate_optional_text, validate_required_text, validate_slug,
};
use crate::db::models::Product;
use shared::models::ProductCreate;
use shared::normalize_spec_map;
use std::collections::BTreeMap;
use surrealdb::engine::local::Db;
use surrealdb::{RecordId, Surreal};

const TABLE: &str = "product";

#[derive(Clone)]
pub struct ProductRepository {
    base: BaseRepository,
}

impl ProductRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }

    /// Find product by id
    pub async fn find_by_id(&self, id: &str) -> RepoResult<Option<Product>> {
        let thing = parse_record_id(TABLE, id)?;
        let product: Option<Product> = self.base.db().select(thing).await?;
        Ok(product)
    }

    async fn exists_with(&self, field: &'static str, value: &str) -> RepoResult<bool> {
        let sql = format!("SELECT VALUE id FROM product WHERE {field} = $value LIMIT 1");
        let ids: Vec<RecordId> = self
            .base
            .db()
            .query(sql)
            .bind(("value", value.to_string()))
            .await?
            .take(0)?;
        Ok(!ids.is_empty())
    }

    /// Create a new product
    ///
    /// `brand` / `categories` must reference existing records.
    pub async fn create(&self, data: ProductCreate) -> RepoResult<Product> {
        validate_required_text(&data.title, "title", MAX_NAME_LEN).map_err(invalid)?;
        if let Some(slug) = &data.slug {
            validate_slug(slug, "slug").map_err(invalid)?;
        }
        validate_optional_text(&data.sku, "sku", MAX_SLUG_LEN).map_err(invalid)?;
        if !data.price.is_finite() || data.price < 0.0 {
            return Err(RepoError::Validation(format!(
                "Invalid price: {}",
                data.price
            )));
        }
        if let Some(slug) = &data.slug
            && self.exists_with("slug", slug).await?
        {
            return Err(RepoError::Duplicate(
                ErrorCode::ProductSlugExists,
                format!("Product slug '{slug}' already exists"),
            ));
        }
        if let Some(sku) = &data.sku
            && self.exists_with("sku", sku).await?
        {
            return Err(RepoError::Duplicate(
                ErrorCode::ProductSlugExists,
                format!("Product sku '{sku}' already exists"),
            ));
        }

        let brand = match &data.brand {
            Some(raw) => {
                let id = parse_record_id("brand", raw)?;
                BrandRepository::new(self.base.db().clone())
                    .find_by_id(&id)
                    .await?
                    .ok_or_else(|| {
                        RepoError::NotFound(ErrorCode::BrandNotFound, format!("Brand {raw} not found"))
                    })?;
                Some(id)
            }
            None => None,
        };

        let mut categories = Vec::with_capacity(data.categories.len());
        for raw in &data.categories {
            let id = parse_record_id("category", raw)?;
            if !categories.contains(&id) {
                categories.push(id);
            }
        }
        let found = CategoryRepository::new(self.base.db().clone())
            .find_by_ids(categories.clone())
            .await?;
        if found.len() != categories.len() {
            return Err(RepoError::NotFound(
                ErrorCode::CategoryNotFound,
                "One or more categories not found".to_string(),
            ));
        }

        let now = shared::util::now_millis();
        let product = Product {
            id: None,
            title: data.title,
            slug: data.slug,
            sku: data.sku,
            price: data.price,
            stock: data.stock,
            availability: data.availability.unwrap_or_default(),
            spec_facets: normalize_spec_map(&data.specs),
            specs: data.specs,
            attribute_groups: data.attribute_groups,
            brand,
            categories,
            is_active: data.is_active.unwrap_or(true),
            created_at: now,
            updated_at: now,
        };

        let created: Option<Product> = self.base.db().create(TABLE).content(product).await?;
        created.ok_or_else(|| RepoError::Database("Failed to create product".to_string()))
    }

    /// Replace the spec map of a product (spec_facets recomputed)
    pub async fn update_specs(
        &self,
        id: &str,
        specs: BTreeMap<String, String>,
    ) -> RepoResult<Product> {
        let thing = parse_record_id(TABLE, id)?;
        let spec_facets = normalize_spec_map(&specs);
        let mut result = self
            .base
            .db()
            .query("UPDATE $thing SET specs = $specs, spec_facets = $spec_facets, updated_at = $now RETURN AFTER")
            .bind(("thing", thing))
            .bind(("specs", specs))
            .bind(("spec_facets", spec_facets))
            .bind(("now", shared::util::now_millis()))
            .await?;
        let updated: Vec<Product> = result.take(0)?;
        updated
            .into_iter()
            .next()
            .ok_or_else(|| {
                RepoError::NotFound(ErrorCode::ProductNotFound, format!("Product {id} not found"))
            })
    }

    /// Raw spec maps of all active products in a category
    pub async fn spec_maps_in_category(
        &self,
        category: &RecordId,
    ) -> RepoResult<Vec<BTreeMap<String, String>>> {
        let maps: Vec<Option<BTreeMap<String, String>>> = self
            .base
            .db()
            .query("SELECT VALUE specs FROM product WHERE is_active = true AND categories CONTAINS $category")
            .bind(("category", category.clone()))
            .await?
            .take(0)?;
        Ok(maps.into_iter().flatten().collect())
    }
}
