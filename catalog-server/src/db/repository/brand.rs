//! Brand Repository

use super::{BaseRepository, RepoError, RepoResult, invalid, parse_record_id, record_key};
use crate::utils::ErrorCode;
use crate::utils::validation::{MAX_NAME_LEN, validate_required_text, validate_slug};
use crate::db::models::Brand;
use shared::models::BrandCreate;
use surrealdb::engine::local::Db;
use surrealdb::{RecordId, Surreal};

const TABLE: &str = "brand";

#[derive(Clone)]
pub struct BrandRepository {
    base: BaseRepository,
}

impl BrandRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }

    /// Find brand by slug
    pub async fn find_by_slug(&self, slug: &str) -> RepoResult<Option<Brand>> {
        let mut result = self
            .base
            .db()
            .query("SELECT * FROM brand WHERE slug = $slug LIMIT 1")
            .bind(("slug", slug.to_string()))
            .await?;
        let brands: Vec<Brand> = result.take(0)?;
        Ok(brands.into_iter().next())
    }

    /// Find brand by id
    pub async fn find_by_id(&self, id: &RecordId) -> RepoResult<Option<Brand>> {
        let brand: Option<Brand> = self.base.db().select(id.clone()).await?;
        Ok(brand)
    }

    /// Resolve filter tokens (slug, `brand:key` or bare key) to brand ids
    pub async fn resolve_ids(&self, tokens: &[String]) -> RepoResult<Vec<RecordId>> {
        if tokens.is_empty() {
            return Ok(Vec::new());
        }
        let keys: Vec<String> = tokens
            .iter()
            .filter_map(|t| parse_record_id(TABLE, t).ok())
            .map(|id| record_key(&id))
            .collect();
        let brands: Vec<Brand> = self
            .base
            .db()
            .query("SELECT * FROM brand WHERE slug IN $slugs OR record::id(id) IN $keys")
            .bind(("slugs", tokens.to_vec()))
            .bind(("keys", keys))
            .await?
            .take(0)?;
        Ok(brands.into_iter().filter_map(|b| b.id).collect())
    }

    /// Fetch brands by record ids (facet labels)
    pub async fn find_by_ids(&self, ids: Vec<RecordId>) -> RepoResult<Vec<Brand>> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }
        let brands: Vec<Brand> = self
            .base
            .db()
            .query("SELECT * FROM brand WHERE id IN $ids")
            .bind(("ids", ids))
            .await?
            .take(0)?;
        Ok(brands)
    }

    /// Create a new brand
    pub async fn create(&self, data: BrandCreate) -> RepoResult<Brand> {
        validate_required_text(&data.name, "name", MAX_NAME_LEN).map_err(invalid)?;
        validate_slug(&data.slug, "slug").map_err(invalid)?;
        if self.find_by_slug(&data.slug).await?.is_some() {
            return Err(RepoError::Duplicate(
                ErrorCode::BrandSlugExists,
                format!("Brand '{}' already exists", data.slug),
            ));
        }

        let brand = Brand {
            id: None,
            name: data.name,
            slug: data.slug,
            is_active: data.is_active.unwrap_or(true),
        };

        let created: Option<Brand> = self.base.db().create(TABLE).content(brand).await?;
        created.ok_or_else(|| RepoError::Database("Failed to create brand".to_string()))
    }
}
