//! Category Repository

use super::{BaseRepository, RepoError, RepoResult, invalid, parse_record_id, record_key};
use crate::utils::ErrorCode;
use crate::utils::validation::{MAX_NAME_LEN, validate_required_text, validate_slug};
use crate::db::models::Category;
use shared::models::CategoryCreate;
use surrealdb::engine::local::Db;
use surrealdb::{RecordId, Surreal};

const TABLE: &str = "category";

#[derive(Clone)]
pub struct CategoryRepository {
    base: BaseRepository,
}

impl CategoryRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }

    /// Find category by slug
    pub async fn find_by_slug(&self, slug: &str) -> RepoResult<Option<Category>> {
        let mut result = self
            .base
            .db()
            .query("SELECT * FROM category WHERE slug = $slug LIMIT 1")
            .bind(("slug", slug.to_string()))
            .await?;
        let categories: Vec<Category> = result.take(0)?;
        Ok(categories.into_iter().next())
    }

    /// Resolve filter tokens (slug, `category:key` or bare key) to categories
    ///
    /// Unknown tokens are skipped; the result has no duplicates.
    pub async fn resolve_keys(&self, tokens: &[String]) -> RepoResult<Vec<Category>> {
        if tokens.is_empty() {
            return Ok(Vec::new());
        }
        let keys: Vec<String> = tokens
            .iter()
            .filter_map(|t| parse_record_id(TABLE, t).ok())
            .map(|id| record_key(&id))
            .collect();
        let categories: Vec<Category> = self
            .base
            .db()
            .query("SELECT * FROM category WHERE slug IN $slugs OR record::id(id) IN $keys ORDER BY slug")
            .bind(("slugs", tokens.to_vec()))
            .bind(("keys", keys))
            .await?
            .take(0)?;
        Ok(categories)
    }

    /// Fetch categories by record ids (facet labels)
    pub async fn find_by_ids(&self, ids: Vec<RecordId>) -> RepoResult<Vec<Category>> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }
        let categories: Vec<Category> = self
            .base
            .db()
            .query("SELECT * FROM category WHERE id IN $ids")
            .bind(("ids", ids))
            .await?
            .take(0)?;
        Ok(categories)
    }

    /// Create a new category
    pub async fn create(&self, data: CategoryCreate) -> RepoResult<Category> {
        validate_required_text(&data.name, "name", MAX_NAME_LEN).map_err(invalid)?;
        validate_slug(&data.slug, "slug").map_err(invalid)?;
        if self.find_by_slug(&data.slug).await?.is_some() {
            return Err(RepoError::Duplicate(
                ErrorCode::CategorySlugExists,
                format!("Category '{}' already exists", data.slug),
            ));
        }

        let category = Category {
            id: None,
            name: data.name,
            slug: data.slug,
            sort_order: data.sort_order.unwrap_or(0),
            is_active: data.is_active.unwrap_or(true),
        };

        let created: Option<Category> = self.base.db().create(TABLE).content(category).await?;
        created.ok_or_else(|| RepoError::Database("Failed to create category".to_string()))
    }
}
