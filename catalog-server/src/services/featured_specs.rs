//! Category featured-spec configuration
//!
//! Admin-side reads and writes of which spec facets a category exposes.
//! Keys are normalized before they are stored, so storage and product data
//! always agree on spelling.

use std::collections::BTreeSet;
use std::sync::Arc;

use serde_json::{Value, json};
use shared::models::{AvailableSpecKeys, FeaturedSpecs};
use shared::{normalize_spec_key, normalize_spec_keys};
use surrealdb::Surreal;
use surrealdb::engine::local::Db;

use crate::audit::{AuditAction, AuditService};
use crate::auth::CurrentUser;
use crate::db::models::Category;
use crate::db::repository::{CategoryRepository, FeaturedSpecsRepository, ProductRepository};
use crate::utils::validation::{MAX_FEATURED_KEYS, MAX_SPEC_KEY_LEN};
use crate::utils::{AppError, AppResult, ErrorCode};

const RESOURCE: &str = "category_featured_specs";
const FIELD: &str = "featuredSpecKeys";

pub struct FeaturedSpecsService {
    db: Surreal<Db>,
    audit: Arc<AuditService>,
}

impl FeaturedSpecsService {
    pub fn new(db: Surreal<Db>, audit: Arc<AuditService>) -> Self {
        Self { db, audit }
    }

    async fn require_category(&self, category_key: &str) -> AppResult<Category> {
        CategoryRepository::new(self.db.clone())
            .find_by_slug(category_key)
            .await?
            .ok_or_else(|| {
                AppError::with_message(
                    ErrorCode::CategoryNotFound,
                    format!("Category {category_key} not found"),
                )
                .with_detail("categoryKey", category_key)
            })
    }

    /// Normalized spec keys present on active products of the category,
    /// sorted ascending
    pub async fn available_spec_keys(&self, category_key: &str) -> AppResult<AvailableSpecKeys> {
        let category = self.require_category(category_key).await?;
        let Some(id) = category.id else {
            return Err(AppError::internal("Category record has no id"));
        };

        let maps = ProductRepository::new(self.db.clone())
            .spec_maps_in_category(&id)
            .await?;
        let keys: BTreeSet<String> = maps
            .iter()
            .flat_map(|m| m.keys())
            .map(|k| normalize_spec_key(k))
            .filter(|k| !k.is_empty())
            .collect();

        Ok(AvailableSpecKeys {
            category_key: category_key.to_string(),
            available_spec_keys: keys.into_iter().collect(),
        })
    }

    /// Current configuration; no row means `default_all`
    ///
    /// The category itself is not looked up.
    pub async fn featured_specs(&self, category_key: &str) -> AppResult<FeaturedSpecs> {
        let record = FeaturedSpecsRepository::new(self.db.clone())
            .find(category_key)
            .await?;
        Ok(match record {
            Some(r) => FeaturedSpecs::stored(category_key, r.featured_spec_keys),
            None => FeaturedSpecs::default_all(category_key),
        })
    }

    /// Replace the configuration from a raw JSON body
    ///
    /// The body must carry `featuredSpecKeys` as an array of strings. An
    /// empty array switches the category to `none`.
    pub async fn update_featured_specs(
        &self,
        category_key: &str,
        payload: &Value,
        operator: Option<&CurrentUser>,
    ) -> AppResult<FeaturedSpecs> {
        self.require_category(category_key).await?;
        let keys = parse_featured_keys(payload)?;

        let record = FeaturedSpecsRepository::new(self.db.clone())
            .upsert(category_key, keys)
            .await?;
        let state = FeaturedSpecs::stored(category_key, record.featured_spec_keys);

        tracing::info!(
            category_key,
            mode = state.mode.as_str(),
            keys = ?state.featured_spec_keys,
            "Featured specs updated"
        );
        self.audit
            .log(
                AuditAction::FeaturedSpecsUpdated,
                RESOURCE,
                category_key,
                operator,
                json!({
                    "featuredSpecKeys": state.featured_spec_keys,
                    "mode": state.mode,
                }),
            )
            .await;

        Ok(state)
    }

    /// Remove the configuration; the category reverts to `default_all`
    pub async fn delete_featured_specs(
        &self,
        category_key: &str,
        operator: Option<&CurrentUser>,
    ) -> AppResult<FeaturedSpecs> {
        let removed = FeaturedSpecsRepository::new(self.db.clone())
            .delete(category_key)
            .await?
            .ok_or_else(|| {
                AppError::with_message(
                    ErrorCode::FeaturedSpecsNotFound,
                    format!("No featured spec configuration for {category_key}"),
                )
                .with_detail("categoryKey", category_key)
            })?;

        tracing::info!(category_key, "Featured specs deleted");
        self.audit
            .log(
                AuditAction::FeaturedSpecsDeleted,
                RESOURCE,
                category_key,
                operator,
                json!({ "previousKeys": removed.featured_spec_keys }),
            )
            .await;

        Ok(FeaturedSpecs::default_all(category_key))
    }
}

/// Validate and normalize the `featuredSpecKeys` array of a request body
pub fn parse_featured_keys(payload: &Value) -> AppResult<Vec<String>> {
    let Some(items) = payload.get(FIELD).and_then(Value::as_array) else {
        return Err(AppError::invalid_field(
            FIELD,
            "featuredSpecKeys must be an array of strings",
        ));
    };
    if items.len() > MAX_FEATURED_KEYS {
        return Err(AppError::invalid_field(
            FIELD,
            format!("At most {MAX_FEATURED_KEYS} featured spec keys are allowed"),
        ));
    }

    let mut raw = Vec::with_capacity(items.len());
    for item in items {
        let Some(key) = item.as_str() else {
            return Err(AppError::invalid_field(
                FIELD,
                "featuredSpecKeys must be an array of strings",
            ));
        };
        if key.chars().count() > MAX_SPEC_KEY_LEN {
            return Err(AppError::invalid_field(
                FIELD,
                format!("Spec key is too long (max {MAX_SPEC_KEY_LEN}): {key}"),
            ));
        }
        raw.push(key);
    }

    Ok(normalize_spec_keys(raw))
}
