//! Category Featured-Spec Repository
//!
//! One row per category key, addressed as `category_featured_specs:⟨key⟩`.

use super::{BaseRepository, RepoError, RepoResult};
use crate::db::models::FeaturedSpecsRecord;
use surrealdb::Surreal;
use surrealdb::engine::local::Db;

const TABLE: &str = "category_featured_specs";

#[derive(Clone)]
pub struct FeaturedSpecsRepository {
    base: BaseRepository,
}

impl FeaturedSpecsRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }

    /// Find the row of a category key
    pub async fn find(&self, category_key: &str) -> RepoResult<Option<FeaturedSpecsRecord>> {
        let record: Option<FeaturedSpecsRecord> = self
            .base
            .db()
            .select((TABLE, category_key))
            .await?;
        Ok(record)
    }

    /// Insert or replace the key list of a category (single upsert)
    pub async fn upsert(
        &self,
        category_key: &str,
        keys: Vec<String>,
    ) -> RepoResult<FeaturedSpecsRecord> {
        let record = FeaturedSpecsRecord {
            category_key: category_key.to_string(),
            featured_spec_keys: keys,
            updated_at: shared::util::now_millis(),
        };
        let saved: Option<FeaturedSpecsRecord> = self
            .base
            .db()
            .upsert((TABLE, category_key))
            .content(record)
            .await?;
        saved.ok_or_else(|| {
            RepoError::Database(format!("Failed to save featured specs for {category_key}"))
        })
    }

    /// Delete the row; returns the removed row if there was one
    pub async fn delete(&self, category_key: &str) -> RepoResult<Option<FeaturedSpecsRecord>> {
        let removed: Option<FeaturedSpecsRecord> =
            self.base.db().delete((TABLE, category_key)).await?;
        Ok(removed)
    }
}
