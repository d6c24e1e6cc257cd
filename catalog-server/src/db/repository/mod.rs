//! Repository Module
//!
//! CRUD and lookup operations for the catalog tables in SurrealDB.

pub mod brand;
pub mod category;
pub mod featured_specs;
pub mod product;

// Re-exports
pub use brand::BrandRepository;
pub use category::CategoryRepository;
pub use featured_specs::FeaturedSpecsRepository;
pub use product::ProductRepository;

use surrealdb::engine::local::Db;
use surrealdb::{RecordId, Surreal};
use thiserror::Error;

use crate::utils::ErrorCode;

/// Repository error types
///
/// `NotFound` / `Duplicate` carry the catalog code reported to clients.
#[derive(Debug, Error)]
pub enum RepoError {
    #[error("Not found: {1}")]
    NotFound(ErrorCode, String),

    #[error("Duplicate: {1}")]
    Duplicate(ErrorCode, String),

    #[error("Database error: {0}")]
    Database(String),

    #[error("Validation error: {0}")]
    Validation(String),
}

impl From<surrealdb::Error> for RepoError {
    fn from(err: surrealdb::Error) -> Self {
        RepoError::Database(err.to_string())
    }
}

/// Result type for repository operations
pub type RepoResult<T> = Result<T, RepoError>;

/// Field validation failure from [`crate::utils::validation`]
pub(crate) fn invalid(err: crate::utils::AppError) -> RepoError {
    RepoError::Validation(err.message)
}

// =============================================================================
// ID Convention: "table:key"
// =============================================================================
//
// 对外统一使用 "table:key" 字符串，内部使用 surrealdb::RecordId：
//   - 解析: parse_record_id("brand", "brand:abc") 或 parse_record_id("brand", "abc")
//   - 获取纯 key: record_key(&id)
//   - 写入时 RecordId 原生序列化，保持 record link

/// Parse `"table:key"` or bare `"key"` into a RecordId of `table`.
///
/// A prefixed id naming another table is rejected.
pub fn parse_record_id(table: &str, raw: &str) -> RepoResult<RecordId> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Err(RepoError::Validation(format!("Empty {table} id")));
    }
    match raw.split_once(':') {
        Some((prefix, key)) if prefix == table => {
            if key.is_empty() {
                return Err(RepoError::Validation(format!("Invalid {table} id: {raw}")));
            }
            Ok(RecordId::from_table_key(table, key))
        }
        Some(_) => Err(RepoError::Validation(format!("Invalid {table} id: {raw}"))),
        None => Ok(RecordId::from_table_key(table, raw)),
    }
}

/// Key part of a record id without the table prefix
pub fn record_key(id: &RecordId) -> String {
    let key = id.key().to_string();
    // 字符串 key 可能被转义为 ⟨...⟩ 或 `...`
    key.trim_start_matches(['⟨', '`'])
        .trim_end_matches(['⟩', '`'])
        .to_string()
}

/// Base repository with database reference
#[derive(Clone)]
pub struct BaseRepository {
    db: Surreal<Db>,
}

impl BaseRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self { db }
    }

    pub fn db(&self) -> &Surreal<Db> {
        &self.db
    }
}
