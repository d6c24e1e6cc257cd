//! Database Module
//!
//! Embedded SurrealDB (RocksDB engine) connection and schema definitions.

pub mod models;
pub mod repository;

use crate::utils::AppError;
use surrealdb::Surreal;
use surrealdb::engine::local::{Db, RocksDb};

/// 表与索引定义 (幂等，启动时执行)
///
/// product / audit_log 表不建普通索引: 嵌入式引擎在 索引 + WHERE + ORDER BY + LIMIT
/// 组合下会漏掉首条记录，列表分页依赖这一组合。
const SCHEMA: &str = r#"
DEFINE TABLE IF NOT EXISTS category SCHEMALESS;
DEFINE INDEX IF NOT EXISTS category_slug ON category FIELDS slug UNIQUE;

DEFINE TABLE IF NOT EXISTS brand SCHEMALESS;
DEFINE INDEX IF NOT EXISTS brand_slug ON brand FIELDS slug UNIQUE;

DEFINE TABLE IF NOT EXISTS product SCHEMALESS;

DEFINE TABLE IF NOT EXISTS category_featured_specs SCHEMALESS;
DEFINE INDEX IF NOT EXISTS featured_specs_category_key ON category_featured_specs FIELDS category_key UNIQUE;

DEFINE TABLE IF NOT EXISTS audit_log SCHEMALESS;
"#;

/// Database service - owns the embedded SurrealDB handle
#[derive(Clone)]
pub struct DbService {
    pub db: Surreal<Db>,
}

impl DbService {
    /// Open (or create) the database at `db_path` and apply the schema
    pub async fn new(db_path: &str, namespace: &str, database: &str) -> Result<Self, AppError> {
        let db = Surreal::new::<RocksDb>(db_path)
            .await
            .map_err(|e| AppError::database(format!("Failed to open database: {e}")))?;

        db.use_ns(namespace)
            .use_db(database)
            .await
            .map_err(|e| AppError::database(format!("Failed to select namespace: {e}")))?;

        tracing::info!(path = %db_path, namespace, database, "Database connection established");

        apply_schema(&db).await?;
        tracing::info!("Database schema applied");

        Ok(Self { db })
    }
}

/// Apply table / index definitions
pub async fn apply_schema(db: &Surreal<Db>) -> Result<(), AppError> {
    db.query(SCHEMA)
        .await
        .and_then(|response| response.check())
        .map_err(|e| AppError::database(format!("Failed to apply schema: {e}")))?;
    Ok(())
}
