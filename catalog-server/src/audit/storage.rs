//! 审计日志 SurrealDB 存储层
//!
//! Append-only，没有任何删除/更新接口。

use surrealdb::Surreal;
use surrealdb::engine::local::Db;
use thiserror::Error;

use super::types::AuditEntry;

const TABLE: &str = "audit_log";

/// 存储错误
#[derive(Debug, Error)]
pub enum AuditStorageError {
    #[error("Database error: {0}")]
    Database(String),
}

impl From<surrealdb::Error> for AuditStorageError {
    fn from(err: surrealdb::Error) -> Self {
        AuditStorageError::Database(err.to_string())
    }
}

pub type AuditStorageResult<T> = Result<T, AuditStorageError>;

#[derive(Clone)]
pub struct AuditStorage {
    db: Surreal<Db>,
}

impl AuditStorage {
    pub fn new(db: Surreal<Db>) -> Self {
        Self { db }
    }

    /// 追加一条记录
    pub async fn append(&self, entry: AuditEntry) -> AuditStorageResult<AuditEntry> {
        let created: Option<AuditEntry> = self.db.create(TABLE).content(entry).await?;
        created.ok_or_else(|| AuditStorageError::Database("Failed to append audit entry".into()))
    }

    /// 最近的记录 (时间倒序)
    pub async fn query_recent(&self, limit: u32) -> AuditStorageResult<Vec<AuditEntry>> {
        let entries: Vec<AuditEntry> = self
            .db
            .query("SELECT * FROM audit_log ORDER BY timestamp DESC LIMIT $limit")
            .bind(("limit", limit))
            .await?
            .take(0)?;
        Ok(entries)
    }
}
