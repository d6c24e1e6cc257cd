//! 审计日志服务
//!
//! `AuditService::log()` 通过 mpsc 通道把请求交给 [`AuditWorker`]，
//! 请求处理不等待写库完成。

use std::sync::Arc;

use surrealdb::Surreal;
use surrealdb::engine::local::Db;
use tokio::sync::mpsc;

use super::storage::AuditStorage;
use super::types::{AuditAction, AuditEntry};
use super::worker::AuditWorker;
use crate::auth::CurrentUser;

/// 通道容量
const BUFFER_SIZE: usize = 256;

/// 审计日志服务
pub struct AuditService {
    storage: AuditStorage,
    tx: mpsc::Sender<AuditEntry>,
}

impl std::fmt::Debug for AuditService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuditService").finish_non_exhaustive()
    }
}

impl AuditService {
    /// 创建审计服务并返回通道接收端 (交给 [`AuditWorker`])
    pub fn new(db: Surreal<Db>) -> (Arc<Self>, mpsc::Receiver<AuditEntry>) {
        let (tx, rx) = mpsc::channel(BUFFER_SIZE);
        let storage = AuditStorage::new(db);
        (Arc::new(Self { storage, tx }), rx)
    }

    /// 创建服务并在当前 tokio 运行时启动后台 worker
    pub fn start(db: Surreal<Db>) -> Arc<Self> {
        let (service, rx) = Self::new(db);
        let worker = AuditWorker::new(service.storage.clone());
        tokio::spawn(worker.run(rx));
        service
    }

    /// 异步记录审计日志
    ///
    /// 通道满时等待，不丢弃条目。
    pub async fn log(
        &self,
        action: AuditAction,
        resource_type: impl Into<String>,
        resource_id: impl Into<String>,
        operator: Option<&CurrentUser>,
        details: serde_json::Value,
    ) {
        let entry = AuditEntry {
            timestamp: shared::util::now_millis(),
            action,
            resource_type: resource_type.into(),
            resource_id: resource_id.into(),
            operator_id: operator.map(|u| u.id.clone()),
            operator_name: operator.map(|u| u.username.clone()),
            details,
        };

        if self.tx.send(entry).await.is_err() {
            tracing::error!("Audit log channel closed, audit entry lost!");
        }
    }

    /// 获取存储引用
    pub fn storage(&self) -> &AuditStorage {
        &self.storage
    }
}
