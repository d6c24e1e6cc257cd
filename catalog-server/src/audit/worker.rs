//! 审计日志后台 Worker
//!
//! 从 mpsc 通道消费 AuditEntry，写入 SurrealDB。通道关闭时退出。

use tokio::sync::mpsc;

use super::storage::AuditStorage;
use super::types::AuditEntry;

pub struct AuditWorker {
    storage: AuditStorage,
}

impl AuditWorker {
    pub fn new(storage: AuditStorage) -> Self {
        Self { storage }
    }

    /// 运行 worker (直到通道关闭)
    pub async fn run(self, mut rx: mpsc::Receiver<AuditEntry>) {
        tracing::info!("Audit log worker started");

        while let Some(entry) = rx.recv().await {
            tracing::info!(
                target: "audit",
                action = %entry.action,
                resource_type = %entry.resource_type,
                resource_id = %entry.resource_id,
                operator = ?entry.operator_name,
                "Audit entry"
            );
            if let Err(e) = self.storage.append(entry).await {
                tracing::error!("Failed to write audit entry: {:?}", e);
            }
        }

        tracing::info!("Audit log channel closed, worker stopping");
    }
}
