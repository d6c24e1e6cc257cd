//! 审计日志模块
//!
//! ```text
//! 管理操作
//!   └─ AuditService::log() → mpsc → AuditWorker → SurrealDB (audit_log 表)
//! ```

pub mod service;
pub mod storage;
pub mod types;
pub mod worker;

pub use service::AuditService;
pub use storage::{AuditStorage, AuditStorageError};
pub use types::{AuditAction, AuditEntry};
pub use worker::AuditWorker;
