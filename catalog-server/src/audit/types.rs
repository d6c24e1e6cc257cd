//! 审计日志类型定义

use serde::{Deserialize, Serialize};
use std::fmt;

/// 审计操作类型 (枚举，非自由文本)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AuditAction {
    /// 分类 featured spec 配置写入
    FeaturedSpecsUpdated,
    /// 分类 featured spec 配置删除 (回到 default_all)
    FeaturedSpecsDeleted,
}

impl AuditAction {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::FeaturedSpecsUpdated => "featured_specs_updated",
            Self::FeaturedSpecsDeleted => "featured_specs_deleted",
        }
    }
}

impl fmt::Display for AuditAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// 审计日志条目 (`audit_log` 表，append-only)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuditEntry {
    /// Unix 毫秒
    pub timestamp: i64,
    pub action: AuditAction,
    pub resource_type: String,
    pub resource_id: String,
    pub operator_id: Option<String>,
    pub operator_name: Option<String>,
    pub details: serde_json::Value,
}
