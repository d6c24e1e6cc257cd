use std::sync::Arc;
use std::time::Duration;

use surrealdb::Surreal;
use surrealdb::engine::local::Db;

use crate::audit::AuditService;
use crate::auth::{JwtService, RateLimiter};
use crate::catalog::FacetEngine;
use crate::core::Config;
use crate::db::DbService;
use crate::services::FeaturedSpecsService;
use crate::utils::{AppError, AppResult};

/// 服务器状态 - 持有所有服务的共享引用
///
/// 使用 Arc 实现浅拷贝，每个请求 clone 一次成本极低。
///
/// | 字段 | 类型 | 说明 |
/// |------|------|------|
/// | config | Config | 配置项 (不可变) |
/// | db | Surreal<Db> | 嵌入式数据库 |
/// | jwt_service | Arc<JwtService> | JWT 认证服务 |
/// | rate_limiter | Arc<RateLimiter> | 管理接口限流 |
/// | audit | Arc<AuditService> | 审计日志 |
#[derive(Clone)]
pub struct ServerState {
    /// 服务器配置
    pub config: Config,
    /// 嵌入式数据库 (SurrealDB)
    pub db: Surreal<Db>,
    /// JWT 认证服务
    pub jwt_service: Arc<JwtService>,
    /// 管理接口限流器 (进程内共享)
    pub rate_limiter: Arc<RateLimiter>,
    /// 审计日志服务
    pub audit: Arc<AuditService>,
}

impl ServerState {
    /// 在已打开的数据库上组装状态，并启动审计 worker
    ///
    /// 需要在 tokio 运行时内调用
    pub fn new(config: Config, db: Surreal<Db>) -> Self {
        let jwt_service = Arc::new(JwtService::with_config(config.jwt.clone()));
        let rate_limiter = Arc::new(RateLimiter::new(
            config.admin_rate_limit,
            Duration::from_secs(config.admin_rate_window_secs),
        ));
        let audit = AuditService::start(db.clone());

        Self {
            config,
            db,
            jwt_service,
            rate_limiter,
            audit,
        }
    }

    /// 初始化服务器状态
    ///
    /// 1. 工作目录结构
    /// 2. 数据库 (work_dir/database/catalog.db)
    /// 3. 各服务 (JWT, 限流, 审计)
    pub async fn initialize(config: &Config) -> AppResult<Self> {
        config.ensure_work_dir_structure().map_err(|e| {
            AppError::with_message(
                crate::utils::ErrorCode::ConfigError,
                format!("Failed to create work directory structure: {e}"),
            )
        })?;

        let db_path = config.database_dir().join("catalog.db");
        let db_service = DbService::new(
            &db_path.to_string_lossy(),
            &config.db_namespace,
            &config.db_name,
        )
        .await?;

        Ok(Self::new(config.clone(), db_service.db))
    }

    /// Facet 引擎 (按请求创建)
    pub fn facet_engine(&self) -> FacetEngine {
        FacetEngine::new(self.db.clone(), self.config.unresolved_filter_policy)
    }

    /// Featured spec 配置服务 (按请求创建)
    pub fn featured_specs(&self) -> FeaturedSpecsService {
        FeaturedSpecsService::new(self.db.clone(), self.audit.clone())
    }
}
