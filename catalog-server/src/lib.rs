//! Catalog Server - 商品目录 facet 服务
//!
//! # 架构概述
//!
//! - **数据库** (`db`): 嵌入式 SurrealDB 存储 (商品、分类、品牌、featured spec 配置)
//! - **目录** (`catalog`): 过滤解析、match stage、facet 聚合、featured gate
//! - **认证** (`auth`): JWT 管理员认证与限流
//! - **审计** (`audit`): featured spec 变更记录
//! - **HTTP API** (`api`): 公共列表接口与管理接口
//!
//! # 模块结构
//!
//! ```text
//! catalog-server/src/
//! ├── core/          # 配置、状态、服务器
//! ├── catalog/       # facet 引擎
//! ├── services/      # featured spec 配置服务
//! ├── auth/          # JWT、限流
//! ├── audit/         # 审计日志
//! ├── api/           # HTTP 处理器
//! ├── routes/        # 路由组装与中间件
//! ├── utils/         # 错误、日志、校验
//! └── db/            # 数据库层
//! ```

pub mod api;
pub mod audit;
pub mod auth;
pub mod catalog;
pub mod core;
pub mod db;
pub mod routes;
pub mod services;
pub mod utils;

// Re-export 公共类型
pub use auth::{CurrentUser, JwtService};
pub use catalog::{CatalogPage, FacetEngine, ProductFilter};
pub use core::{Config, Server, ServerState};
pub use services::FeaturedSpecsService;
pub use utils::{AppError, AppResult};

// Re-export unified error types from shared
pub use utils::{ApiResponse, ErrorCategory, ErrorCode};

// Re-export logger functions
pub use utils::logger::{init_logger, init_logger_with_file};

// Security logging macro - 支持 tracing 格式说明符
#[macro_export]
macro_rules! security_log {
    ($level:expr, $event:expr, $($key:ident = $value:expr),*) => {
        tracing::info!(
            target: "security",
            level = $level,
            event = $event,
            $($key = $value),*
        );
    };
}

/// 准备运行环境: 工作目录与日志
pub fn setup_environment(config: &Config) -> std::io::Result<()> {
    config.ensure_work_dir_structure()?;
    let logs_dir = config.logs_dir();
    let json = config.log_json || config.is_production();
    init_logger_with_file(Some(&config.log_level), json, Some(&logs_dir));
    Ok(())
}

pub fn print_banner() {
    println!(
        r#"
   ______      __        __
  / ____/___ _/ /_____ _/ /___  ____ _
 / /   / __ `/ __/ __ `/ / __ \/ __ `/
/ /___/ /_/ / /_/ /_/ / / /_/ / /_/ /
\____/\__,_/\__/\__,_/_/\____/\__, /
                             /____/
    "#
    );
}
