use std::path::PathBuf;
use std::str::FromStr;

use crate::auth::JwtConfig;

/// 未能解析的 brand / category 过滤条件的处理策略
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum UnresolvedFilterPolicy {
    /// 过滤条件全部无法解析时，结果为空
    #[default]
    MatchNone,
    /// 忽略无法解析的过滤条件 (不施加约束)
    Ignore,
}

impl FromStr for UnresolvedFilterPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "match_none" => Ok(Self::MatchNone),
            "ignore" => Ok(Self::Ignore),
            other => Err(format!("unknown filter policy '{other}'")),
        }
    }
}

/// 分页限制
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageLimits {
    pub default_limit: u32,
    pub max_limit: u32,
}

impl Default for PageLimits {
    fn default() -> Self {
        Self {
            default_limit: 20,
            max_limit: 100,
        }
    }
}

/// 服务器配置
///
/// # 环境变量
///
/// | 环境变量 | 默认值 | 说明 |
/// |----------|--------|------|
/// | WORK_DIR | ./data | 工作目录 (数据库、日志) |
/// | HTTP_PORT | 3000 | HTTP 服务端口 |
/// | ENVIRONMENT | development | 运行环境 |
/// | LOG_LEVEL | info | 日志级别 |
/// | LOG_JSON | false | JSON 日志输出 |
/// | DB_NAMESPACE | storefront | SurrealDB namespace |
/// | DB_NAME | catalog | SurrealDB database |
/// | DEFAULT_PAGE_SIZE | 20 | 默认每页数量 |
/// | MAX_PAGE_SIZE | 100 | 每页数量上限 |
/// | UNRESOLVED_FILTER_POLICY | match_none | match_none / ignore |
/// | ADMIN_RATE_LIMIT | 60 | 管理接口每窗口请求数 |
/// | ADMIN_RATE_WINDOW_SECS | 60 | 限流窗口 (秒) |
///
/// JWT 相关变量见 [`JwtConfig`]。
///
/// # 示例
///
/// ```ignore
/// WORK_DIR=/srv/catalog HTTP_PORT=8080 cargo run
/// ```
#[derive(Debug, Clone)]
pub struct Config {
    /// 工作目录，存储数据库、日志等文件
    pub work_dir: String,
    /// HTTP API 服务端口
    pub http_port: u16,
    /// JWT 认证配置
    pub jwt: JwtConfig,
    /// 运行环境: development | staging | production
    pub environment: String,
    pub log_level: String,
    pub log_json: bool,
    pub db_namespace: String,
    pub db_name: String,
    pub page_limits: PageLimits,
    pub unresolved_filter_policy: UnresolvedFilterPolicy,
    /// 管理接口限流: 每窗口请求数
    pub admin_rate_limit: u32,
    /// 管理接口限流: 窗口长度 (秒)
    pub admin_rate_window_secs: u64,
}

fn env_or<T: FromStr>(key: &str, default: T) -> T {
    std::env::var(key)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}

impl Config {
    /// 从环境变量加载配置
    ///
    /// 如果环境变量未设置或无法解析，使用默认值
    pub fn from_env() -> Self {
        let default_limit = env_or("DEFAULT_PAGE_SIZE", 20u32).max(1);
        let max_limit = env_or("MAX_PAGE_SIZE", 100u32).max(default_limit);

        let unresolved_filter_policy = match std::env::var("UNRESOLVED_FILTER_POLICY") {
            Ok(raw) => raw.parse().unwrap_or_else(|e| {
                tracing::warn!("{e}, falling back to match_none");
                UnresolvedFilterPolicy::MatchNone
            }),
            Err(_) => UnresolvedFilterPolicy::default(),
        };

        Self {
            work_dir: std::env::var("WORK_DIR").unwrap_or_else(|_| "./data".into()),
            http_port: env_or("HTTP_PORT", 3000),
            jwt: JwtConfig::default(),
            environment: std::env::var("ENVIRONMENT").unwrap_or_else(|_| "development".into()),
            log_level: std::env::var("LOG_LEVEL").unwrap_or_else(|_| "info".into()),
            log_json: env_or("LOG_JSON", false),
            db_namespace: std::env::var("DB_NAMESPACE").unwrap_or_else(|_| "storefront".into()),
            db_name: std::env::var("DB_NAME").unwrap_or_else(|_| "catalog".into()),
            page_limits: PageLimits {
                default_limit,
                max_limit,
            },
            unresolved_filter_policy,
            admin_rate_limit: env_or("ADMIN_RATE_LIMIT", 60u32).max(1),
            admin_rate_window_secs: env_or("ADMIN_RATE_WINDOW_SECS", 60u64).max(1),
        }
    }

    /// 使用自定义值覆盖部分配置
    ///
    /// 常用于测试场景
    pub fn with_overrides(work_dir: impl Into<String>, http_port: u16) -> Self {
        let mut config = Self::from_env();
        config.work_dir = work_dir.into();
        config.http_port = http_port;
        config
    }

    /// 是否生产环境
    pub fn is_production(&self) -> bool {
        self.environment == "production"
    }

    /// 数据库目录
    pub fn database_dir(&self) -> PathBuf {
        PathBuf::from(&self.work_dir).join("database")
    }

    /// 日志目录
    pub fn logs_dir(&self) -> PathBuf {
        PathBuf::from(&self.work_dir).join("logs")
    }

    /// 确保工作目录结构存在
    pub fn ensure_work_dir_structure(&self) -> std::io::Result<()> {
        std::fs::create_dir_all(self.database_dir())?;
        std::fs::create_dir_all(self.logs_dir())?;
        Ok(())
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::from_env()
    }
}
