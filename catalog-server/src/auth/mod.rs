//! 认证授权模块
//!
//! - [`JwtService`] - JWT 令牌服务
//! - [`CurrentUser`] - 当前用户上下文
//! - [`RateLimiter`] - 管理接口限流
//! - [`require_auth`] / [`require_admin`] / [`rate_limit_admin`] - 中间件

pub mod jwt;
pub mod middleware;
pub mod rate_limit;

pub use jwt::{Claims, CurrentUser, JwtConfig, JwtError, JwtService};
pub use middleware::{rate_limit_admin, require_admin, require_auth};
pub use rate_limit::RateLimiter;
