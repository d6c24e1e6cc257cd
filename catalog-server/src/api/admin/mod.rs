//! Admin API 模块 - 分类 featured spec 配置
//!
//! | 路径 | 方法 | 说明 |
//! |------|------|------|
//! | /api/admin/categories/{categoryKey}/spec-keys | GET | 分类下可用的 spec key |
//! | /api/admin/categories/{categoryKey}/featured-specs | GET | 读取配置 |
//! | /api/admin/categories/{categoryKey}/featured-specs | PUT | 写入配置 |
//! | /api/admin/categories/{categoryKey}/featured-specs | DELETE | 删除配置 |
//!
//! 中间件顺序 (外 → 内): 限流 → 认证 → 管理员检查

mod handler;

use axum::{Router, middleware, routing::get};

use crate::auth::{rate_limit_admin, require_admin, require_auth};
use crate::core::ServerState;

pub fn router(state: &ServerState) -> Router<ServerState> {
    Router::new().nest("/api/admin/categories", routes()).route_layer(
        tower::ServiceBuilder::new()
            .layer(middleware::from_fn_with_state(
                state.clone(),
                rate_limit_admin,
            ))
            .layer(middleware::from_fn_with_state(state.clone(), require_auth))
            .layer(middleware::from_fn(require_admin)),
    )
}

fn routes() -> Router<ServerState> {
    Router::new()
        .route("/{category_key}/spec-keys", get(handler::spec_keys))
        .route(
            "/{category_key}/featured-specs",
            get(handler::get_featured)
                .put(handler::update_featured)
                .delete(handler::delete_featured),
        )
}
