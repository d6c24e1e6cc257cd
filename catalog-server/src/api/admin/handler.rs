//! Featured spec admin handlers

use axum::{
    Extension, Json,
    extract::{Path, State},
};
use serde_json::Value;
use shared::models::{AvailableSpecKeys, FeaturedSpecs};

use crate::auth::CurrentUser;
use crate::core::ServerState;
use crate::utils::AppResult;

/// GET /api/admin/categories/{categoryKey}/spec-keys
pub async fn spec_keys(
    State(state): State<ServerState>,
    Path(category_key): Path<String>,
) -> AppResult<Json<AvailableSpecKeys>> {
    let keys = state
        .featured_specs()
        .available_spec_keys(&category_key)
        .await?;
    Ok(Json(keys))
}

/// GET /api/admin/categories/{categoryKey}/featured-specs
pub async fn get_featured(
    State(state): State<ServerState>,
    Path(category_key): Path<String>,
) -> AppResult<Json<FeaturedSpecs>> {
    let featured = state.featured_specs().featured_specs(&category_key).await?;
    Ok(Json(featured))
}

/// PUT /api/admin/categories/{categoryKey}/featured-specs
///
/// 请求体按原始 JSON 接收，由服务层校验 `featuredSpecKeys`
pub async fn update_featured(
    State(state): State<ServerState>,
    Extension(user): Extension<CurrentUser>,
    Path(category_key): Path<String>,
    Json(payload): Json<Value>,
) -> AppResult<Json<FeaturedSpecs>> {
    let featured = state
        .featured_specs()
        .update_featured_specs(&category_key, &payload, Some(&user))
        .await?;
    Ok(Json(featured))
}

/// DELETE /api/admin/categories/{categoryKey}/featured-specs
pub async fn delete_featured(
    State(state): State<ServerState>,
    Extension(user): Extension<CurrentUser>,
    Path(category_key): Path<String>,
) -> AppResult<Json<FeaturedSpecs>> {
    let featured = state
        .featured_specs()
        .delete_featured_specs(&category_key, Some(&user))
        .await?;
    Ok(Json(featured))
}
