//! Product listing handlers

use axum::{
    Json,
    extract::{Query, State},
};
use shared::models::{FacetsResponse, ProductListResponse};

use crate::catalog::ProductFilter;
use crate::core::ServerState;
use crate::utils::AppResult;

/// GET /api/products - 商品列表 (含 facets)
pub async fn list(
    State(state): State<ServerState>,
    Query(params): Query<Vec<(String, String)>>,
) -> AppResult<Json<ProductListResponse>> {
    let filter = ProductFilter::from_pairs(&params, state.config.page_limits)?;
    let page = state.facet_engine().compute(filter, true).await?;

    Ok(Json(ProductListResponse {
        products: page.products,
        pagination: page.pagination,
        category_key: page.category_key,
        featured_mode: page.featured_mode,
        featured_spec_keys: page.featured_spec_keys,
        facets: page.facets,
    }))
}

/// GET /api/products/facets - 仅返回 facets 与总数
pub async fn facets(
    State(state): State<ServerState>,
    Query(params): Query<Vec<(String, String)>>,
) -> AppResult<Json<FacetsResponse>> {
    let filter = ProductFilter::from_pairs(&params, state.config.page_limits)?;
    let page = state.facet_engine().compute(filter, false).await?;

    Ok(Json(FacetsResponse {
        total: page.pagination.total,
        category_key: page.category_key,
        featured_mode: page.featured_mode,
        featured_spec_keys: page.featured_spec_keys,
        facets: page.facets,
    }))
}
