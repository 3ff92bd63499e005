//! Product API Handlers

use axum::{
    Json,
    extract::{Path, Query, State},
    http::Uri,
};
use serde_json::Value;
use shared::models::{ProductCreate, ProductUpdate, ProductView};
use shared::response::{DeletedProduct, ProductPage};

use crate::api::extract::{ApiJson, parse_id};
use crate::core::ServerState;
use crate::services::ProductQuery;
use crate::utils::{AppError, AppResult};

const INVALID_ID: &str = "Invalid product id";

/// GET /products - 商品列表
///
/// Query: `limit`, `skip`, `categoryId` (repeatable / comma-separated), `q`, `select`
pub async fn list(
    State(state): State<ServerState>,
    uri: Uri,
) -> AppResult<Json<ProductPage<Value>>> {
    let Query(pairs) = Query::<Vec<(String, String)>>::try_from_uri(&uri)
        .map_err(|e| AppError::invalid_request(format!("Invalid query: {e}")))?;
    let query = ProductQuery::from_pairs(&pairs)?;
    Ok(Json(state.listing.list_products(&query).await?))
}

/// GET /products/:id - 获取单个商品
pub async fn get_by_id(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<Json<ProductView>> {
    let id = parse_id(&id, INVALID_ID)?;
    Ok(Json(state.products.get(id).await?))
}

/// POST /products - 创建商品
pub async fn create(
    State(state): State<ServerState>,
    ApiJson(payload): ApiJson<ProductCreate>,
) -> AppResult<Json<ProductView>> {
    Ok(Json(state.products.create(payload).await?))
}

/// PUT /products/:id - 更新商品 (部分字段)
pub async fn update(
    State(state): State<ServerState>,
    Path(id): Path<String>,
    ApiJson(payload): ApiJson<ProductUpdate>,
) -> AppResult<Json<ProductView>> {
    let id = parse_id(&id, INVALID_ID)?;
    Ok(Json(state.products.update(id, payload).await?))
}

/// DELETE /products/:id - 删除商品
pub async fn delete(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<Json<DeletedProduct>> {
    let id = parse_id(&id, INVALID_ID)?;
    Ok(Json(state.products.delete(id).await?))
}
