//! Category API Handlers

use axum::{
    Json,
    body::Bytes,
    extract::{Path, Query, State},
};
use shared::models::{CategoryCreate, CategoryDelete, CategoryUpdate, CategoryWithCount};
use shared::request::PageParams;
use shared::response::{CategoryPage, DeletedCategory};

use crate::api::extract::{ApiJson, parse_id, parse_optional_id};
use crate::core::ServerState;
use crate::utils::{AppError, AppResult, ErrorCode};

const INVALID_ID: &str = "Invalid category id";

#[derive(Debug, Default, serde::Deserialize)]
pub struct ListQuery {
    limit: Option<String>,
    skip: Option<String>,
}

#[derive(Debug, Default, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeleteQuery {
    transfer_to_category_id: Option<String>,
}

/// GET /categories - 分类列表 (按商品数量降序)
pub async fn list(
    State(state): State<ServerState>,
    Query(query): Query<ListQuery>,
) -> AppResult<Json<CategoryPage>> {
    let page = PageParams::from_raw(query.limit.as_deref(), query.skip.as_deref());
    Ok(Json(state.listing.list_categories(page).await?))
}

/// POST /categories - 创建分类
pub async fn create(
    State(state): State<ServerState>,
    ApiJson(payload): ApiJson<CategoryCreate>,
) -> AppResult<Json<CategoryWithCount>> {
    Ok(Json(state.categories.create(payload).await?))
}

/// PUT /categories/:id - 重命名分类
pub async fn update(
    State(state): State<ServerState>,
    Path(id): Path<String>,
    ApiJson(payload): ApiJson<CategoryUpdate>,
) -> AppResult<Json<CategoryWithCount>> {
    let id = parse_id(&id, INVALID_ID)?;
    Ok(Json(state.categories.update(id, payload).await?))
}

/// DELETE /categories/:id - 删除分类
///
/// The transfer target is read from `?transferToCategoryId=` or, when
/// absent there, from an optional JSON body.
pub async fn delete(
    State(state): State<ServerState>,
    Path(id): Path<String>,
    Query(query): Query<DeleteQuery>,
    body: Bytes,
) -> AppResult<Json<DeletedCategory>> {
    let id = parse_id(&id, INVALID_ID)?;

    let mut options = CategoryDelete {
        transfer_to_category_id: parse_optional_id(
            query.transfer_to_category_id.as_deref(),
            "Invalid transferToCategoryId",
        )?,
    };
    if options.transfer_to_category_id.is_none() && !body.iter().all(u8::is_ascii_whitespace) {
        // `null` counts as no body
        let parsed: Option<CategoryDelete> = serde_json::from_slice(&body).map_err(|e| {
            AppError::with_message(ErrorCode::InvalidFormat, format!("Invalid JSON body: {e}"))
        })?;
        options = parsed.unwrap_or_default();
    }

    Ok(Json(state.categories.delete(id, options).await?))
}
