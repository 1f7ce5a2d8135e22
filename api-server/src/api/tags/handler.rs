//! Tag API Handlers

use axum::{
    Json,
    extract::{Path, State},
};

use shared::models::Tag;

use crate::core::ServerState;
use crate::db::repository::tag;
use crate::utils::{AppError, AppResult, ErrorCode};

/// GET /api/tags - 获取所有标签 (不分页)
pub async fn list(State(state): State<ServerState>) -> AppResult<Json<Vec<Tag>>> {
    let tags = tag::find_all(&state.pool).await?;
    Ok(Json(tags))
}

/// GET /api/tags/:id - 获取单个标签
pub async fn get_by_id(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
) -> AppResult<Json<Tag>> {
    let t = tag::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| {
            AppError::with_message(ErrorCode::TagNotFound, format!("Tag {} not found", id))
        })?;
    Ok(Json(t))
}
