//! Ingredient API Handlers

use axum::{
    Json,
    extract::{Path, Query, State},
};

use shared::models::Ingredient;

use crate::core::ServerState;
use crate::db::repository::ingredient;
use crate::utils::{AppError, AppResult, ErrorCode};

#[derive(Debug, serde::Deserialize)]
pub struct IngredientListQuery {
    /// Substring filter on ingredient name
    pub name: Option<String>,
}

/// GET /api/ingredients?name=xxx - 按名称搜索食材 (不分页)
pub async fn list(
    State(state): State<ServerState>,
    Query(query): Query<IngredientListQuery>,
) -> AppResult<Json<Vec<Ingredient>>> {
    let ingredients = match query.name.as_deref() {
        Some(name) if !name.is_empty() => ingredient::search(&state.pool, name).await?,
        _ => ingredient::find_all(&state.pool).await?,
    };
    Ok(Json(ingredients))
}

/// GET /api/ingredients/:id - 获取单个食材
pub async fn get_by_id(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
) -> AppResult<Json<Ingredient>> {
    let item = ingredient::find_by_id(&state.pool, id).await?.ok_or_else(|| {
        AppError::with_message(
            ErrorCode::IngredientNotFound,
            format!("Ingredient {} not found", id),
        )
    })?;
    Ok(Json(item))
}
