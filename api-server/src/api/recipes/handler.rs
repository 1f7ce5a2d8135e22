//! Recipe API Handlers

use std::collections::HashSet;

use axum::{
    Json,
    extract::{Path, Query, State},
    http::{StatusCode, header},
    response::{IntoResponse, Response},
};

use shared::PaginatedResponse;
use shared::models::{
    CartIngredient, IngredientAmount, Recipe, RecipeCreate, RecipeRead, RecipeSummary,
    RecipeUpdate,
};

use crate::api::convert;
use crate::api::pagination::PageQuery;
use crate::auth::{CurrentUser, MaybeUser};
use crate::core::ServerState;
use crate::db::repository::recipe::RecipeQuery;
use crate::db::repository::{favorite, recipe, shopping_list};
use crate::services::image_store;
use crate::utils::validation::{
    MAX_NAME_LEN, MAX_TEXT_LEN, validate_optional_text, validate_required_text,
};
use crate::utils::{AppError, AppResult, ErrorCode};

/// 菜谱列表默认每页数量 (按 id 降序，新菜谱在前)
const PAGE_SIZE: u32 = 6;

const EXPORT_FILENAME: &str = "ingredients.txt";

// ── Payload validation ──────────────────────────────────────────────

fn validate_cooking_time(value: i64) -> AppResult<()> {
    if value < 1 {
        return Err(AppError::new(ErrorCode::InvalidCookingTime));
    }
    Ok(())
}

fn validate_tag_ids(tags: &[i64]) -> AppResult<()> {
    if tags.is_empty() {
        return Err(AppError::new(ErrorCode::EmptyTagList));
    }
    let mut seen = HashSet::new();
    for id in tags {
        if !seen.insert(*id) {
            return Err(AppError::new(ErrorCode::DuplicateTag).with_detail("tag", *id));
        }
    }
    Ok(())
}

fn validate_ingredient_entries(entries: &[IngredientAmount]) -> AppResult<()> {
    if entries.is_empty() {
        return Err(AppError::new(ErrorCode::EmptyIngredientList));
    }
    let mut seen = HashSet::new();
    for entry in entries {
        if !seen.insert(entry.id) {
            return Err(
                AppError::new(ErrorCode::DuplicateIngredient).with_detail("ingredient", entry.id)
            );
        }
        if entry.amount < 1 {
            return Err(AppError::new(ErrorCode::InvalidIngredientAmount)
                .with_detail("ingredient", entry.id));
        }
    }
    Ok(())
}

// ── Listing filters ─────────────────────────────────────────────────

/// Parsed listing parameters
///
/// `tags` is repeatable (`?tags=breakfast&tags=lunch`), so the raw query
/// pairs are parsed by hand instead of through a derive struct.
#[derive(Debug, Default)]
struct RecipeListParams {
    page: PageQuery,
    author: Option<i64>,
    tags: Vec<String>,
    is_favorited: bool,
    is_in_shopping_cart: bool,
}

fn parse_bool_param(value: &str) -> bool {
    matches!(value.to_ascii_lowercase().as_str(), "1" | "true" | "yes")
}

impl RecipeListParams {
    fn from_pairs(pairs: &[(String, String)]) -> AppResult<Self> {
        let mut params = Self::default();
        for (key, value) in pairs {
            match key.as_str() {
                "page" => {
                    params.page.page = Some(
                        value
                            .parse()
                            .map_err(|_| AppError::validation("page must be a positive number"))?,
                    );
                }
                "limit" => {
                    params.page.limit = Some(
                        value
                            .parse()
                            .map_err(|_| AppError::validation("limit must be a positive number"))?,
                    );
                }
                "author" => {
                    params.author = Some(
                        value
                            .parse()
                            .map_err(|_| AppError::validation("author must be a user id"))?,
                    );
                }
                "tags" => params.tags.push(value.clone()),
                "is_favorited" => params.is_favorited = parse_bool_param(value),
                "is_in_shopping_cart" => params.is_in_shopping_cart = parse_bool_param(value),
                // Unknown parameters are ignored, matching common REST behavior
                _ => {}
            }
        }
        Ok(params)
    }

    /// Resolve to repository filters for the given viewer
    ///
    /// The `is_favorited` / `is_in_shopping_cart` filters are no-ops for
    /// anonymous callers and for `false` values.
    fn into_query(self, viewer: Option<i64>) -> RecipeQuery {
        RecipeQuery {
            author: self.author,
            tag_slugs: self.tags,
            favorited_by: viewer.filter(|_| self.is_favorited),
            in_cart_of: viewer.filter(|_| self.is_in_shopping_cart),
        }
    }
}

// ── Recipe CRUD ─────────────────────────────────────────────────────

/// GET /api/recipes - 菜谱列表 (分页 + 过滤)
pub async fn list(
    State(state): State<ServerState>,
    viewer: MaybeUser,
    Query(pairs): Query<Vec<(String, String)>>,
) -> AppResult<Json<PaginatedResponse<RecipeRead>>> {
    let params = RecipeListParams::from_pairs(&pairs)?;
    let (page, limit) = params.page.resolve(PAGE_SIZE);
    let offset = PageQuery::offset(page, limit);

    let query = params.into_query(viewer.id());
    let total = recipe::count(&state.pool, &query).await?;
    let rows = recipe::find_all(&state.pool, &query, limit as i64, offset).await?;

    let mut recipes = Vec::with_capacity(rows.len());
    for row in &rows {
        recipes.push(convert::recipe_read(&state.pool, row, viewer.id()).await?);
    }

    Ok(Json(PaginatedResponse::new(
        recipes,
        total as u64,
        page,
        limit,
    )))
}

/// POST /api/recipes - 创建菜谱
pub async fn create(
    State(state): State<ServerState>,
    user: CurrentUser,
    Json(payload): Json<RecipeCreate>,
) -> AppResult<(StatusCode, Json<RecipeRead>)> {
    validate_required_text(&payload.name, "name", MAX_NAME_LEN)?;
    validate_required_text(&payload.text, "text", MAX_TEXT_LEN)?;
    validate_cooking_time(payload.cooking_time)?;
    validate_tag_ids(&payload.tags)?;
    validate_ingredient_entries(&payload.ingredients)?;

    let image_path = image_store::store_base64_image(&state.media_dir(), &payload.image)?;

    let created = recipe::create(&state.pool, user.id, &image_path, &payload).await?;

    tracing::info!(recipe_id = %created.id, author_id = %user.id, "Recipe created");

    let body = convert::recipe_read(&state.pool, &created, Some(user.id)).await?;
    Ok((StatusCode::CREATED, Json(body)))
}

/// GET /api/recipes/:id - 菜谱详情
pub async fn get_by_id(
    State(state): State<ServerState>,
    viewer: MaybeUser,
    Path(id): Path<i64>,
) -> AppResult<Json<RecipeRead>> {
    let row = find_recipe(&state, id).await?;
    Ok(Json(convert::recipe_read(&state.pool, &row, viewer.id()).await?))
}

/// PATCH /api/recipes/:id - 更新菜谱 (仅作者)
///
/// 标签和食材集合整体替换；图片缺省时保留原图。
pub async fn update(
    State(state): State<ServerState>,
    user: CurrentUser,
    Path(id): Path<i64>,
    Json(payload): Json<RecipeUpdate>,
) -> AppResult<Json<RecipeRead>> {
    let existing = find_recipe(&state, id).await?;
    require_author(&existing, &user)?;

    validate_optional_text(&payload.name, "name", MAX_NAME_LEN)?;
    validate_optional_text(&payload.text, "text", MAX_TEXT_LEN)?;
    if let Some(cooking_time) = payload.cooking_time {
        validate_cooking_time(cooking_time)?;
    }
    validate_tag_ids(&payload.tags)?;
    validate_ingredient_entries(&payload.ingredients)?;

    let image_path = match payload.image.as_deref() {
        Some(data) => Some(image_store::store_base64_image(&state.media_dir(), data)?),
        None => None,
    };

    let updated = recipe::update(&state.pool, id, image_path.as_deref(), &payload).await?;

    tracing::info!(recipe_id = %id, author_id = %user.id, "Recipe updated");

    Ok(Json(
        convert::recipe_read(&state.pool, &updated, Some(user.id)).await?,
    ))
}

/// DELETE /api/recipes/:id - 删除菜谱 (仅作者)
pub async fn delete(
    State(state): State<ServerState>,
    user: CurrentUser,
    Path(id): Path<i64>,
) -> AppResult<StatusCode> {
    let existing = find_recipe(&state, id).await?;
    require_author(&existing, &user)?;

    recipe::delete(&state.pool, id).await?;

    tracing::info!(recipe_id = %id, author_id = %user.id, "Recipe deleted");

    Ok(StatusCode::NO_CONTENT)
}

async fn find_recipe(state: &ServerState, id: i64) -> AppResult<Recipe> {
    recipe::find_by_id(&state.pool, id).await?.ok_or_else(|| {
        AppError::with_message(ErrorCode::RecipeNotFound, format!("Recipe {} not found", id))
    })
}

fn require_author(recipe: &Recipe, user: &CurrentUser) -> AppResult<()> {
    if recipe.author_id != user.id {
        return Err(AppError::new(ErrorCode::NotRecipeAuthor));
    }
    Ok(())
}

fn summary_of(recipe: &Recipe) -> RecipeSummary {
    RecipeSummary {
        id: recipe.id,
        name: recipe.name.clone(),
        image: image_store::media_url(&recipe.image),
        cooking_time: recipe.cooking_time,
    }
}

// ── Favorite / shopping-cart actions ────────────────────────────────

/// POST /api/recipes/:id/favorite - 收藏菜谱
pub async fn favorite_add(
    State(state): State<ServerState>,
    user: CurrentUser,
    Path(id): Path<i64>,
) -> AppResult<(StatusCode, Json<RecipeSummary>)> {
    let row = find_recipe(&state, id).await?;

    if favorite::exists(&state.pool, user.id, row.id).await? {
        return Err(AppError::new(ErrorCode::AlreadyFavorited));
    }
    favorite::create(&state.pool, user.id, row.id).await?;

    Ok((StatusCode::CREATED, Json(summary_of(&row))))
}

/// DELETE /api/recipes/:id/favorite - 取消收藏
pub async fn favorite_remove(
    State(state): State<ServerState>,
    user: CurrentUser,
    Path(id): Path<i64>,
) -> AppResult<StatusCode> {
    let row = find_recipe(&state, id).await?;

    if !favorite::exists(&state.pool, user.id, row.id).await? {
        return Err(AppError::new(ErrorCode::NotFavorited));
    }
    favorite::delete(&state.pool, user.id, row.id).await?;

    Ok(StatusCode::NO_CONTENT)
}

/// POST /api/recipes/:id/shopping_cart - 加入购物车
pub async fn cart_add(
    State(state): State<ServerState>,
    user: CurrentUser,
    Path(id): Path<i64>,
) -> AppResult<(StatusCode, Json<RecipeSummary>)> {
    let row = find_recipe(&state, id).await?;

    if shopping_list::exists(&state.pool, user.id, row.id).await? {
        return Err(AppError::new(ErrorCode::AlreadyInCart));
    }
    shopping_list::create(&state.pool, user.id, row.id).await?;

    Ok((StatusCode::CREATED, Json(summary_of(&row))))
}

/// DELETE /api/recipes/:id/shopping_cart - 移出购物车
pub async fn cart_remove(
    State(state): State<ServerState>,
    user: CurrentUser,
    Path(id): Path<i64>,
) -> AppResult<StatusCode> {
    let row = find_recipe(&state, id).await?;

    if !shopping_list::exists(&state.pool, user.id, row.id).await? {
        return Err(AppError::new(ErrorCode::NotInCart));
    }
    shopping_list::delete(&state.pool, user.id, row.id).await?;

    Ok(StatusCode::NO_CONTENT)
}

// ── Shopping-cart export ────────────────────────────────────────────

/// Render the aggregated cart as a plain-text table
fn render_shopping_list(items: &[CartIngredient]) -> String {
    let mut out = String::from("Ingredient | Amount | Unit\n\n");
    out.push_str("________________________________________________");
    for item in items {
        out.push_str(&format!(
            "\n{} | {} | {}\n",
            item.name, item.total_amount, item.measurement_unit
        ));
    }
    out
}

/// GET /api/recipes/download_shopping_cart - 导出购物清单
///
/// Empty carts are a client error; otherwise the summed ingredient table
/// is served as a `text/plain` attachment.
pub async fn download_shopping_cart(
    State(state): State<ServerState>,
    user: CurrentUser,
) -> AppResult<Response> {
    if shopping_list::count_for_user(&state.pool, user.id).await? == 0 {
        return Err(AppError::new(ErrorCode::CartEmpty));
    }

    let items = shopping_list::cart_ingredients(&state.pool, user.id).await?;
    let body = render_shopping_list(&items);

    Ok((
        [
            (header::CONTENT_TYPE, "text/plain; charset=utf-8".to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename={EXPORT_FILENAME}"),
            ),
        ],
        body,
    )
        .into_response())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pairs(items: &[(&str, &str)]) -> Vec<(String, String)> {
        items
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_list_params_repeated_tags() {
        let params = RecipeListParams::from_pairs(&pairs(&[
            ("tags", "breakfast"),
            ("tags", "lunch"),
            ("page", "2"),
        ]))
        .unwrap();

        assert_eq!(params.tags, vec!["breakfast", "lunch"]);
        assert_eq!(params.page.page, Some(2));
        assert!(!params.is_favorited);
    }

    #[test]
    fn test_list_params_bool_flags() {
        let params = RecipeListParams::from_pairs(&pairs(&[
            ("is_favorited", "1"),
            ("is_in_shopping_cart", "false"),
        ]))
        .unwrap();

        assert!(params.is_favorited);
        assert!(!params.is_in_shopping_cart);
    }

    #[test]
    fn test_list_params_bad_author() {
        assert!(RecipeListParams::from_pairs(&pairs(&[("author", "abc")])).is_err());
    }

    #[test]
    fn test_flag_filters_are_noop_for_anonymous() {
        let params = RecipeListParams::from_pairs(&pairs(&[("is_favorited", "true")])).unwrap();
        let query = params.into_query(None);
        assert_eq!(query.favorited_by, None);

        let params = RecipeListParams::from_pairs(&pairs(&[("is_favorited", "true")])).unwrap();
        let query = params.into_query(Some(7));
        assert_eq!(query.favorited_by, Some(7));
    }

    #[test]
    fn test_validate_tag_ids() {
        assert_eq!(
            validate_tag_ids(&[]).unwrap_err().code,
            ErrorCode::EmptyTagList
        );
        assert_eq!(
            validate_tag_ids(&[1, 2, 1]).unwrap_err().code,
            ErrorCode::DuplicateTag
        );
        assert!(validate_tag_ids(&[1, 2, 3]).is_ok());
    }

    #[test]
    fn test_validate_ingredient_entries() {
        let entry = |id, amount| IngredientAmount { id, amount };

        assert_eq!(
            validate_ingredient_entries(&[]).unwrap_err().code,
            ErrorCode::EmptyIngredientList
        );
        assert_eq!(
            validate_ingredient_entries(&[entry(1, 10), entry(1, 5)])
                .unwrap_err()
                .code,
            ErrorCode::DuplicateIngredient
        );
        assert_eq!(
            validate_ingredient_entries(&[entry(1, 0)]).unwrap_err().code,
            ErrorCode::InvalidIngredientAmount
        );
        assert!(validate_ingredient_entries(&[entry(1, 10), entry(2, 1)]).is_ok());
    }

    #[test]
    fn test_render_shopping_list() {
        let items = vec![
            CartIngredient {
                name: "flour".into(),
                measurement_unit: "g".into(),
                total_amount: 350,
            },
            CartIngredient {
                name: "milk".into(),
                measurement_unit: "ml".into(),
                total_amount: 200,
            },
        ];

        let text = render_shopping_list(&items);
        assert!(text.starts_with("Ingredient | Amount | Unit\n\n"));
        assert!(text.contains("flour | 350 | g"));
        assert!(text.contains("milk | 200 | ml"));
    }
}
