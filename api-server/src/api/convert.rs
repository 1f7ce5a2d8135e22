//! API 表示转换
//!
//! Assembles the nested read representations from row types: resolved
//! ingredient lines, full tag objects, media URLs, and the per-viewer
//! booleans (`is_subscribed`, `is_favorited`, `is_in_shopping_cart`).
//! All viewer flags are false for anonymous callers.

use sqlx::SqlitePool;

use shared::models::{Recipe, RecipeRead, SubscriptionRead, User, UserRead};

use crate::db::repository::{favorite, recipe, shopping_list, subscription, tag, user};
use crate::services::image_store;
use crate::utils::{AppError, AppResult};

/// Public profile with `is_subscribed` computed against the viewer
pub async fn user_read(
    pool: &SqlitePool,
    target: &User,
    viewer: Option<i64>,
) -> AppResult<UserRead> {
    let is_subscribed = match viewer {
        Some(viewer_id) if viewer_id != target.id => {
            subscription::exists(pool, viewer_id, target.id).await?
        }
        _ => false,
    };
    Ok(UserRead::from_user(target, is_subscribed))
}

/// Full recipe read representation
pub async fn recipe_read(
    pool: &SqlitePool,
    recipe: &Recipe,
    viewer: Option<i64>,
) -> AppResult<RecipeRead> {
    let author_row = user::find_by_id(pool, recipe.author_id)
        .await?
        .ok_or_else(|| AppError::not_found("Recipe author"))?;
    let author = user_read(pool, &author_row, viewer).await?;

    let ingredients = recipe::ingredients_of(pool, recipe.id).await?;
    let tags = tag::find_by_recipe(pool, recipe.id).await?;

    let (is_favorited, is_in_shopping_cart) = match viewer {
        Some(viewer_id) => (
            favorite::exists(pool, viewer_id, recipe.id).await?,
            shopping_list::exists(pool, viewer_id, recipe.id).await?,
        ),
        None => (false, false),
    };

    Ok(RecipeRead {
        id: recipe.id,
        author,
        name: recipe.name.clone(),
        image: image_store::media_url(&recipe.image),
        text: recipe.text.clone(),
        ingredients,
        tags,
        cooking_time: recipe.cooking_time,
        is_favorited,
        is_in_shopping_cart,
    })
}

/// Followed user annotated with their recipes and recipe count
pub async fn subscription_read(
    pool: &SqlitePool,
    followed: &User,
    viewer: i64,
    recipes_limit: Option<i64>,
) -> AppResult<SubscriptionRead> {
    let is_subscribed = subscription::exists(pool, viewer, followed.id).await?;

    let recipes = recipe::summaries_by_author(pool, followed.id, recipes_limit)
        .await?
        .into_iter()
        .map(|mut summary| {
            summary.image = image_store::media_url(&summary.image);
            summary
        })
        .collect();
    let recipes_count = recipe::count_by_author(pool, followed.id).await?;

    Ok(SubscriptionRead {
        email: followed.email.clone(),
        id: followed.id,
        username: followed.username.clone(),
        first_name: followed.first_name.clone(),
        last_name: followed.last_name.clone(),
        is_subscribed,
        recipes,
        recipes_count,
    })
}
