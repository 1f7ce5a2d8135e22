//! Shopping List Repository
//!
//! Cart join rows plus the ingredient aggregation behind the plain-text
//! export: total amount per distinct (name, measurement unit) pair summed
//! across every recipe in the user's cart.

use sqlx::SqlitePool;

use shared::models::CartIngredient;

use super::{RepoError, RepoResult};

pub async fn exists(pool: &SqlitePool, user_id: i64, recipe_id: i64) -> RepoResult<bool> {
    let count = sqlx::query_scalar::<_, i64>(
        "SELECT COUNT(*) FROM shopping_list WHERE user_id = ? AND recipe_id = ?",
    )
    .bind(user_id)
    .bind(recipe_id)
    .fetch_one(pool)
    .await?;
    Ok(count > 0)
}

pub async fn create(pool: &SqlitePool, user_id: i64, recipe_id: i64) -> RepoResult<()> {
    sqlx::query("INSERT INTO shopping_list (user_id, recipe_id) VALUES (?1, ?2)")
        .bind(user_id)
        .bind(recipe_id)
        .execute(pool)
        .await?;
    Ok(())
}

pub async fn delete(pool: &SqlitePool, user_id: i64, recipe_id: i64) -> RepoResult<()> {
    let rows = sqlx::query("DELETE FROM shopping_list WHERE user_id = ? AND recipe_id = ?")
        .bind(user_id)
        .bind(recipe_id)
        .execute(pool)
        .await?;
    if rows.rows_affected() == 0 {
        return Err(RepoError::NotFound(format!(
            "Shopping cart entry for recipe {recipe_id} not found"
        )));
    }
    Ok(())
}

/// Number of recipes in the user's cart
pub async fn count_for_user(pool: &SqlitePool, user_id: i64) -> RepoResult<i64> {
    let count = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM shopping_list WHERE user_id = ?")
        .bind(user_id)
        .fetch_one(pool)
        .await?;
    Ok(count)
}

/// Aggregate the cart: SUM(amount) per (ingredient name, unit), by name
pub async fn cart_ingredients(pool: &SqlitePool, user_id: i64) -> RepoResult<Vec<CartIngredient>> {
    let rows = sqlx::query_as::<_, CartIngredient>(
        "SELECT i.name AS name, i.measurement_unit AS measurement_unit, \
                SUM(ri.amount) AS total_amount
         FROM shopping_list sl
         JOIN recipe_ingredient ri ON ri.recipe_id = sl.recipe_id
         JOIN ingredient i ON i.id = ri.ingredient_id
         WHERE sl.user_id = ?
         GROUP BY i.name, i.measurement_unit
         ORDER BY i.name",
    )
    .bind(user_id)
    .fetch_all(pool)
    .await?;
    Ok(rows)
}
