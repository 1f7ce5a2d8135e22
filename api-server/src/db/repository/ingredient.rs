//! Ingredient Repository

use sqlx::SqlitePool;

use shared::models::Ingredient;

use super::RepoResult;

pub async fn find_all(pool: &SqlitePool) -> RepoResult<Vec<Ingredient>> {
    let ingredients = sqlx::query_as::<_, Ingredient>(
        "SELECT id, name, measurement_unit FROM ingredient ORDER BY name",
    )
    .fetch_all(pool)
    .await?;
    Ok(ingredients)
}

pub async fn find_by_id(pool: &SqlitePool, id: i64) -> RepoResult<Option<Ingredient>> {
    let ingredient = sqlx::query_as::<_, Ingredient>(
        "SELECT id, name, measurement_unit FROM ingredient WHERE id = ?",
    )
    .bind(id)
    .fetch_optional(pool)
    .await?;
    Ok(ingredient)
}

/// Case-insensitive substring search on name
pub async fn search(pool: &SqlitePool, query: &str) -> RepoResult<Vec<Ingredient>> {
    let pattern = format!("%{query}%");
    let ingredients = sqlx::query_as::<_, Ingredient>(
        "SELECT id, name, measurement_unit FROM ingredient WHERE name LIKE ?1 ORDER BY name",
    )
    .bind(&pattern)
    .fetch_all(pool)
    .await?;
    Ok(ingredients)
}
