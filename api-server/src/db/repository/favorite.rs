//! Favorite Repository
//!
//! (user, recipe) join rows; created and deleted, never updated.

use sqlx::SqlitePool;

use super::{RepoError, RepoResult};

pub async fn exists(pool: &SqlitePool, user_id: i64, recipe_id: i64) -> RepoResult<bool> {
    let count = sqlx::query_scalar::<_, i64>(
        "SELECT COUNT(*) FROM favorite WHERE user_id = ? AND recipe_id = ?",
    )
    .bind(user_id)
    .bind(recipe_id)
    .fetch_one(pool)
    .await?;
    Ok(count > 0)
}

pub async fn create(pool: &SqlitePool, user_id: i64, recipe_id: i64) -> RepoResult<()> {
    sqlx::query("INSERT INTO favorite (user_id, recipe_id) VALUES (?1, ?2)")
        .bind(user_id)
        .bind(recipe_id)
        .execute(pool)
        .await?;
    Ok(())
}

pub async fn delete(pool: &SqlitePool, user_id: i64, recipe_id: i64) -> RepoResult<()> {
    let rows = sqlx::query("DELETE FROM favorite WHERE user_id = ? AND recipe_id = ?")
        .bind(user_id)
        .bind(recipe_id)
        .execute(pool)
        .await?;
    if rows.rows_affected() == 0 {
        return Err(RepoError::NotFound(format!(
            "Favorite for recipe {recipe_id} not found"
        )));
    }
    Ok(())
}
