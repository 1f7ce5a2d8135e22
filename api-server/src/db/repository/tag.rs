//! Tag Repository

use sqlx::SqlitePool;

use shared::models::Tag;

use super::RepoResult;

/// Find all tags ordered by id
pub async fn find_all(pool: &SqlitePool) -> RepoResult<Vec<Tag>> {
    let tags = sqlx::query_as::<_, Tag>("SELECT id, name, color, slug FROM tag ORDER BY id")
        .fetch_all(pool)
        .await?;
    Ok(tags)
}

pub async fn find_by_id(pool: &SqlitePool, id: i64) -> RepoResult<Option<Tag>> {
    let tag = sqlx::query_as::<_, Tag>("SELECT id, name, color, slug FROM tag WHERE id = ?")
        .bind(id)
        .fetch_optional(pool)
        .await?;
    Ok(tag)
}

/// Tags attached to a recipe, ordered by id
pub async fn find_by_recipe(pool: &SqlitePool, recipe_id: i64) -> RepoResult<Vec<Tag>> {
    let tags = sqlx::query_as::<_, Tag>(
        "SELECT t.id, t.name, t.color, t.slug
         FROM tag t
         JOIN recipe_tag rt ON rt.tag_id = t.id
         WHERE rt.recipe_id = ?
         ORDER BY t.id",
    )
    .bind(recipe_id)
    .fetch_all(pool)
    .await?;
    Ok(tags)
}
