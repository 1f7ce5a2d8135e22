//! Subscription Repository
//!
//! Join rows linking a follower (`user_id`) to a followed user
//! (`following_id`). Rows are only created and deleted, never updated.

use sqlx::SqlitePool;

use shared::models::User;

use super::{RepoError, RepoResult};

/// Does `user_id` follow `following_id`?
pub async fn exists(pool: &SqlitePool, user_id: i64, following_id: i64) -> RepoResult<bool> {
    let count = sqlx::query_scalar::<_, i64>(
        "SELECT COUNT(*) FROM subscription WHERE user_id = ? AND following_id = ?",
    )
    .bind(user_id)
    .bind(following_id)
    .fetch_one(pool)
    .await?;
    Ok(count > 0)
}

pub async fn create(pool: &SqlitePool, user_id: i64, following_id: i64) -> RepoResult<()> {
    sqlx::query("INSERT INTO subscription (user_id, following_id) VALUES (?1, ?2)")
        .bind(user_id)
        .bind(following_id)
        .execute(pool)
        .await?;
    Ok(())
}

pub async fn delete(pool: &SqlitePool, user_id: i64, following_id: i64) -> RepoResult<()> {
    let rows = sqlx::query("DELETE FROM subscription WHERE user_id = ? AND following_id = ?")
        .bind(user_id)
        .bind(following_id)
        .execute(pool)
        .await?;
    if rows.rows_affected() == 0 {
        return Err(RepoError::NotFound(format!(
            "Subscription to user {following_id} not found"
        )));
    }
    Ok(())
}

/// Users followed by `user_id`, ordered by subscription age
pub async fn find_following(
    pool: &SqlitePool,
    user_id: i64,
    limit: i64,
    offset: i64,
) -> RepoResult<Vec<User>> {
    let users = sqlx::query_as::<_, User>(
        "SELECT u.id, u.email, u.username, u.first_name, u.last_name, u.password_hash, u.created_at
         FROM user u
         JOIN subscription s ON s.following_id = u.id
         WHERE s.user_id = ?
         ORDER BY s.id
         LIMIT ? OFFSET ?",
    )
    .bind(user_id)
    .bind(limit)
    .bind(offset)
    .fetch_all(pool)
    .await?;
    Ok(users)
}

pub async fn count_following(pool: &SqlitePool, user_id: i64) -> RepoResult<i64> {
    let count = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM subscription WHERE user_id = ?")
        .bind(user_id)
        .fetch_one(pool)
        .await?;
    Ok(count)
}
