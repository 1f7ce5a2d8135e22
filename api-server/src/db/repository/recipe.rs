//! Recipe Repository
//!
//! Recipe rows plus their tag and ingredient association tables. Create
//! and update run in one transaction so partial failure leaves no
//! orphaned associations; update replaces both association sets entirely.

use sqlx::{Sqlite, SqlitePool, Transaction};

use shared::models::{
    IngredientAmount, Recipe, RecipeCreate, RecipeIngredientRead, RecipeSummary, RecipeUpdate,
};

use super::{RepoError, RepoResult};

const RECIPE_SELECT: &str =
    "SELECT id, author_id, name, image, text, cooking_time, created_at FROM recipe";

/// Listing filters for the recipe endpoints
///
/// `favorited_by` / `in_cart_of` are already resolved to a user id by the
/// handler; anonymous or `false` filters never reach this layer.
#[derive(Debug, Default, Clone)]
pub struct RecipeQuery {
    pub author: Option<i64>,
    pub tag_slugs: Vec<String>,
    pub favorited_by: Option<i64>,
    pub in_cart_of: Option<i64>,
}

fn where_clause(query: &RecipeQuery) -> String {
    let mut clauses: Vec<String> = Vec::new();

    if query.author.is_some() {
        clauses.push("recipe.author_id = ?".into());
    }
    if !query.tag_slugs.is_empty() {
        let placeholders = vec!["?"; query.tag_slugs.len()].join(", ");
        clauses.push(format!(
            "EXISTS (SELECT 1 FROM recipe_tag rt JOIN tag t ON rt.tag_id = t.id \
             WHERE rt.recipe_id = recipe.id AND t.slug IN ({placeholders}))"
        ));
    }
    if query.favorited_by.is_some() {
        clauses.push(
            "EXISTS (SELECT 1 FROM favorite f \
             WHERE f.recipe_id = recipe.id AND f.user_id = ?)"
                .into(),
        );
    }
    if query.in_cart_of.is_some() {
        clauses.push(
            "EXISTS (SELECT 1 FROM shopping_list sl \
             WHERE sl.recipe_id = recipe.id AND sl.user_id = ?)"
                .into(),
        );
    }

    if clauses.is_empty() {
        String::new()
    } else {
        format!(" WHERE {}", clauses.join(" AND "))
    }
}

/// Filtered listing, newest first
pub async fn find_all(
    pool: &SqlitePool,
    query: &RecipeQuery,
    limit: i64,
    offset: i64,
) -> RepoResult<Vec<Recipe>> {
    let sql = format!(
        "{RECIPE_SELECT}{} ORDER BY recipe.id DESC LIMIT ? OFFSET ?",
        where_clause(query)
    );

    let mut q = sqlx::query_as::<_, Recipe>(&sql);
    if let Some(author) = query.author {
        q = q.bind(author);
    }
    for slug in &query.tag_slugs {
        q = q.bind(slug.as_str());
    }
    if let Some(user_id) = query.favorited_by {
        q = q.bind(user_id);
    }
    if let Some(user_id) = query.in_cart_of {
        q = q.bind(user_id);
    }

    let recipes = q.bind(limit).bind(offset).fetch_all(pool).await?;
    Ok(recipes)
}

pub async fn count(pool: &SqlitePool, query: &RecipeQuery) -> RepoResult<i64> {
    let sql = format!("SELECT COUNT(*) FROM recipe{}", where_clause(query));

    let mut q = sqlx::query_scalar::<_, i64>(&sql);
    if let Some(author) = query.author {
        q = q.bind(author);
    }
    for slug in &query.tag_slugs {
        q = q.bind(slug.as_str());
    }
    if let Some(user_id) = query.favorited_by {
        q = q.bind(user_id);
    }
    if let Some(user_id) = query.in_cart_of {
        q = q.bind(user_id);
    }

    let count = q.fetch_one(pool).await?;
    Ok(count)
}

pub async fn find_by_id(pool: &SqlitePool, id: i64) -> RepoResult<Option<Recipe>> {
    let sql = format!("{RECIPE_SELECT} WHERE id = ?");
    let recipe = sqlx::query_as::<_, Recipe>(&sql)
        .bind(id)
        .fetch_optional(pool)
        .await?;
    Ok(recipe)
}

/// Create a recipe with its tag and ingredient sets in one transaction
pub async fn create(
    pool: &SqlitePool,
    author_id: i64,
    image_path: &str,
    data: &RecipeCreate,
) -> RepoResult<Recipe> {
    let now = shared::util::now_millis();

    let mut tx = pool.begin().await?;

    let id = sqlx::query_scalar::<_, i64>(
        "INSERT INTO recipe (author_id, name, image, text, cooking_time, created_at)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6) RETURNING id",
    )
    .bind(author_id)
    .bind(&data.name)
    .bind(image_path)
    .bind(&data.text)
    .bind(data.cooking_time)
    .bind(now)
    .fetch_one(&mut *tx)
    .await?;

    replace_tags(&mut tx, id, &data.tags).await?;
    replace_ingredients(&mut tx, id, &data.ingredients).await?;

    tx.commit().await?;

    find_by_id(pool, id)
        .await?
        .ok_or_else(|| RepoError::Database("Failed to create recipe".into()))
}

/// Update a recipe, replacing both association sets entirely
///
/// `image_path` is the freshly stored image, or None to keep the current
/// one. Scalar fields use patch semantics (COALESCE).
pub async fn update(
    pool: &SqlitePool,
    id: i64,
    image_path: Option<&str>,
    data: &RecipeUpdate,
) -> RepoResult<Recipe> {
    let mut tx = pool.begin().await?;

    let rows = sqlx::query(
        "UPDATE recipe SET name = COALESCE(?1, name), text = COALESCE(?2, text), \
         cooking_time = COALESCE(?3, cooking_time), image = COALESCE(?4, image) WHERE id = ?5",
    )
    .bind(&data.name)
    .bind(&data.text)
    .bind(data.cooking_time)
    .bind(image_path)
    .bind(id)
    .execute(&mut *tx)
    .await?;
    if rows.rows_affected() == 0 {
        return Err(RepoError::NotFound(format!("Recipe {id} not found")));
    }

    // Full-replace semantics: clear both sets, then re-apply
    sqlx::query("DELETE FROM recipe_tag WHERE recipe_id = ?")
        .bind(id)
        .execute(&mut *tx)
        .await?;
    sqlx::query("DELETE FROM recipe_ingredient WHERE recipe_id = ?")
        .bind(id)
        .execute(&mut *tx)
        .await?;

    replace_tags(&mut tx, id, &data.tags).await?;
    replace_ingredients(&mut tx, id, &data.ingredients).await?;

    tx.commit().await?;

    find_by_id(pool, id)
        .await?
        .ok_or_else(|| RepoError::NotFound(format!("Recipe {id} not found")))
}

/// Hard delete a recipe (associations cascade)
pub async fn delete(pool: &SqlitePool, id: i64) -> RepoResult<bool> {
    let rows = sqlx::query("DELETE FROM recipe WHERE id = ?")
        .bind(id)
        .execute(pool)
        .await?;
    Ok(rows.rows_affected() > 0)
}

async fn replace_tags(
    tx: &mut Transaction<'_, Sqlite>,
    recipe_id: i64,
    tag_ids: &[i64],
) -> RepoResult<()> {
    for tag_id in tag_ids {
        let known = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM tag WHERE id = ?")
            .bind(tag_id)
            .fetch_one(&mut **tx)
            .await?;
        if known == 0 {
            return Err(RepoError::Validation(format!("Tag {tag_id} not found")));
        }

        sqlx::query("INSERT INTO recipe_tag (recipe_id, tag_id) VALUES (?1, ?2)")
            .bind(recipe_id)
            .bind(tag_id)
            .execute(&mut **tx)
            .await?;
    }
    Ok(())
}

async fn replace_ingredients(
    tx: &mut Transaction<'_, Sqlite>,
    recipe_id: i64,
    ingredients: &[IngredientAmount],
) -> RepoResult<()> {
    for entry in ingredients {
        let known = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM ingredient WHERE id = ?")
            .bind(entry.id)
            .fetch_one(&mut **tx)
            .await?;
        if known == 0 {
            return Err(RepoError::Validation(format!(
                "Ingredient {} not found",
                entry.id
            )));
        }

        sqlx::query(
            "INSERT INTO recipe_ingredient (recipe_id, ingredient_id, amount) VALUES (?1, ?2, ?3)",
        )
        .bind(recipe_id)
        .bind(entry.id)
        .bind(entry.amount)
        .execute(&mut **tx)
        .await?;
    }
    Ok(())
}

/// Resolved ingredient lines for the read representation
pub async fn ingredients_of(
    pool: &SqlitePool,
    recipe_id: i64,
) -> RepoResult<Vec<RecipeIngredientRead>> {
    let rows = sqlx::query_as::<_, RecipeIngredientRead>(
        "SELECT i.id, i.name, i.measurement_unit, ri.amount
         FROM recipe_ingredient ri
         JOIN ingredient i ON ri.ingredient_id = i.id
         WHERE ri.recipe_id = ?
         ORDER BY i.id",
    )
    .bind(recipe_id)
    .fetch_all(pool)
    .await?;
    Ok(rows)
}

/// Summary views of an author's recipes, newest first, optionally truncated
pub async fn summaries_by_author(
    pool: &SqlitePool,
    author_id: i64,
    limit: Option<i64>,
) -> RepoResult<Vec<RecipeSummary>> {
    let mut sql = String::from(
        "SELECT id, name, image, cooking_time FROM recipe WHERE author_id = ? ORDER BY id DESC",
    );
    if limit.is_some() {
        sql.push_str(" LIMIT ?");
    }

    let mut q = sqlx::query_as::<_, RecipeSummary>(&sql).bind(author_id);
    if let Some(limit) = limit {
        q = q.bind(limit);
    }

    let summaries = q.fetch_all(pool).await?;
    Ok(summaries)
}

pub async fn count_by_author(pool: &SqlitePool, author_id: i64) -> RepoResult<i64> {
    let count = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM recipe WHERE author_id = ?")
        .bind(author_id)
        .fetch_one(pool)
        .await?;
    Ok(count)
}
