//! Storage-layer properties: cascade deletes, CHECK constraints, and
//! uniqueness under direct concurrent-style inserts.

mod common;

use sqlx::SqlitePool;

use shared::models::{IngredientAmount, RecipeCreate, UserCreate};

use api_server::db::repository::{RepoError, favorite, recipe, shopping_list, subscription, user};
use common::{seed_catalog, test_pool};

async fn table_count(pool: &SqlitePool, table: &str) -> i64 {
    sqlx::query_scalar::<_, i64>(&format!("SELECT COUNT(*) FROM {table}"))
        .fetch_one(pool)
        .await
        .unwrap()
}

async fn make_user(pool: &SqlitePool, email: &str) -> i64 {
    user::create(
        pool,
        &UserCreate {
            email: email.to_string(),
            username: email.split('@').next().unwrap().to_string(),
            first_name: "Test".to_string(),
            last_name: "User".to_string(),
            password: String::new(),
        },
        "unused-hash",
    )
    .await
    .unwrap()
    .id
}

async fn make_recipe(pool: &SqlitePool, author: i64) -> i64 {
    recipe::create(
        pool,
        author,
        "recipes/images/test.png",
        &RecipeCreate {
            name: "Pancakes".to_string(),
            text: "Test".to_string(),
            cooking_time: 10,
            image: String::new(),
            tags: vec![1],
            ingredients: vec![IngredientAmount { id: 1, amount: 100 }],
        },
    )
    .await
    .unwrap()
    .id
}

#[tokio::test]
async fn deleting_a_user_cascades_everything_they_touch() {
    let pool = test_pool().await;
    seed_catalog(&pool).await;

    let author = make_user(&pool, "author@example.com").await;
    let fan = make_user(&pool, "fan@example.com").await;
    let recipe_id = make_recipe(&pool, author).await;

    favorite::create(&pool, fan, recipe_id).await.unwrap();
    shopping_list::create(&pool, fan, recipe_id).await.unwrap();
    subscription::create(&pool, fan, author).await.unwrap();

    assert_eq!(table_count(&pool, "recipe").await, 1);
    assert_eq!(table_count(&pool, "favorite").await, 1);
    assert_eq!(table_count(&pool, "shopping_list").await, 1);
    assert_eq!(table_count(&pool, "subscription").await, 1);

    // Deleting the author removes their recipes, and through the recipes
    // every dependent join row, plus the subscription pointing at them.
    assert!(user::delete(&pool, author).await.unwrap());

    assert_eq!(table_count(&pool, "recipe").await, 0);
    assert_eq!(table_count(&pool, "recipe_ingredient").await, 0);
    assert_eq!(table_count(&pool, "recipe_tag").await, 0);
    assert_eq!(table_count(&pool, "favorite").await, 0);
    assert_eq!(table_count(&pool, "shopping_list").await, 0);
    assert_eq!(table_count(&pool, "subscription").await, 0);

    // The fan account itself is untouched
    assert!(user::find_by_id(&pool, fan).await.unwrap().is_some());
}

#[tokio::test]
async fn deleting_a_recipe_cascades_its_join_rows_only() {
    let pool = test_pool().await;
    seed_catalog(&pool).await;

    let author = make_user(&pool, "author@example.com").await;
    let fan = make_user(&pool, "fan@example.com").await;
    let kept = make_recipe(&pool, author).await;
    let doomed = make_recipe(&pool, author).await;

    favorite::create(&pool, fan, kept).await.unwrap();
    favorite::create(&pool, fan, doomed).await.unwrap();

    assert!(recipe::delete(&pool, doomed).await.unwrap());

    assert_eq!(table_count(&pool, "recipe").await, 1);
    assert_eq!(table_count(&pool, "favorite").await, 1);
    assert!(favorite::exists(&pool, fan, kept).await.unwrap());
    // The ingredient catalog is untouched
    assert_eq!(table_count(&pool, "ingredient").await, 4);
}

#[tokio::test]
async fn check_constraints_reject_non_positive_values() {
    let pool = test_pool().await;
    seed_catalog(&pool).await;
    let author = make_user(&pool, "author@example.com").await;

    // cooking_time >= 1 is enforced by the store itself
    let result = sqlx::query(
        "INSERT INTO recipe (author_id, name, image, text, cooking_time, created_at)
         VALUES (?1, 'x', 'x', 'x', 0, 0)",
    )
    .bind(author)
    .execute(&pool)
    .await;
    assert!(result.is_err());

    // amount >= 1 likewise
    let recipe_id = make_recipe(&pool, author).await;
    let result = sqlx::query(
        "INSERT INTO recipe_ingredient (recipe_id, ingredient_id, amount) VALUES (?1, 2, 0)",
    )
    .bind(recipe_id)
    .execute(&pool)
    .await;
    assert!(result.is_err());
}

#[tokio::test]
async fn uniqueness_is_enforced_by_the_store() {
    let pool = test_pool().await;
    seed_catalog(&pool).await;

    let author = make_user(&pool, "author@example.com").await;
    let fan = make_user(&pool, "fan@example.com").await;
    let recipe_id = make_recipe(&pool, author).await;

    // A lost exists-check race still resolves through the UNIQUE
    // constraint: the later insert surfaces as a duplicate error.
    favorite::create(&pool, fan, recipe_id).await.unwrap();
    match favorite::create(&pool, fan, recipe_id).await {
        Err(RepoError::Duplicate(_)) => {}
        other => panic!("expected duplicate error, got {other:?}"),
    }

    subscription::create(&pool, fan, author).await.unwrap();
    match subscription::create(&pool, fan, author).await {
        Err(RepoError::Duplicate(_)) => {}
        other => panic!("expected duplicate error, got {other:?}"),
    }

    // Self-subscription is rejected by the CHECK constraint even if the
    // handler-level guard were bypassed.
    assert!(subscription::create(&pool, fan, fan).await.is_err());
}

#[tokio::test]
async fn failed_recipe_create_leaves_no_orphans() {
    let pool = test_pool().await;
    seed_catalog(&pool).await;
    let author = make_user(&pool, "author@example.com").await;

    // Unknown ingredient id: the recipe insert and the first association
    // must both roll back.
    let result = recipe::create(
        &pool,
        author,
        "recipes/images/test.png",
        &RecipeCreate {
            name: "Broken".to_string(),
            text: "Test".to_string(),
            cooking_time: 10,
            image: String::new(),
            tags: vec![1],
            ingredients: vec![
                IngredientAmount { id: 1, amount: 100 },
                IngredientAmount { id: 999, amount: 100 },
            ],
        },
    )
    .await;
    assert!(matches!(result, Err(RepoError::Validation(_))));

    assert_eq!(table_count(&pool, "recipe").await, 0);
    assert_eq!(table_count(&pool, "recipe_ingredient").await, 0);
    assert_eq!(table_count(&pool, "recipe_tag").await, 0);
}
