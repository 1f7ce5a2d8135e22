//! Shared test harness: in-memory database, app router, request helpers.
#![allow(dead_code)]

use std::sync::Arc;

use axum::Router;
use axum::body::Body;
use http::{Request, StatusCode, header};
use http_body_util::BodyExt;
use serde_json::{Value, json};
use sqlx::SqlitePool;
use sqlx::sqlite::SqlitePoolOptions;
use tower::ServiceExt;

use api_server::auth::{JwtConfig, JwtService};
use api_server::core::server::app;
use api_server::db::MIGRATOR;
use api_server::services::seed;
use api_server::{Config, ServerState};
use shared::models::IngredientSeed;

/// Password used for every test account
pub const PASSWORD: &str = "test-password-123";

/// 1x1 transparent PNG, base64
pub const PNG_1X1: &str = "iVBORw0KGgoAAAANSUhEUgAAAAEAAAABCAYAAAAfFcSJAAAADUlEQVR42mNkYPhfDwAChwGA60e6kgAAAABJRU5ErkJggg==";

/// In-memory SQLite pool with migrations applied
///
/// One connection max: each connection of an in-memory database would be
/// a separate empty database.
pub async fn test_pool() -> SqlitePool {
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .connect("sqlite::memory:")
        .await
        .expect("failed to open in-memory database");

    sqlx::query("PRAGMA foreign_keys = ON;")
        .execute(&pool)
        .await
        .expect("failed to enable foreign keys");

    MIGRATOR.run(&pool).await.expect("migrations failed");

    pool
}

/// Full app with an in-memory database and a temp work dir for media
pub async fn test_app() -> (Router, ServerState, tempfile::TempDir) {
    let work_dir = tempfile::tempdir().expect("tempdir");
    let config = Config::with_overrides(work_dir.path().to_string_lossy().to_string(), 0);
    config
        .ensure_work_dir_structure()
        .expect("work dir structure");

    let pool = test_pool().await;
    let jwt_service = Arc::new(JwtService::with_config(JwtConfig {
        secret: "integration-test-secret-0123456789abcdef".to_string(),
        expiration_minutes: 60,
        issuer: "api-server".to_string(),
        audience: "ladle-clients".to_string(),
    }));

    let state = ServerState::new(config, pool, jwt_service);
    (app(state.clone()), state, work_dir)
}

/// Send a JSON request; returns (status, parsed JSON body or Null)
pub async fn request(
    app: &Router,
    method: &str,
    uri: &str,
    token: Option<&str>,
    body: Option<Value>,
) -> (StatusCode, Value) {
    let (status, _headers, bytes) = request_raw(app, method, uri, token, body).await;
    let json = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap_or(Value::Null)
    };
    (status, json)
}

/// Send a request; returns (status, headers, raw body bytes)
pub async fn request_raw(
    app: &Router,
    method: &str,
    uri: &str,
    token: Option<&str>,
    body: Option<Value>,
) -> (StatusCode, http::HeaderMap, Vec<u8>) {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
    }

    let request = match body {
        Some(value) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(value.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app
        .clone()
        .oneshot(request)
        .await
        .expect("request failed");

    let status = response.status();
    let headers = response.headers().clone();
    let bytes = response
        .into_body()
        .collect()
        .await
        .expect("body read failed")
        .to_bytes()
        .to_vec();

    (status, headers, bytes)
}

/// Register a user; returns their id
pub async fn register_user(app: &Router, email: &str, username: &str) -> i64 {
    let (status, body) = request(
        app,
        "POST",
        "/api/users",
        None,
        Some(json!({
            "email": email,
            "username": username,
            "first_name": "Test",
            "last_name": "User",
            "password": PASSWORD,
        })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED, "registration failed: {body}");
    body["id"].as_i64().expect("registration returned no id")
}

/// Log a registered user in; returns the bearer token
pub async fn login(app: &Router, email: &str) -> String {
    let (status, body) = request(
        app,
        "POST",
        "/api/auth/token/login",
        None,
        Some(json!({"email": email, "password": PASSWORD})),
    )
    .await;
    assert_eq!(status, StatusCode::OK, "login failed: {body}");
    body["token"].as_str().expect("no token").to_string()
}

/// Seed the fixed tags plus a small ingredient catalog
///
/// Tags: 1 breakfast, 2 lunch, 3 dinner.
/// Ingredients: 1 flour (g), 2 milk (ml), 3 egg (pieces), 4 sugar (g).
pub async fn seed_catalog(pool: &SqlitePool) {
    seed::seed_fixed_tags(pool).await.expect("seed tags");

    let ingredients = [
        ("flour", "g"),
        ("milk", "ml"),
        ("egg", "pieces"),
        ("sugar", "g"),
    ]
    .map(|(name, unit)| IngredientSeed {
        name: name.to_string(),
        measurement_unit: unit.to_string(),
    });
    seed::replace_ingredients(pool, &ingredients)
        .await
        .expect("seed ingredients");
}

/// Build a recipe create/update payload
pub fn recipe_payload(name: &str, tags: &[i64], ingredients: &[(i64, i64)]) -> Value {
    json!({
        "name": name,
        "text": format!("How to cook {name}."),
        "cooking_time": 30,
        "image": format!("data:image/png;base64,{PNG_1X1}"),
        "tags": tags,
        "ingredients": ingredients
            .iter()
            .map(|(id, amount)| json!({"id": id, "amount": amount}))
            .collect::<Vec<_>>(),
    })
}
