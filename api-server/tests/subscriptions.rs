//! User-to-user subscriptions.

mod common;

use http::StatusCode;

use common::{recipe_payload, register_user, request, seed_catalog, test_app};

#[tokio::test]
async fn subscribe_rules() {
    let (app, _state, _dir) = test_app().await;
    let follower_id = register_user(&app, "follower@example.com", "follower").await;
    let chef_id = register_user(&app, "chef@example.com", "chef").await;
    let token = common::login(&app, "follower@example.com").await;

    // Cannot follow yourself
    let (status, body) = request(
        &app,
        "POST",
        &format!("/api/users/{follower_id}/subscribe"),
        Some(&token),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], 3101); // SelfSubscription

    // Subscribe
    let (status, body) = request(
        &app,
        "POST",
        &format!("/api/users/{chef_id}/subscribe"),
        Some(&token),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["id"], chef_id);
    assert_eq!(body["is_subscribed"], true);
    assert_eq!(body["recipes_count"], 0);

    // Duplicate subscription
    let (status, body) = request(
        &app,
        "POST",
        &format!("/api/users/{chef_id}/subscribe"),
        Some(&token),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], 3102); // AlreadySubscribed

    // Unsubscribe, then unsubscribing again fails
    let (status, _) = request(
        &app,
        "DELETE",
        &format!("/api/users/{chef_id}/subscribe"),
        Some(&token),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (status, body) = request(
        &app,
        "DELETE",
        &format!("/api/users/{chef_id}/subscribe"),
        Some(&token),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], 3103); // NotSubscribed

    // Unknown target user
    let (status, _) = request(&app, "POST", "/api/users/9999/subscribe", Some(&token), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    // Anonymous callers are rejected
    let (status, _) = request(
        &app,
        "POST",
        &format!("/api/users/{chef_id}/subscribe"),
        None,
        None,
    )
    .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn subscriptions_list_annotates_recipes() {
    let (app, state, _dir) = test_app().await;
    seed_catalog(&state.pool).await;
    register_user(&app, "follower@example.com", "follower").await;
    let chef_id = register_user(&app, "chef@example.com", "chef").await;

    // The chef publishes two recipes
    let chef_token = common::login(&app, "chef@example.com").await;
    for name in ["Pancakes", "Crepes"] {
        let (status, _) = request(
            &app,
            "POST",
            "/api/recipes",
            Some(&chef_token),
            Some(recipe_payload(name, &[1], &[(1, 100)])),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
    }

    let token = common::login(&app, "follower@example.com").await;
    let (status, _) = request(
        &app,
        "POST",
        &format!("/api/users/{chef_id}/subscribe"),
        Some(&token),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);

    // Full list: both recipes and the true count
    let (status, body) = request(&app, "GET", "/api/users/subscriptions", Some(&token), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["total"], 1);
    let entry = &body["data"][0];
    assert_eq!(entry["username"], "chef");
    assert_eq!(entry["is_subscribed"], true);
    assert_eq!(entry["recipes_count"], 2);
    assert_eq!(entry["recipes"].as_array().unwrap().len(), 2);

    // recipes_limit truncates the list but not the count
    let (_, body) = request(
        &app,
        "GET",
        "/api/users/subscriptions?recipes_limit=1",
        Some(&token),
        None,
    )
    .await;
    let entry = &body["data"][0];
    assert_eq!(entry["recipes"].as_array().unwrap().len(), 1);
    assert_eq!(entry["recipes_count"], 2);
    // Summary views only
    assert!(entry["recipes"][0].get("text").is_none());
    assert!(
        entry["recipes"][0]["image"]
            .as_str()
            .unwrap()
            .starts_with("/media/")
    );

    // The profile read also reflects the subscription
    let (_, body) = request(
        &app,
        "GET",
        &format!("/api/users/{chef_id}"),
        Some(&token),
        None,
    )
    .await;
    assert_eq!(body["is_subscribed"], true);

    let (_, body) = request(&app, "GET", &format!("/api/users/{chef_id}"), None, None).await;
    assert_eq!(body["is_subscribed"], false);

    // Subscriptions listing requires auth
    let (status, _) = request(&app, "GET", "/api/users/subscriptions", None, None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}
