//! Integration tests for the TechFinder API.
//!
//! These tests drive the real router end-to-end against a live
//! PostgreSQL database:
//! - Registration and duplicate rejection
//! - Login (username and email identifiers), logout, session status
//! - Profile access with identity checks
//! - Product CRUD and validation
//! - Wishlist add/remove semantics and cascade deletion
//!
//! Requires `DATABASE_URL`; fixtures use unique names so tests can run
//! concurrently against a shared database.

mod common;

use axum::http::StatusCode;
use common::{unique, unique_email, TestContext};
use rust_decimal::Decimal;
use serde_json::json;

use techfinder_shared::models::product::{CreateProduct, Product};
use techfinder_shared::models::user::User;
use techfinder_shared::models::wishlist::WishlistItem;

/// Creates a product directly through the model layer
async fn seed_product(ctx: &TestContext, name: &str) -> Product {
    Product::create(
        &ctx.db,
        CreateProduct {
            name: name.to_string(),
            description: "A test product".to_string(),
            price: Decimal::new(59900, 2),
            image_url: Some("icons/test.png".to_string()),
            external_link: None,
            category: Some("Test".to_string()),
        },
    )
    .await
    .unwrap()
}

#[tokio::test]
async fn test_health_check() {
    let ctx = TestContext::new().await.unwrap();

    let (status, _, body) = ctx.request("GET", "/health", None, None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "healthy");
    assert_eq!(body["database"], "connected");
}

#[tokio::test]
async fn test_register_login_wishlist_scenario() {
    let ctx = TestContext::new().await.unwrap();

    let username = unique("alice");
    let email = unique_email();

    // Register succeeds
    let (status, body) = ctx.register(&username, &email, "pw123").await;
    assert_eq!(status, StatusCode::OK, "register failed: {}", body);
    assert_eq!(body["success"], true);
    assert_eq!(body["username"], username.as_str());
    let user_id = body["user_id"].as_i64().unwrap();

    // Same username again is a conflict, different email notwithstanding
    let (status, body) = ctx.register(&username, &unique_email(), "pw456").await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["success"], false);

    // Same email again is also a conflict
    let (status, _) = ctx.register(&unique("bob"), &email, "pw456").await;
    assert_eq!(status, StatusCode::CONFLICT);

    // Login with the right password
    let (status, body, cookie) = ctx.login(&username, "pw123").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["user_id"].as_i64().unwrap(), user_id);
    let cookie = cookie.expect("login should set a session cookie");

    // Login with the wrong password
    let (status, body, _) = ctx.login(&username, "wrong").await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["success"], false);

    // Add a product to the wishlist twice; the second add reports the
    // conflict and no duplicate row appears
    let product = seed_product(&ctx, &unique("Test Laptop")).await;

    let (status, _, body) = ctx
        .request(
            "POST",
            "/api/wishlist",
            Some(&cookie),
            Some(json!({ "product_id": product.id })),
        )
        .await;
    assert_eq!(status, StatusCode::CREATED, "wishlist add failed: {}", body);
    assert_eq!(body["item"]["product_id"].as_i64().unwrap(), product.id);

    let (status, _, body) = ctx
        .request(
            "POST",
            "/api/wishlist",
            Some(&cookie),
            Some(json!({ "product_id": product.id })),
        )
        .await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["success"], false);

    let (status, _, body) = ctx.request("GET", "/api/wishlist", Some(&cookie), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["count"].as_u64().unwrap(), 1);
    assert_eq!(body["products"][0]["id"].as_i64().unwrap(), product.id);

    assert!(WishlistItem::contains(&ctx.db, user_id, product.id)
        .await
        .unwrap());

    // Cleanup (cascade removes the wishlist row)
    User::delete(&ctx.db, user_id).await.unwrap();
    Product::delete(&ctx.db, product.id).await.unwrap();
}

#[tokio::test]
async fn test_login_with_email_identifier() {
    let ctx = TestContext::new().await.unwrap();

    let username = unique("carol");
    let email = unique_email();
    let (status, body) = ctx.register(&username, &email, "secret-pw").await;
    assert_eq!(status, StatusCode::OK);
    let user_id = body["user_id"].as_i64().unwrap();
    assert!(User::count(&ctx.db).await.unwrap() >= 1);

    // The identifier field accepts the email address too
    let (status, body, cookie) = ctx.login(&email, "secret-pw").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["user_id"].as_i64().unwrap(), user_id);
    assert!(cookie.is_some());

    User::delete(&ctx.db, user_id).await.unwrap();
}

#[tokio::test]
async fn test_auth_status_lifecycle() {
    let ctx = TestContext::new().await.unwrap();

    // Anonymous
    let (status, _, body) = ctx.request("GET", "/api/auth/status", None, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["authenticated"], false);
    assert!(body.get("user_id").is_none());

    // Authenticated
    let username = unique("dave");
    let (_, body) = ctx.register(&username, &unique_email(), "pw123").await;
    let user_id = body["user_id"].as_i64().unwrap();
    let (_, _, cookie) = ctx.login(&username, "pw123").await;
    let cookie = cookie.unwrap();

    let (status, _, body) = ctx
        .request("GET", "/api/auth/status", Some(&cookie), None)
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["authenticated"], true);
    assert_eq!(body["user_id"].as_i64().unwrap(), user_id);
    assert_eq!(body["username"], username.as_str());

    // Logged out again
    let (status, _, body) = ctx
        .request("POST", "/api/logout", Some(&cookie), None)
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);

    let (_, _, body) = ctx
        .request("GET", "/api/auth/status", Some(&cookie), None)
        .await;
    assert_eq!(body["authenticated"], false);

    User::delete(&ctx.db, user_id).await.unwrap();
}

#[tokio::test]
async fn test_logout_without_session_succeeds() {
    let ctx = TestContext::new().await.unwrap();

    let (status, _, body) = ctx.request("POST", "/api/logout", None, None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);
}

#[tokio::test]
async fn test_user_profile_authorization() {
    let ctx = TestContext::new().await.unwrap();

    let username = unique("erin");
    let (_, body) = ctx.register(&username, &unique_email(), "pw123").await;
    let user_id = body["user_id"].as_i64().unwrap();

    let other_username = unique("frank");
    let (_, body) = ctx.register(&other_username, &unique_email(), "pw123").await;
    let other_id = body["user_id"].as_i64().unwrap();

    let uri = format!("/api/users/{}", user_id);

    // Anonymous request
    let (status, _, _) = ctx.request("GET", &uri, None, None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    // Another user's session
    let (_, _, other_cookie) = ctx.login(&other_username, "pw123").await;
    let (status, _, _) = ctx
        .request("GET", &uri, Some(&other_cookie.unwrap()), None)
        .await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    // The account owner
    let (_, _, cookie) = ctx.login(&username, "pw123").await;
    let (status, _, body) = ctx.request("GET", &uri, Some(&cookie.unwrap()), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["user"]["username"], username.as_str());
    assert!(body["user"].get("password_hash").is_none());

    User::delete(&ctx.db, user_id).await.unwrap();
    User::delete(&ctx.db, other_id).await.unwrap();
}

#[tokio::test]
async fn test_product_crud() {
    let ctx = TestContext::new().await.unwrap();

    let name = unique("Test Tablet");

    // Create
    let (status, _, body) = ctx
        .request(
            "POST",
            "/api/products",
            None,
            Some(json!({
                "name": name,
                "description": "A fine tablet",
                "price": "499.00",
                "image_url": "icons/tablet.png",
                "category": "Tablets",
            })),
        )
        .await;
    assert_eq!(status, StatusCode::CREATED, "create failed: {}", body);
    let product_id = body["product"]["id"].as_i64().unwrap();
    assert_eq!(body["product"]["price"], "499.00");

    // Duplicate name
    let (status, _, _) = ctx
        .request(
            "POST",
            "/api/products",
            None,
            Some(json!({
                "name": name,
                "description": "Another",
                "price": "1.00",
                "image_url": "icons/other.png",
            })),
        )
        .await;
    assert_eq!(status, StatusCode::CONFLICT);

    // Fetch
    let uri = format!("/api/products/{}", product_id);
    let (status, _, body) = ctx.request("GET", &uri, None, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["product"]["name"], name.as_str());

    // Exact-match name lookup resolves to the same row
    let by_name = Product::find_by_name(&ctx.db, &name).await.unwrap().unwrap();
    assert_eq!(by_name.id, product_id);

    // Partial update
    let (status, _, body) = ctx
        .request("PUT", &uri, None, Some(json!({ "price": "450.00" })))
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["product"]["price"], "450.00");
    assert_eq!(body["product"]["name"], name.as_str());

    // Update of a missing id
    let (status, _, _) = ctx
        .request(
            "PUT",
            "/api/products/999999999",
            None,
            Some(json!({ "price": "1.00" })),
        )
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    // Delete, then the product is gone
    let (status, _, _) = ctx.request("DELETE", &uri, None, None).await;
    assert_eq!(status, StatusCode::OK);

    let (status, _, _) = ctx.request("GET", &uri, None, None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _, _) = ctx.request("DELETE", &uri, None, None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_create_product_validation() {
    let ctx = TestContext::new().await.unwrap();

    // Missing fields
    let (status, _, body) = ctx
        .request(
            "POST",
            "/api/products",
            None,
            Some(json!({ "name": "Incomplete" })),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["success"], false);

    // Negative price
    let (status, _, body) = ctx
        .request(
            "POST",
            "/api/products",
            None,
            Some(json!({
                "name": unique("Bad Price"),
                "description": "Priced below zero",
                "price": "-5.00",
                "image_url": "icons/bad.png",
            })),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].as_str().unwrap().contains("non-negative"));
}

#[tokio::test]
async fn test_products_list_contains_created() {
    let ctx = TestContext::new().await.unwrap();

    let product = seed_product(&ctx, &unique("Listed Product")).await;

    let (status, _, body) = ctx.request("GET", "/api/products", None, None).await;
    assert_eq!(status, StatusCode::OK);
    assert!(body["count"].as_u64().unwrap() >= 1);
    assert!(Product::count(&ctx.db).await.unwrap() >= 1);
    let ids: Vec<i64> = body["products"]
        .as_array()
        .unwrap()
        .iter()
        .map(|p| p["id"].as_i64().unwrap())
        .collect();
    assert!(ids.contains(&product.id));

    Product::delete(&ctx.db, product.id).await.unwrap();
}

#[tokio::test]
async fn test_wishlist_remove_semantics() {
    let ctx = TestContext::new().await.unwrap();

    let username = unique("grace");
    let (_, body) = ctx.register(&username, &unique_email(), "pw123").await;
    let user_id = body["user_id"].as_i64().unwrap();
    let (_, _, cookie) = ctx.login(&username, "pw123").await;
    let cookie = cookie.unwrap();

    let product = seed_product(&ctx, &unique("Removable")).await;

    // Anonymous requests are rejected outright
    let (status, _, _) = ctx
        .request(
            "POST",
            "/api/wishlist",
            None,
            Some(json!({ "product_id": product.id })),
        )
        .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    // Adding an unknown product is a 404
    let (status, _, _) = ctx
        .request(
            "POST",
            "/api/wishlist",
            Some(&cookie),
            Some(json!({ "product_id": 999999999 })),
        )
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    // Add then remove, back to absent
    let (status, _, _) = ctx
        .request(
            "POST",
            "/api/wishlist",
            Some(&cookie),
            Some(json!({ "product_id": product.id })),
        )
        .await;
    assert_eq!(status, StatusCode::CREATED);

    let (status, _, _) = ctx
        .request(
            "DELETE",
            "/api/wishlist",
            Some(&cookie),
            Some(json!({ "product_id": product.id })),
        )
        .await;
    assert_eq!(status, StatusCode::OK);

    let (_, _, body) = ctx.request("GET", "/api/wishlist", Some(&cookie), None).await;
    assert_eq!(body["count"].as_u64().unwrap(), 0);

    // Removing again reports the absence
    let (status, _, _) = ctx
        .request(
            "DELETE",
            "/api/wishlist",
            Some(&cookie),
            Some(json!({ "product_id": product.id })),
        )
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    User::delete(&ctx.db, user_id).await.unwrap();
    Product::delete(&ctx.db, product.id).await.unwrap();
}

#[tokio::test]
async fn test_wishlist_preserves_insertion_order() {
    let ctx = TestContext::new().await.unwrap();

    let username = unique("henry");
    let (_, body) = ctx.register(&username, &unique_email(), "pw123").await;
    let user_id = body["user_id"].as_i64().unwrap();
    let (_, _, cookie) = ctx.login(&username, "pw123").await;
    let cookie = cookie.unwrap();

    let first = seed_product(&ctx, &unique("First Pick")).await;
    let second = seed_product(&ctx, &unique("Second Pick")).await;

    for product_id in [first.id, second.id] {
        let (status, _, _) = ctx
            .request(
                "POST",
                "/api/wishlist",
                Some(&cookie),
                Some(json!({ "product_id": product_id })),
            )
            .await;
        assert_eq!(status, StatusCode::CREATED);
    }

    let (_, _, body) = ctx.request("GET", "/api/wishlist", Some(&cookie), None).await;
    let ids: Vec<i64> = body["products"]
        .as_array()
        .unwrap()
        .iter()
        .map(|p| p["id"].as_i64().unwrap())
        .collect();
    assert_eq!(ids, vec![first.id, second.id]);

    User::delete(&ctx.db, user_id).await.unwrap();
    Product::delete(&ctx.db, first.id).await.unwrap();
    Product::delete(&ctx.db, second.id).await.unwrap();
}

#[tokio::test]
async fn test_product_delete_cascades_wishlist() {
    let ctx = TestContext::new().await.unwrap();

    let username = unique("iris");
    let (_, body) = ctx.register(&username, &unique_email(), "pw123").await;
    let user_id = body["user_id"].as_i64().unwrap();
    let (_, _, cookie) = ctx.login(&username, "pw123").await;
    let cookie = cookie.unwrap();

    let product = seed_product(&ctx, &unique("Doomed Product")).await;

    let (status, _, _) = ctx
        .request(
            "POST",
            "/api/wishlist",
            Some(&cookie),
            Some(json!({ "product_id": product.id })),
        )
        .await;
    assert_eq!(status, StatusCode::CREATED);

    // Deleting the product empties it out of every wishlist
    let uri = format!("/api/products/{}", product.id);
    let (status, _, _) = ctx.request("DELETE", &uri, None, None).await;
    assert_eq!(status, StatusCode::OK);

    let (_, _, body) = ctx.request("GET", "/api/wishlist", Some(&cookie), None).await;
    assert_eq!(body["count"].as_u64().unwrap(), 0);

    User::delete(&ctx.db, user_id).await.unwrap();
}

#[tokio::test]
async fn test_user_delete_cascades_wishlist_and_ends_session() {
    let ctx = TestContext::new().await.unwrap();

    let username = unique("judy");
    let (_, body) = ctx.register(&username, &unique_email(), "pw123").await;
    let user_id = body["user_id"].as_i64().unwrap();
    let (_, _, cookie) = ctx.login(&username, "pw123").await;
    let cookie = cookie.unwrap();

    let product = seed_product(&ctx, &unique("Orphan Check")).await;

    let (status, _, _) = ctx
        .request(
            "POST",
            "/api/wishlist",
            Some(&cookie),
            Some(json!({ "product_id": product.id })),
        )
        .await;
    assert_eq!(status, StatusCode::CREATED);

    // Delete the account through the API
    let uri = format!("/api/users/{}", user_id);
    let (status, _, body) = ctx.request("DELETE", &uri, Some(&cookie), None).await;
    assert_eq!(status, StatusCode::OK, "delete failed: {}", body);

    // No wishlist rows survive the cascade
    let count = WishlistItem::count_for_user(&ctx.db, user_id).await.unwrap();
    assert_eq!(count, 0);

    // The flushed session no longer authenticates
    let (_, _, body) = ctx
        .request("GET", "/api/auth/status", Some(&cookie), None)
        .await;
    assert_eq!(body["authenticated"], false);

    Product::delete(&ctx.db, product.id).await.unwrap();
}

#[tokio::test]
async fn test_register_validation() {
    let ctx = TestContext::new().await.unwrap();

    // Missing password field entirely
    let (status, _, body) = ctx
        .request(
            "POST",
            "/api/register",
            None,
            Some(json!({ "username": unique("kate"), "email": unique_email() })),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["success"], false);

    // Malformed email
    let (status, body) = ctx
        .register(&unique("leo"), "not-an-email", "pw123")
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].as_str().unwrap().contains("email"));
}
