//! Integration tests for the session-backed cart and wishlist routes.

#![allow(clippy::unwrap_used, clippy::indexing_slicing)]

use axum::http::StatusCode;
use serde_json::json;

use orbit_integration_tests::{
    app_without_sessions, get, post_json, send, store, test_app, TestResponse,
};
use orbit_storefront::db::MemoryCatalog;

const HOST: &str = "toys.orbit360.com";

fn catalog() -> MemoryCatalog {
    MemoryCatalog::new().with_store(store(1, "toys"))
}

fn blocks() -> serde_json::Value {
    json!({ "id": 7, "name": "Blocks", "price": "19.99", "image": "https://cdn.orbit360.com/7.jpg" })
}

fn session_cookie(res: &TestResponse) -> String {
    res.cookie.clone().expect("session cookie is set")
}

// =============================================================================
// Cart
// =============================================================================

#[tokio::test]
async fn test_new_shopper_has_empty_cart() {
    let app = test_app(catalog());
    let res = send(&app, get("/api/cart", HOST, None)).await;

    assert_eq!(res.status, StatusCode::OK);
    assert_eq!(res.body["data"]["items"], json!([]));
    assert_eq!(res.body["data"]["totalItems"], 0);
    assert_eq!(res.body["data"]["subtotal"], "0");
}

#[tokio::test]
async fn test_cart_persists_across_requests() {
    let app = test_app(catalog());

    let res = send(&app, post_json("/api/cart/add", HOST, &blocks(), None)).await;
    assert_eq!(res.status, StatusCode::OK);
    let cookie = session_cookie(&res);
    assert!(cookie.starts_with("orbit_session="));

    let res = send(&app, post_json("/api/cart/add", HOST, &blocks(), Some(&cookie))).await;
    let data = &res.body["data"];
    assert_eq!(data["items"].as_array().unwrap().len(), 1);
    assert_eq!(data["items"][0]["quantity"], 2);
    assert_eq!(data["totalItems"], 2);
    assert_eq!(data["subtotal"], "39.98");

    let res = send(&app, get("/api/cart", HOST, Some(&cookie))).await;
    assert_eq!(res.body["data"]["totalItems"], 2);

    // Another shopper does not see it
    let res = send(&app, get("/api/cart", HOST, None)).await;
    assert_eq!(res.body["data"]["totalItems"], 0);
}

#[tokio::test]
async fn test_add_with_quantity() {
    let app = test_app(catalog());
    let body = json!({ "id": 3, "name": "Kite", "price": "12.50", "quantity": 3 });
    let res = send(&app, post_json("/api/cart/add", HOST, &body, None)).await;

    assert_eq!(res.body["data"]["items"][0]["quantity"], 3);
    assert_eq!(res.body["data"]["subtotal"], "37.50");
    assert!(res.body["data"]["items"][0].get("image").is_none());
}

#[tokio::test]
async fn test_add_rejects_invalid_lines() {
    let app = test_app(catalog());

    let body = json!({ "id": 1, "name": "  ", "price": "1.00" });
    let res = send(&app, post_json("/api/cart/add", HOST, &body, None)).await;
    assert_eq!(res.status, StatusCode::BAD_REQUEST);
    assert_eq!(res.body["success"], false);

    let body = json!({ "id": 1, "name": "Kite", "price": "-1.00" });
    let res = send(&app, post_json("/api/cart/add", HOST, &body, None)).await;
    assert_eq!(res.status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_add_rejects_price_beyond_catalog_range() {
    let app = test_app(catalog());
    let res = send(&app, post_json("/api/cart/add", HOST, &blocks(), None)).await;
    let cookie = session_cookie(&res);

    let body = json!({
        "id": 1,
        "name": "X",
        "price": "79228162514264337593543950335",
        "quantity": 2
    });
    let res = send(&app, post_json("/api/cart/add", HOST, &body, Some(&cookie))).await;
    assert_eq!(res.status, StatusCode::BAD_REQUEST);
    assert_eq!(
        res.body["message"],
        "Bad request: price must be between 0 and 9999999999.99"
    );

    let res = send(&app, get("/api/cart", HOST, Some(&cookie))).await;
    assert_eq!(res.status, StatusCode::OK);
    assert_eq!(res.body["data"]["totalItems"], 1);
    assert_eq!(res.body["data"]["subtotal"], "19.99");
}

#[tokio::test]
async fn test_update_quantity_and_remove() {
    let app = test_app(catalog());
    let res = send(&app, post_json("/api/cart/add", HOST, &blocks(), None)).await;
    let cookie = session_cookie(&res);

    let kite = json!({ "id": 8, "name": "Kite", "price": "5.00" });
    send(&app, post_json("/api/cart/add", HOST, &kite, Some(&cookie))).await;

    let res = send(
        &app,
        post_json("/api/cart/update", HOST, &json!({ "id": 7, "quantity": 4 }), Some(&cookie)),
    )
    .await;
    assert_eq!(res.body["data"]["items"][0]["quantity"], 4);
    assert_eq!(res.body["data"]["totalItems"], 5);

    // Unknown product is ignored
    let res = send(
        &app,
        post_json("/api/cart/update", HOST, &json!({ "id": 99, "quantity": 2 }), Some(&cookie)),
    )
    .await;
    assert_eq!(res.body["data"]["totalItems"], 5);

    // Below one removes the line
    let res = send(
        &app,
        post_json("/api/cart/update", HOST, &json!({ "id": 8, "quantity": -2 }), Some(&cookie)),
    )
    .await;
    assert_eq!(res.body["data"]["items"].as_array().unwrap().len(), 1);

    let res = send(
        &app,
        post_json("/api/cart/remove", HOST, &json!({ "id": 7 }), Some(&cookie)),
    )
    .await;
    assert_eq!(res.body["data"]["items"], json!([]));
}

#[tokio::test]
async fn test_clear_cart() {
    let app = test_app(catalog());
    let res = send(&app, post_json("/api/cart/add", HOST, &blocks(), None)).await;
    let cookie = session_cookie(&res);

    let res = send(&app, post_json("/api/cart/clear", HOST, &json!({}), Some(&cookie))).await;
    assert_eq!(res.status, StatusCode::OK);
    assert_eq!(res.body["data"]["totalItems"], 0);

    let res = send(&app, get("/api/cart", HOST, Some(&cookie))).await;
    assert_eq!(res.body["data"]["items"], json!([]));
}

// =============================================================================
// Wishlist
// =============================================================================

#[tokio::test]
async fn test_wishlist_add_is_idempotent() {
    let app = test_app(catalog());

    let res = send(&app, post_json("/api/wishlist/add", HOST, &json!({ "id": 5 }), None)).await;
    let cookie = session_cookie(&res);
    assert_eq!(res.body["data"]["items"], json!([5]));

    let res = send(
        &app,
        post_json("/api/wishlist/add", HOST, &json!({ "id": 5 }), Some(&cookie)),
    )
    .await;
    assert_eq!(res.body["data"]["items"], json!([5]));
    assert_eq!(res.body["data"]["count"], 1);

    let res = send(
        &app,
        post_json("/api/wishlist/add", HOST, &json!({ "id": 2 }), Some(&cookie)),
    )
    .await;
    assert_eq!(res.body["data"]["items"], json!([5, 2]));
}

#[tokio::test]
async fn test_wishlist_status_and_remove() {
    let app = test_app(catalog());
    let res = send(&app, post_json("/api/wishlist/add", HOST, &json!({ "id": 5 }), None)).await;
    let cookie = session_cookie(&res);

    let res = send(&app, get("/api/wishlist/5", HOST, Some(&cookie))).await;
    assert_eq!(res.body["data"], json!({ "id": 5, "inWishlist": true }));

    let res = send(&app, get("/api/wishlist/6", HOST, Some(&cookie))).await;
    assert_eq!(res.body["data"]["inWishlist"], false);

    let res = send(
        &app,
        post_json("/api/wishlist/remove", HOST, &json!({ "id": 5 }), Some(&cookie)),
    )
    .await;
    assert_eq!(res.body["data"]["count"], 0);

    let res = send(&app, get("/api/wishlist", HOST, Some(&cookie))).await;
    assert_eq!(res.body["data"]["items"], json!([]));
}

#[tokio::test]
async fn test_wishlist_clear_leaves_cart_alone() {
    let app = test_app(catalog());
    let res = send(&app, post_json("/api/cart/add", HOST, &blocks(), None)).await;
    let cookie = session_cookie(&res);
    for id in [3, 4] {
        send(
            &app,
            post_json("/api/wishlist/add", HOST, &json!({ "id": id }), Some(&cookie)),
        )
        .await;
    }

    let res = send(
        &app,
        post_json("/api/wishlist/clear", HOST, &json!({}), Some(&cookie)),
    )
    .await;
    assert_eq!(res.status, StatusCode::OK);
    assert_eq!(res.body["data"], json!({ "items": [], "count": 0 }));

    let res = send(&app, get("/api/wishlist/3", HOST, Some(&cookie))).await;
    assert_eq!(res.body["data"]["inWishlist"], false);

    let res = send(&app, get("/api/cart", HOST, Some(&cookie))).await;
    assert_eq!(res.body["data"]["totalItems"], 1);
}

// =============================================================================
// Session
// =============================================================================

#[tokio::test]
async fn test_sign_out_forgets_cart_and_wishlist() {
    let app = test_app(catalog());
    let res = send(&app, post_json("/api/cart/add", HOST, &blocks(), None)).await;
    let cookie = session_cookie(&res);
    send(
        &app,
        post_json("/api/wishlist/add", HOST, &json!({ "id": 7 }), Some(&cookie)),
    )
    .await;

    let res = send(
        &app,
        post_json("/api/session/sign-out", HOST, &json!({}), Some(&cookie)),
    )
    .await;
    assert_eq!(res.status, StatusCode::OK);
    assert_eq!(res.body["success"], true);

    let res = send(&app, get("/api/cart", HOST, Some(&cookie))).await;
    assert_eq!(res.body["data"]["totalItems"], 0);

    let res = send(&app, get("/api/wishlist", HOST, Some(&cookie))).await;
    assert_eq!(res.body["data"]["count"], 0);
}

#[tokio::test]
async fn test_missing_session_layer_fails_loudly() {
    let app = app_without_sessions(catalog());

    let res = send(&app, get("/api/cart", HOST, None)).await;
    assert_eq!(res.status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(res.body["success"], false);
    assert_eq!(res.body["message"], "Internal server error");

    let res = send(&app, post_json("/api/wishlist/add", HOST, &json!({ "id": 1 }), None)).await;
    assert_eq!(res.status, StatusCode::INTERNAL_SERVER_ERROR);
}
