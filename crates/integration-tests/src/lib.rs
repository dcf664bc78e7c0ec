//! Integration test fixtures for the Orbit storefront.
//!
//! Tests drive the real router with `tower::ServiceExt::oneshot` against an
//! in-memory catalog and an in-memory session store, so no database or
//! network is needed.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p orbit-integration-tests
//! ```

use std::str::FromStr;
use std::sync::Arc;
use std::time::Duration;

use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode, header};
use chrono::{TimeDelta, Utc};
use rust_decimal::Decimal;
use secrecy::SecretString;
use serde_json::Value;
use tower::ServiceExt;
use tower_sessions::MemoryStore;
use url::Url;

use orbit_core::{ProductId, ReviewId, StoreId, Subdomain, UserId};
use orbit_storefront::config::{StorefrontConfig, TenancyConfig};
use orbit_storefront::db::Catalog;
use orbit_storefront::middleware::session_layer;
use orbit_storefront::models::{Product, Review, Store};
use orbit_storefront::routes;
use orbit_storefront::state::AppState;

/// Platform domain used by every fixture.
pub const BASE_DOMAIN: &str = "orbit360.com";

// =============================================================================
// Domain Fixtures
// =============================================================================

/// An active store on `<subdomain>.orbit360.com`.
///
/// # Panics
///
/// Panics if `subdomain` is not a valid label.
#[must_use]
pub fn store(id: i32, subdomain: &str) -> Store {
    Store {
        id: StoreId::new(id),
        subdomain: Subdomain::parse(subdomain).expect("fixture subdomain is valid"),
        custom_domain: None,
        name: format!("Store {subdomain}"),
        category: Some("toys".to_string()),
        description: None,
        logo: None,
        theme: Some("playful".to_string()),
        is_active: true,
        owner_id: UserId::new(1),
        created_at: Utc::now(),
    }
}

/// An active product created `age_minutes` ago.
///
/// # Panics
///
/// Panics if `price` is not a decimal.
#[must_use]
pub fn product(id: i32, store_id: i32, category: &str, price: &str, age_minutes: i64) -> Product {
    Product {
        id: ProductId::new(id),
        store_id: StoreId::new(store_id),
        name: format!("Product {id}"),
        description: Some(format!("A {category} product")),
        price: Decimal::from_str(price).expect("fixture price is a decimal"),
        compare_at_price: None,
        category: Some(category.to_string()),
        sku: Some(format!("SKU-{id}")),
        stock: 10,
        images: vec![format!("https://cdn.orbit360.com/products/{id}.jpg")],
        is_active: true,
        created_at: Utc::now() - TimeDelta::minutes(age_minutes),
    }
}

/// A review posted `age_minutes` ago.
#[must_use]
pub fn review(id: i32, product_id: i32, rating: i32, age_minutes: i64) -> Review {
    Review {
        id: ReviewId::new(id),
        product_id: ProductId::new(product_id),
        reviewer_name: format!("Reviewer {id}"),
        rating,
        title: None,
        comment: Some("Great".to_string()),
        verified: true,
        helpful_count: 0,
        created_at: Utc::now() - TimeDelta::minutes(age_minutes),
    }
}

// =============================================================================
// Application Fixtures
// =============================================================================

/// Configuration routing `*.orbit360.com` with no default store.
///
/// # Panics
///
/// Never in practice; the literals are valid.
#[must_use]
pub fn test_config() -> StorefrontConfig {
    StorefrontConfig {
        database_url: SecretString::from("postgres://unused"),
        host: "127.0.0.1".parse().expect("literal address"),
        port: 3000,
        base_url: Url::parse("http://localhost:3000").expect("literal url"),
        tenancy: TenancyConfig {
            base_domain: Some(BASE_DOMAIN.to_string()),
            default_subdomain: None,
            cache_ttl: Duration::from_secs(60),
        },
        sentry_dsn: None,
        sentry_environment: None,
        sentry_sample_rate: 1.0,
        sentry_traces_sample_rate: 0.0,
    }
}

/// The storefront router over `catalog`, without a session layer.
pub fn app_without_sessions(catalog: impl Catalog + 'static) -> Router {
    routes::app(AppState::new(test_config(), Arc::new(catalog)))
}

/// The storefront router over `catalog` with in-memory sessions.
///
/// Clones of the returned router share the session store.
pub fn test_app(catalog: impl Catalog + 'static) -> Router {
    app_without_sessions(catalog).layer(session_layer(MemoryStore::default(), false))
}

// =============================================================================
// Request Helpers
// =============================================================================

/// A decoded response.
#[derive(Debug)]
pub struct TestResponse {
    pub status: StatusCode,
    pub body: Value,
    /// `name=value` of the session cookie, if one was set.
    pub cookie: Option<String>,
}

/// GET `uri` with the given `Host`.
///
/// # Panics
///
/// Panics if the request cannot be built.
#[must_use]
pub fn get(uri: &str, host: &str, cookie: Option<&str>) -> Request<Body> {
    let mut builder = Request::get(uri).header(header::HOST, host);
    if let Some(cookie) = cookie {
        builder = builder.header(header::COOKIE, cookie);
    }
    builder.body(Body::empty()).expect("valid request")
}

/// POST a JSON `body` to `uri` with the given `Host`.
///
/// # Panics
///
/// Panics if the request cannot be built.
#[must_use]
pub fn post_json(uri: &str, host: &str, body: &Value, cookie: Option<&str>) -> Request<Body> {
    let mut builder = Request::post(uri)
        .header(header::HOST, host)
        .header(header::CONTENT_TYPE, "application/json");
    if let Some(cookie) = cookie {
        builder = builder.header(header::COOKIE, cookie);
    }
    builder
        .body(Body::from(body.to_string()))
        .expect("valid request")
}

/// Send `request` through a clone of `app` and decode the JSON body.
///
/// Non-JSON bodies decode to `Value::String`.
///
/// # Panics
///
/// Panics if the router fails or the body cannot be read.
pub async fn send(app: &Router, request: Request<Body>) -> TestResponse {
    let response = app.clone().oneshot(request).await.expect("router is infallible");

    let status = response.status();
    let cookie = response
        .headers()
        .get(header::SET_COOKIE)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.split(';').next())
        .map(String::from);

    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("body is readable");
    let body = serde_json::from_slice(&bytes)
        .unwrap_or_else(|_| Value::String(String::from_utf8_lossy(&bytes).into_owned()));

    TestResponse {
        status,
        body,
        cookie,
    }
}
