//! HTTP route handlers for the storefront API.
//!
//! # Route Structure
//!
//! ```text
//! GET  /health                     - Liveness check
//! GET  /health/ready               - Readiness check (catalog reachable)
//!
//! # Store (resolved from ?domain= or Host)
//! GET  /api/store                  - Store information
//! GET  /api/store/customization    - Customization merged over defaults
//! GET  /api/store/theme            - Theme slug and category
//! GET  /api/store/page             - Store, customization, categories and sections
//!
//! # Catalog
//! GET  /api/products               - Product listing (?category&search&limit&offset)
//! GET  /api/products/{id}          - Product detail
//! GET  /api/products/{id}/reviews  - Reviews with rating statistics
//! GET  /api/categories             - Distinct product categories
//!
//! # Cart (session)
//! GET  /api/cart                   - Cart with totals
//! POST /api/cart/add               - Add units of a product
//! POST /api/cart/update            - Set a line's quantity
//! POST /api/cart/remove            - Remove a line
//! POST /api/cart/clear             - Empty the cart
//!
//! # Wishlist (session)
//! GET  /api/wishlist               - Wishlist ids
//! POST /api/wishlist/add           - Add a product
//! POST /api/wishlist/remove        - Remove a product
//! POST /api/wishlist/clear         - Empty the wishlist
//! GET  /api/wishlist/{id}          - Whether a product is on the wishlist
//!
//! # Session
//! POST /api/session/sign-out       - Forget cart and wishlist
//! ```
//!
//! Successful responses are wrapped as `{"success": true, "data": ...}`.

pub mod cart;
pub mod health;
pub mod products;
pub mod session;
pub mod store;
pub mod wishlist;

use axum::{
    Json, Router, middleware as axum_middleware,
    routing::{get, post},
};
use serde::Serialize;
use tower_http::trace::TraceLayer;

use crate::middleware::{api_rate_limiter, request_id_middleware};
use crate::state::AppState;

/// Success envelope for API responses.
#[derive(Debug, Serialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    pub data: T,
}

impl<T> ApiResponse<T> {
    /// Wrap `data` in a success envelope.
    pub const fn ok(data: T) -> Json<Self> {
        Json(Self {
            success: true,
            data,
        })
    }
}

/// Create the store routes router.
pub fn store_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(store::show))
        .route("/customization", get(store::customization))
        .route("/theme", get(store::theme))
        .route("/page", get(store::page))
}

/// Create the product routes router.
pub fn product_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(products::index))
        .route("/{id}", get(products::show))
        .route("/{id}/reviews", get(products::reviews))
}

/// Create the cart routes router.
pub fn cart_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(cart::show))
        .route("/add", post(cart::add))
        .route("/update", post(cart::update))
        .route("/remove", post(cart::remove))
        .route("/clear", post(cart::clear))
}

/// Create the wishlist routes router.
pub fn wishlist_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(wishlist::show))
        .route("/add", post(wishlist::add))
        .route("/remove", post(wishlist::remove))
        .route("/clear", post(wishlist::clear))
        .route("/{id}", get(wishlist::status))
}

/// Create all `/api` routes.
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/store", store_routes())
        .nest("/products", product_routes())
        .route("/categories", get(products::categories))
        .nest("/cart", cart_routes())
        .nest("/wishlist", wishlist_routes())
        .route("/session/sign-out", post(session::sign_out))
}

/// Create all routes for the storefront.
pub fn routes() -> Router<AppState> {
    with_health(api_routes())
}

fn with_health(api: Router<AppState>) -> Router<AppState> {
    Router::new()
        .route("/health", get(health::health))
        .route("/health/ready", get(health::readiness))
        .nest("/api", api)
}

/// Build the storefront application with tracing and request IDs.
///
/// The caller adds the session layer (and, in production, Sentry) on top.
pub fn app(state: AppState) -> Router {
    finish(routes(), state)
}

/// Like [`app`], with per-client rate limiting on the `/api` routes.
///
/// Health checks are not limited.
pub fn rate_limited_app(state: AppState) -> Router {
    finish(with_health(api_routes().layer(api_rate_limiter())), state)
}

fn finish(router: Router<AppState>, state: AppState) -> Router {
    router
        .layer(axum_middleware::from_fn(request_id_middleware))
        .layer(TraceLayer::new_for_http().make_span_with(
            |request: &axum::http::Request<axum::body::Body>| {
                tracing::info_span!(
                    "request",
                    method = %request.method(),
                    uri = %request.uri(),
                    request_id = tracing::field::Empty,
                    store = tracing::field::Empty,
                )
            },
        ))
        .with_state(state)
}
