//! Wishlist route handlers.

use axum::{Json, extract::Path};
use serde::{Deserialize, Serialize};
use tracing::instrument;

use orbit_core::{ProductId, Wishlist};

use super::ApiResponse;
use crate::error::Result;
use crate::middleware::ShopperSession;
use crate::services::WishlistStore;

/// Wishlist contents.
#[derive(Debug, Serialize)]
pub struct WishlistView {
    pub items: Vec<ProductId>,
    pub count: usize,
}

impl From<&Wishlist> for WishlistView {
    fn from(wishlist: &Wishlist) -> Self {
        Self {
            items: wishlist.ids().to_vec(),
            count: wishlist.len(),
        }
    }
}

/// Whether one product is on the wishlist.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WishlistStatus {
    pub id: ProductId,
    pub in_wishlist: bool,
}

/// Add or remove request body.
#[derive(Debug, Deserialize)]
pub struct WishlistRequest {
    pub id: ProductId,
}

/// Current wishlist.
#[instrument(skip(session))]
pub async fn show(ShopperSession(session): ShopperSession) -> Json<ApiResponse<WishlistView>> {
    let store = WishlistStore::open(session).await;
    ApiResponse::ok(WishlistView::from(store.wishlist()))
}

/// Add a product.
#[instrument(skip(session))]
pub async fn add(
    ShopperSession(session): ShopperSession,
    Json(request): Json<WishlistRequest>,
) -> Result<Json<ApiResponse<WishlistView>>> {
    let mut store = WishlistStore::open(session).await;
    let wishlist = store.add(request.id).await?;
    Ok(ApiResponse::ok(WishlistView::from(wishlist)))
}

/// Remove a product.
#[instrument(skip(session))]
pub async fn remove(
    ShopperSession(session): ShopperSession,
    Json(request): Json<WishlistRequest>,
) -> Result<Json<ApiResponse<WishlistView>>> {
    let mut store = WishlistStore::open(session).await;
    let wishlist = store.remove(request.id).await?;
    Ok(ApiResponse::ok(WishlistView::from(wishlist)))
}

/// Empty the wishlist.
#[instrument(skip(session))]
pub async fn clear(
    ShopperSession(session): ShopperSession,
) -> Result<Json<ApiResponse<WishlistView>>> {
    let mut store = WishlistStore::open(session).await;
    let wishlist = store.clear().await?;
    Ok(ApiResponse::ok(WishlistView::from(wishlist)))
}

/// Whether a product is on the wishlist.
#[instrument(skip(session))]
pub async fn status(
    ShopperSession(session): ShopperSession,
    Path(id): Path<i32>,
) -> Json<ApiResponse<WishlistStatus>> {
    let id = ProductId::new(id);
    let store = WishlistStore::open(session).await;
    ApiResponse::ok(WishlistStatus {
        id,
        in_wishlist: store.contains(id),
    })
}
