//! Cart route handlers.
//!
//! The cart lives in the shopper's session as a JSON array of line items and
//! is written back in full after every change.

use axum::Json;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::instrument;

use orbit_core::{Cart, CartItem, ProductId};

use super::ApiResponse;
use crate::error::{AppError, Result, add_breadcrumb};
use crate::middleware::ShopperSession;
use crate::services::CartStore;

/// Cart contents with totals.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CartView {
    pub items: Vec<CartItem>,
    pub total_items: u64,
    pub subtotal: Decimal,
}

impl From<&Cart> for CartView {
    fn from(cart: &Cart) -> Self {
        Self {
            items: cart.items().to_vec(),
            total_items: cart.total_items(),
            subtotal: cart.subtotal(),
        }
    }
}

/// Add to cart request body.
#[derive(Debug, Deserialize)]
pub struct AddToCartRequest {
    pub id: ProductId,
    pub name: String,
    pub price: Decimal,
    #[serde(default)]
    pub image: Option<String>,
    /// Units to add, one when omitted.
    #[serde(default)]
    pub quantity: Option<u32>,
}

/// Update quantity request body.
#[derive(Debug, Deserialize)]
pub struct UpdateCartRequest {
    pub id: ProductId,
    /// New quantity; anything below one removes the line.
    pub quantity: i64,
}

/// Remove from cart request body.
#[derive(Debug, Deserialize)]
pub struct RemoveFromCartRequest {
    pub id: ProductId,
}

/// Current cart.
#[instrument(skip(session))]
pub async fn show(ShopperSession(session): ShopperSession) -> Json<ApiResponse<CartView>> {
    let store = CartStore::open(session).await;
    ApiResponse::ok(CartView::from(store.cart()))
}

/// Add a product to the cart.
#[instrument(skip(session))]
pub async fn add(
    ShopperSession(session): ShopperSession,
    Json(request): Json<AddToCartRequest>,
) -> Result<Json<ApiResponse<CartView>>> {
    if request.name.trim().is_empty() {
        return Err(AppError::BadRequest("name is required".to_string()));
    }

    let product_id = request.id.to_string();
    add_breadcrumb("cart", "Added to cart", Some(&[("product_id", product_id.as_str())]));

    let mut store = CartStore::open(session).await;
    let cart = store
        .add(CartItem {
            id: request.id,
            name: request.name,
            price: request.price,
            image: request.image,
            quantity: request.quantity.unwrap_or(1),
        })
        .await?;

    Ok(ApiResponse::ok(CartView::from(cart)))
}

/// Change a line's quantity.
#[instrument(skip(session))]
pub async fn update(
    ShopperSession(session): ShopperSession,
    Json(request): Json<UpdateCartRequest>,
) -> Result<Json<ApiResponse<CartView>>> {
    let quantity = u32::try_from(request.quantity.max(0)).unwrap_or(u32::MAX);

    let mut store = CartStore::open(session).await;
    let cart = store.update_quantity(request.id, quantity).await?;

    Ok(ApiResponse::ok(CartView::from(cart)))
}

/// Remove a line.
#[instrument(skip(session))]
pub async fn remove(
    ShopperSession(session): ShopperSession,
    Json(request): Json<RemoveFromCartRequest>,
) -> Result<Json<ApiResponse<CartView>>> {
    let mut store = CartStore::open(session).await;
    let cart = store.remove(request.id).await?;

    Ok(ApiResponse::ok(CartView::from(cart)))
}

/// Empty the cart.
#[instrument(skip(session))]
pub async fn clear(ShopperSession(session): ShopperSession) -> Result<Json<ApiResponse<CartView>>> {
    let mut store = CartStore::open(session).await;
    let cart = store.clear().await?;

    Ok(ApiResponse::ok(CartView::from(cart)))
}
