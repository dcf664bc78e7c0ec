//! Shopper session handlers.

use axum::Json;
use tracing::{info, instrument};

use super::ApiResponse;
use crate::error::Result;
use crate::middleware::ShopperSession;
use crate::services::sign_out as forget_shopper;

/// Forget the shopper's cart and wishlist.
#[instrument(skip(session))]
pub async fn sign_out(ShopperSession(session): ShopperSession) -> Result<Json<ApiResponse<()>>> {
    forget_shopper(&session).await?;
    info!("shopper signed out");
    Ok(ApiResponse::ok(()))
}
