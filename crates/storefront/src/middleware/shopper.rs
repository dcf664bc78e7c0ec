//! Session extractor for cart and wishlist routes.

use axum::{extract::FromRequestParts, http::request::Parts};
use tower_sessions::Session;

use crate::error::AppError;

/// Extractor for the shopper's session.
///
/// A missing session means the session layer was not installed on the
/// router. That is a wiring bug, so the request fails with a 500 and the
/// error is reported instead of silently dropping cart changes.
pub struct ShopperSession(pub Session);

impl<S> FromRequestParts<S> for ShopperSession
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<Session>()
            .cloned()
            .map(Self)
            .ok_or_else(|| AppError::Internal("session layer is not installed".to_string()))
    }
}
