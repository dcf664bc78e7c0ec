//! Store extractor for store-scoped routes.
//!
//! The store is taken from the `domain` query parameter when present,
//! otherwise from the `Host` header.

use axum::{
    extract::FromRequestParts,
    http::{HeaderMap, Uri, header, request::Parts},
};
use tracing::Span;

use crate::error::AppError;
use crate::models::Store;
use crate::state::AppState;

/// Query parameter that overrides the `Host` header.
pub const DOMAIN_PARAM: &str = "domain";

/// Extractor for the active store serving this request.
///
/// Rejects with `404 Store not found` when no active store matches.
///
/// # Example
///
/// ```rust,ignore
/// async fn handler(CurrentStore(store): CurrentStore) -> impl IntoResponse {
///     store.name
/// }
/// ```
pub struct CurrentStore(pub Store);

impl FromRequestParts<AppState> for CurrentStore {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let host = request_host(&parts.uri, &parts.headers).ok_or(AppError::StoreNotFound)?;
        let store = state.tenants().resolve(&host).await?;

        Span::current().record("store", store.subdomain.as_str());
        sentry::configure_scope(|scope| {
            scope.set_tag("store", store.subdomain.as_str());
        });

        Ok(Self(store))
    }
}

/// The host a request addresses: `?domain=` first, then `Host`, then the URI authority.
#[must_use]
pub fn request_host(uri: &Uri, headers: &HeaderMap) -> Option<String> {
    domain_param(uri.query())
        .or_else(|| {
            headers
                .get(header::HOST)
                .and_then(|h| h.to_str().ok())
                .filter(|h| !h.trim().is_empty())
                .map(String::from)
        })
        .or_else(|| uri.host().map(String::from))
}

fn domain_param(query: Option<&str>) -> Option<String> {
    url::form_urlencoded::parse(query?.as_bytes())
        .find(|(key, _)| key == DOMAIN_PARAM)
        .map(|(_, value)| value.trim().to_string())
        .filter(|value| !value.is_empty())
}
