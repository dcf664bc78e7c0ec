//! Store route handlers: store info, customization, theme and the full page.

use axum::{Json, extract::State};
use serde::Serialize;
use tracing::instrument;

use orbit_core::ResolvedCustomization;

use super::ApiResponse;
use crate::error::Result;
use crate::middleware::CurrentStore;
use crate::models::Store;
use crate::services::{StorePage, load_customization, load_page};
use crate::state::AppState;

/// Theme selection for the renderer.
#[derive(Debug, Serialize)]
pub struct ThemeInfo {
    /// Theme slug, `None` for the platform default theme.
    pub slug: Option<String>,
    /// Store category the theme family belongs to.
    pub category: Option<String>,
}

/// Resolved store information.
#[instrument(skip_all, fields(store = %store.subdomain))]
pub async fn show(CurrentStore(store): CurrentStore) -> Json<ApiResponse<Store>> {
    ApiResponse::ok(store)
}

/// The store's customization merged over the defaults.
#[instrument(skip_all, fields(store = %store.subdomain))]
pub async fn customization(
    State(state): State<AppState>,
    CurrentStore(store): CurrentStore,
) -> Result<Json<ApiResponse<ResolvedCustomization>>> {
    let customization = load_customization(state.catalog(), store.id).await?;
    Ok(ApiResponse::ok(customization))
}

/// The store's theme slug and category.
#[instrument(skip_all, fields(store = %store.subdomain))]
pub async fn theme(CurrentStore(store): CurrentStore) -> Json<ApiResponse<ThemeInfo>> {
    ApiResponse::ok(ThemeInfo {
        slug: store.theme,
        category: store.category,
    })
}

/// Everything a storefront page needs in one response.
///
/// Data that fails to load is reported in `notices` rather than failing
/// the request.
#[instrument(skip_all, fields(store = %store.subdomain))]
pub async fn page(
    State(state): State<AppState>,
    CurrentStore(store): CurrentStore,
) -> Json<ApiResponse<StorePage>> {
    ApiResponse::ok(load_page(state.catalog_handle(), store).await)
}
