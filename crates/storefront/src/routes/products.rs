//! Product and category route handlers.

use axum::{
    Json,
    extract::{Path, Query, State},
};
use tracing::instrument;

use orbit_core::{ProductId, StoreId};

use super::ApiResponse;
use crate::error::{AppError, Result};
use crate::middleware::CurrentStore;
use crate::models::{Product, ProductPage, ProductQuery, ProductReviews};
use crate::state::AppState;

/// Product listing with optional `category`, `search`, `limit` and `offset`.
#[instrument(skip(state, store), fields(store = %store.subdomain))]
pub async fn index(
    State(state): State<AppState>,
    CurrentStore(store): CurrentStore,
    Query(query): Query<ProductQuery>,
) -> Result<Json<ApiResponse<ProductPage>>> {
    let page = state.catalog().products(store.id, &query).await?;
    Ok(ApiResponse::ok(page))
}

/// A single active product of the store.
#[instrument(skip(state, store), fields(store = %store.subdomain))]
pub async fn show(
    State(state): State<AppState>,
    CurrentStore(store): CurrentStore,
    Path(id): Path<i32>,
) -> Result<Json<ApiResponse<Product>>> {
    let product = find_product(&state, store.id, ProductId::new(id)).await?;
    Ok(ApiResponse::ok(product))
}

/// A product's reviews with rating statistics.
#[instrument(skip(state, store), fields(store = %store.subdomain))]
pub async fn reviews(
    State(state): State<AppState>,
    CurrentStore(store): CurrentStore,
    Path(id): Path<i32>,
) -> Result<Json<ApiResponse<ProductReviews>>> {
    let product = find_product(&state, store.id, ProductId::new(id)).await?;
    let reviews = state.catalog().reviews(product.id).await?;
    Ok(ApiResponse::ok(ProductReviews::new(reviews)))
}

/// Distinct categories of the store's active products.
#[instrument(skip_all, fields(store = %store.subdomain))]
pub async fn categories(
    State(state): State<AppState>,
    CurrentStore(store): CurrentStore,
) -> Result<Json<ApiResponse<Vec<String>>>> {
    let categories = state.catalog().categories(store.id).await?;
    Ok(ApiResponse::ok(categories))
}

async fn find_product(
    state: &AppState,
    store_id: StoreId,
    id: ProductId,
) -> Result<Product> {
    state
        .catalog()
        .product(store_id, id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("product {id}")))
}
