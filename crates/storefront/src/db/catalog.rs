//! Read-only catalog access shared by handlers and services.
//!
//! Handlers never hold a `PgPool` directly; they go through [`Catalog`] so
//! the router can also run against [`super::MemoryCatalog`].

use async_trait::async_trait;
use sqlx::PgPool;

use orbit_core::{ProductId, StoreId, Subdomain};

use super::RepositoryError;
use super::customizations::CustomizationRepository;
use super::products::ProductRepository;
use super::reviews::ReviewRepository;
use super::stores::StoreRepository;
use crate::models::{Product, ProductPage, ProductQuery, Review, Store};

/// Storefront read model.
#[async_trait]
pub trait Catalog: Send + Sync {
    /// Check that the backing store is reachable.
    async fn ping(&self) -> Result<(), RepositoryError>;

    /// Store with this subdomain, active or not.
    async fn store_by_subdomain(
        &self,
        subdomain: &Subdomain,
    ) -> Result<Option<Store>, RepositoryError>;

    /// Store claiming this custom domain, active or not.
    async fn store_by_custom_domain(&self, domain: &str) -> Result<Option<Store>, RepositoryError>;

    /// Raw customization document saved for a store.
    async fn customization(
        &self,
        store_id: StoreId,
    ) -> Result<Option<serde_json::Value>, RepositoryError>;

    /// One page of a store's active products.
    async fn products(
        &self,
        store_id: StoreId,
        query: &ProductQuery,
    ) -> Result<ProductPage, RepositoryError>;

    /// One active product of a store.
    async fn product(
        &self,
        store_id: StoreId,
        product_id: ProductId,
    ) -> Result<Option<Product>, RepositoryError>;

    /// Newest active products, optionally in one category.
    async fn section_products(
        &self,
        store_id: StoreId,
        category: Option<&str>,
        limit: u32,
    ) -> Result<Vec<Product>, RepositoryError>;

    /// Distinct categories of a store's active products, sorted.
    async fn categories(&self, store_id: StoreId) -> Result<Vec<String>, RepositoryError>;

    /// A product's reviews, newest first.
    async fn reviews(&self, product_id: ProductId) -> Result<Vec<Review>, RepositoryError>;
}

/// [`Catalog`] backed by the storefront `PostgreSQL` database.
#[derive(Clone)]
pub struct PgCatalog {
    pool: PgPool,
}

impl PgCatalog {
    #[must_use]
    pub const fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Get a reference to the database connection pool.
    #[must_use]
    pub const fn pool(&self) -> &PgPool {
        &self.pool
    }
}

#[async_trait]
impl Catalog for PgCatalog {
    async fn ping(&self) -> Result<(), RepositoryError> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }

    async fn store_by_subdomain(
        &self,
        subdomain: &Subdomain,
    ) -> Result<Option<Store>, RepositoryError> {
        StoreRepository::new(&self.pool)
            .get_by_subdomain(subdomain)
            .await
    }

    async fn store_by_custom_domain(&self, domain: &str) -> Result<Option<Store>, RepositoryError> {
        StoreRepository::new(&self.pool)
            .get_by_custom_domain(domain)
            .await
    }

    async fn customization(
        &self,
        store_id: StoreId,
    ) -> Result<Option<serde_json::Value>, RepositoryError> {
        CustomizationRepository::new(&self.pool)
            .get_document(store_id)
            .await
    }

    async fn products(
        &self,
        store_id: StoreId,
        query: &ProductQuery,
    ) -> Result<ProductPage, RepositoryError> {
        ProductRepository::new(&self.pool).list(store_id, query).await
    }

    async fn product(
        &self,
        store_id: StoreId,
        product_id: ProductId,
    ) -> Result<Option<Product>, RepositoryError> {
        ProductRepository::new(&self.pool)
            .get(store_id, product_id)
            .await
    }

    async fn section_products(
        &self,
        store_id: StoreId,
        category: Option<&str>,
        limit: u32,
    ) -> Result<Vec<Product>, RepositoryError> {
        ProductRepository::new(&self.pool)
            .list_for_section(store_id, category, limit)
            .await
    }

    async fn categories(&self, store_id: StoreId) -> Result<Vec<String>, RepositoryError> {
        ProductRepository::new(&self.pool).categories(store_id).await
    }

    async fn reviews(&self, product_id: ProductId) -> Result<Vec<Review>, RepositoryError> {
        ReviewRepository::new(&self.pool)
            .list_for_product(product_id)
            .await
    }
}
