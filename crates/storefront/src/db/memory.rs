//! In-memory [`Catalog`] for tests and local development.

use std::collections::{BTreeSet, HashMap};

use async_trait::async_trait;

use orbit_core::{ProductId, StoreId, Subdomain};

use super::{Catalog, RepositoryError};
use crate::models::{Pagination, Product, ProductPage, ProductQuery, Review, Store};

/// A fixed catalog held in memory, filtered the same way the SQL queries are.
#[derive(Debug, Clone, Default)]
pub struct MemoryCatalog {
    stores: Vec<Store>,
    customizations: HashMap<StoreId, serde_json::Value>,
    products: Vec<Product>,
    reviews: Vec<Review>,
}

impl MemoryCatalog {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_store(mut self, store: Store) -> Self {
        self.stores.push(store);
        self
    }

    #[must_use]
    pub fn with_customization(mut self, store_id: StoreId, document: serde_json::Value) -> Self {
        self.customizations.insert(store_id, document);
        self
    }

    #[must_use]
    pub fn with_product(mut self, product: Product) -> Self {
        self.products.push(product);
        self
    }

    #[must_use]
    pub fn with_review(mut self, review: Review) -> Self {
        self.reviews.push(review);
        self
    }

    /// Active products of a store, newest first.
    fn active_products(&self, store_id: StoreId) -> Vec<&Product> {
        let mut products: Vec<&Product> = self
            .products
            .iter()
            .filter(|p| p.store_id == store_id && p.is_active)
            .collect();
        products.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(b.id.cmp(&a.id)));
        products
    }
}

fn contains_ignore_case(haystack: &str, needle: &str) -> bool {
    haystack.to_lowercase().contains(&needle.to_lowercase())
}

#[async_trait]
impl Catalog for MemoryCatalog {
    async fn ping(&self) -> Result<(), RepositoryError> {
        Ok(())
    }

    async fn store_by_subdomain(
        &self,
        subdomain: &Subdomain,
    ) -> Result<Option<Store>, RepositoryError> {
        Ok(self
            .stores
            .iter()
            .find(|s| &s.subdomain == subdomain)
            .cloned())
    }

    async fn store_by_custom_domain(&self, domain: &str) -> Result<Option<Store>, RepositoryError> {
        Ok(self
            .stores
            .iter()
            .find(|s| {
                s.custom_domain
                    .as_deref()
                    .is_some_and(|d| d.eq_ignore_ascii_case(domain))
            })
            .cloned())
    }

    async fn customization(
        &self,
        store_id: StoreId,
    ) -> Result<Option<serde_json::Value>, RepositoryError> {
        Ok(self.customizations.get(&store_id).cloned())
    }

    async fn products(
        &self,
        store_id: StoreId,
        query: &ProductQuery,
    ) -> Result<ProductPage, RepositoryError> {
        let matching: Vec<&Product> = self
            .active_products(store_id)
            .into_iter()
            .filter(|p| query.category().is_none_or(|c| p.category.as_deref() == Some(c)))
            .filter(|p| {
                query.search().is_none_or(|term| {
                    contains_ignore_case(&p.name, term)
                        || p.description
                            .as_deref()
                            .is_some_and(|d| contains_ignore_case(d, term))
                })
            })
            .collect();

        let limit = query.limit();
        let offset = query.offset();
        let products = matching
            .iter()
            .skip(usize::try_from(offset).unwrap_or(usize::MAX))
            .take(usize::try_from(limit).unwrap_or(usize::MAX))
            .map(|p| (*p).clone())
            .collect();

        Ok(ProductPage {
            products,
            pagination: Pagination::new(
                u64::try_from(matching.len()).unwrap_or(u64::MAX),
                limit,
                offset,
            ),
        })
    }

    async fn product(
        &self,
        store_id: StoreId,
        product_id: ProductId,
    ) -> Result<Option<Product>, RepositoryError> {
        Ok(self
            .active_products(store_id)
            .into_iter()
            .find(|p| p.id == product_id)
            .cloned())
    }

    async fn section_products(
        &self,
        store_id: StoreId,
        category: Option<&str>,
        limit: u32,
    ) -> Result<Vec<Product>, RepositoryError> {
        Ok(self
            .active_products(store_id)
            .into_iter()
            .filter(|p| category.is_none_or(|c| p.category.as_deref() == Some(c)))
            .take(usize::try_from(limit).unwrap_or(usize::MAX))
            .cloned()
            .collect())
    }

    async fn categories(&self, store_id: StoreId) -> Result<Vec<String>, RepositoryError> {
        let categories: BTreeSet<&str> = self
            .active_products(store_id)
            .into_iter()
            .filter_map(|p| p.category.as_deref())
            .filter(|c| !c.is_empty())
            .collect();
        Ok(categories.into_iter().map(String::from).collect())
    }

    async fn reviews(&self, product_id: ProductId) -> Result<Vec<Review>, RepositoryError> {
        let mut reviews: Vec<Review> = self
            .reviews
            .iter()
            .filter(|r| r.product_id == product_id)
            .cloned()
            .collect();
        reviews.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(b.id.cmp(&a.id)));
        Ok(reviews)
    }
}
