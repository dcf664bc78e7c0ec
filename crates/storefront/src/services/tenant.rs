//! Tenant resolution: request host to store.
//!
//! Active stores are cached per lookup target using `moka`. Misses and
//! inactive stores are never cached, so a newly created or re-enabled store
//! is visible on the next request. A cached store stays resolvable for up
//! to the cache TTL after it is deactivated or deleted; `lookup` bypasses
//! the cache and always sees the current row.

use std::sync::Arc;
use std::time::Duration;

use moka::future::Cache;
use thiserror::Error;
use tracing::{debug, info, instrument};

use orbit_core::{HostRules, Subdomain, TenantTarget, classify_host};

use crate::db::{Catalog, RepositoryError};
use crate::models::Store;

/// Maximum number of cached host lookups.
const CACHE_CAPACITY: u64 = 10_000;

/// Errors from resolving a host to a store.
#[derive(Debug, Error)]
pub enum ResolveError {
    /// No active store serves this host.
    #[error("store not found")]
    NotFound,

    /// The lookup itself failed.
    #[error(transparent)]
    Repository(#[from] RepositoryError),
}

/// Outcome of an uncached lookup, for operators.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TenantLookup {
    Active(Store),
    Inactive(Store),
    Missing,
}

impl TenantLookup {
    fn from_row(store: Option<Store>) -> Self {
        match store {
            Some(store) if store.is_active => Self::Active(store),
            Some(store) => Self::Inactive(store),
            None => Self::Missing,
        }
    }
}

/// Resolves request hosts to active stores.
///
/// Cheaply cloneable.
#[derive(Clone)]
pub struct TenantResolver {
    inner: Arc<TenantResolverInner>,
}

struct TenantResolverInner {
    catalog: Arc<dyn Catalog>,
    rules: HostRules,
    cache: Cache<String, Store>,
}

impl TenantResolver {
    /// Create a resolver caching active stores for `ttl`.
    #[must_use]
    pub fn new(catalog: Arc<dyn Catalog>, rules: HostRules, ttl: Duration) -> Self {
        let cache = Cache::builder()
            .max_capacity(CACHE_CAPACITY)
            .time_to_live(ttl)
            .build();

        Self {
            inner: Arc::new(TenantResolverInner {
                catalog,
                rules,
                cache,
            }),
        }
    }

    /// Host rules this resolver applies.
    #[must_use]
    pub fn rules(&self) -> &HostRules {
        &self.inner.rules
    }

    /// Resolve a host (or `domain` query value) to its active store.
    ///
    /// Missing and inactive stores are both reported as
    /// [`ResolveError::NotFound`]; the difference is only logged. A store
    /// served from the cache is at most one TTL old.
    ///
    /// # Errors
    ///
    /// Returns `ResolveError::NotFound` if no active store serves the host.
    /// Returns `ResolveError::Repository` if the lookup fails.
    #[instrument(skip(self))]
    pub async fn resolve(&self, host: &str) -> Result<Store, ResolveError> {
        let target = classify_host(host, &self.inner.rules);
        let Some(key) = cache_key(&target) else {
            debug!("host cannot match any store");
            return Err(ResolveError::NotFound);
        };

        if let Some(store) = self.inner.cache.get(&key).await {
            debug!("Cache hit for tenant");
            return Ok(store);
        }

        match self.find(&target).await? {
            TenantLookup::Active(store) => {
                self.inner.cache.insert(key, store.clone()).await;
                Ok(store)
            }
            TenantLookup::Inactive(store) => {
                info!(
                    store_id = %store.id,
                    subdomain = %store.subdomain,
                    "store is inactive"
                );
                Err(ResolveError::NotFound)
            }
            TenantLookup::Missing => {
                debug!("no store for host");
                Err(ResolveError::NotFound)
            }
        }
    }

    /// Look a host up without the cache, keeping the inactive/missing distinction.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError` if the lookup fails.
    pub async fn lookup(&self, host: &str) -> Result<TenantLookup, RepositoryError> {
        self.find(&classify_host(host, &self.inner.rules)).await
    }

    async fn find(&self, target: &TenantTarget) -> Result<TenantLookup, RepositoryError> {
        match target {
            TenantTarget::Unroutable => Ok(TenantLookup::Missing),
            TenantTarget::Subdomain(subdomain) => self.find_by_subdomain(subdomain).await,
            TenantTarget::CustomDomain { domain, fallback } => {
                let by_domain = TenantLookup::from_row(
                    self.inner.catalog.store_by_custom_domain(domain).await?,
                );
                if matches!(by_domain, TenantLookup::Active(_)) {
                    return Ok(by_domain);
                }

                let Some(subdomain) = fallback else {
                    return Ok(by_domain);
                };
                match self.find_by_subdomain(subdomain).await? {
                    TenantLookup::Missing => Ok(by_domain),
                    found => Ok(found),
                }
            }
        }
    }

    async fn find_by_subdomain(&self, subdomain: &Subdomain) -> Result<TenantLookup, RepositoryError> {
        Ok(TenantLookup::from_row(
            self.inner.catalog.store_by_subdomain(subdomain).await?,
        ))
    }
}

fn cache_key(target: &TenantTarget) -> Option<String> {
    match target {
        TenantTarget::Subdomain(subdomain) => Some(format!("subdomain:{subdomain}")),
        TenantTarget::CustomDomain { domain, .. } => Some(format!("domain:{domain}")),
        TenantTarget::Unroutable => None,
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::sync::atomic::{AtomicBool, Ordering};

    use async_trait::async_trait;
    use chrono::Utc;

    use orbit_core::{ProductId, StoreId, UserId};

    use super::*;
    use crate::db::MemoryCatalog;
    use crate::models::{Product, ProductPage, ProductQuery, Review};

    fn store(id: i32, subdomain: &str, active: bool) -> Store {
        Store {
            id: StoreId::new(id),
            subdomain: Subdomain::parse(subdomain).unwrap(),
            custom_domain: None,
            name: format!("Store {id}"),
            category: None,
            description: None,
            logo: None,
            theme: None,
            is_active: active,
            owner_id: UserId::new(1),
            created_at: Utc::now(),
        }
    }

    fn resolver(catalog: MemoryCatalog) -> TenantResolver {
        TenantResolver::new(
            Arc::new(catalog),
            HostRules::new(Some("orbit360.com"), Some(Subdomain::parse("demo").unwrap())),
            Duration::from_secs(60),
        )
    }

    #[tokio::test]
    async fn test_resolves_active_subdomain() {
        let resolver = resolver(MemoryCatalog::new().with_store(store(1, "toys", true)));

        let found = resolver.resolve("toys.orbit360.com:3000").await.unwrap();
        assert_eq!(found.id, StoreId::new(1));
    }

    #[tokio::test]
    async fn test_inactive_and_missing_are_not_found() {
        let resolver = resolver(MemoryCatalog::new().with_store(store(1, "closed", false)));

        assert!(matches!(
            resolver.resolve("closed.orbit360.com").await,
            Err(ResolveError::NotFound)
        ));
        assert!(matches!(
            resolver.resolve("nobody.orbit360.com").await,
            Err(ResolveError::NotFound)
        ));
    }

    #[tokio::test]
    async fn test_lookup_distinguishes_inactive_from_missing() {
        let resolver = resolver(MemoryCatalog::new().with_store(store(1, "closed", false)));

        assert!(matches!(
            resolver.lookup("closed.orbit360.com").await.unwrap(),
            TenantLookup::Inactive(_)
        ));
        assert_eq!(
            resolver.lookup("nobody.orbit360.com").await.unwrap(),
            TenantLookup::Missing
        );
    }

    #[tokio::test]
    async fn test_localhost_uses_default_subdomain() {
        let resolver = resolver(MemoryCatalog::new().with_store(store(9, "demo", true)));

        let found = resolver.resolve("localhost:3000").await.unwrap();
        assert_eq!(found.id, StoreId::new(9));
    }

    #[tokio::test]
    async fn test_custom_domain_before_first_label() {
        let mut custom = store(2, "boutique", true);
        custom.custom_domain = Some("Shop.Example.com".to_string());
        let resolver = resolver(
            MemoryCatalog::new()
                .with_store(store(1, "shop", true))
                .with_store(custom),
        );

        let found = resolver.resolve("shop.example.com").await.unwrap();
        assert_eq!(found.id, StoreId::new(2));
    }

    #[tokio::test]
    async fn test_unclaimed_custom_domain_falls_back_to_first_label() {
        let resolver = resolver(MemoryCatalog::new().with_store(store(1, "toys", true)));

        let found = resolver.resolve("toys.example.net").await.unwrap();
        assert_eq!(found.id, StoreId::new(1));
    }

    #[tokio::test]
    async fn test_inactive_custom_domain_falls_back_to_first_label() {
        let mut custom = store(2, "boutique", false);
        custom.custom_domain = Some("toys.example.net".to_string());
        let resolver = resolver(
            MemoryCatalog::new()
                .with_store(store(1, "toys", true))
                .with_store(custom),
        );

        let found = resolver.resolve("toys.example.net").await.unwrap();
        assert_eq!(found.id, StoreId::new(1));
    }

    #[tokio::test]
    async fn test_invalid_label_is_not_found() {
        let resolver = resolver(MemoryCatalog::new());
        assert!(matches!(
            resolver.resolve("bad_label.orbit360.com").await,
            Err(ResolveError::NotFound)
        ));
    }

    #[test]
    fn test_cache_keys_separate_subdomains_and_domains() {
        let sub = TenantTarget::Subdomain(Subdomain::parse("toys").unwrap());
        let domain = TenantTarget::CustomDomain {
            domain: "toys".to_string(),
            fallback: None,
        };
        assert_ne!(cache_key(&sub), cache_key(&domain));
        assert_eq!(cache_key(&TenantTarget::Unroutable), None);
    }

    /// Catalog whose stores can be switched off after construction.
    struct Switchable {
        inner: MemoryCatalog,
        active: Arc<AtomicBool>,
    }

    impl Switchable {
        fn apply(&self, store: Option<Store>) -> Option<Store> {
            store.map(|mut store| {
                store.is_active = self.active.load(Ordering::SeqCst);
                store
            })
        }
    }

    #[async_trait]
    impl Catalog for Switchable {
        async fn ping(&self) -> Result<(), RepositoryError> {
            Ok(())
        }

        async fn store_by_subdomain(
            &self,
            subdomain: &Subdomain,
        ) -> Result<Option<Store>, RepositoryError> {
            Ok(self.apply(self.inner.store_by_subdomain(subdomain).await?))
        }

        async fn store_by_custom_domain(
            &self,
            domain: &str,
        ) -> Result<Option<Store>, RepositoryError> {
            Ok(self.apply(self.inner.store_by_custom_domain(domain).await?))
        }

        async fn customization(
            &self,
            store_id: StoreId,
        ) -> Result<Option<serde_json::Value>, RepositoryError> {
            self.inner.customization(store_id).await
        }

        async fn products(
            &self,
            store_id: StoreId,
            query: &ProductQuery,
        ) -> Result<ProductPage, RepositoryError> {
            self.inner.products(store_id, query).await
        }

        async fn product(
            &self,
            store_id: StoreId,
            product_id: ProductId,
        ) -> Result<Option<Product>, RepositoryError> {
            self.inner.product(store_id, product_id).await
        }

        async fn section_products(
            &self,
            store_id: StoreId,
            category: Option<&str>,
            limit: u32,
        ) -> Result<Vec<Product>, RepositoryError> {
            self.inner.section_products(store_id, category, limit).await
        }

        async fn categories(&self, store_id: StoreId) -> Result<Vec<String>, RepositoryError> {
            self.inner.categories(store_id).await
        }

        async fn reviews(&self, product_id: ProductId) -> Result<Vec<Review>, RepositoryError> {
            self.inner.reviews(product_id).await
        }
    }

    #[tokio::test]
    async fn test_deactivation_takes_effect_within_ttl() {
        let ttl = Duration::from_millis(100);
        let active = Arc::new(AtomicBool::new(true));
        let resolver = TenantResolver::new(
            Arc::new(Switchable {
                inner: MemoryCatalog::new().with_store(store(1, "toys", true)),
                active: Arc::clone(&active),
            }),
            HostRules::new(Some("orbit360.com"), None),
            ttl,
        );

        assert!(resolver.resolve("toys.orbit360.com").await.is_ok());
        active.store(false, Ordering::SeqCst);

        // Cached until the entry expires; the uncached lookup sees it at once.
        assert!(resolver.resolve("toys.orbit360.com").await.is_ok());
        assert!(matches!(
            resolver.lookup("toys.orbit360.com").await.unwrap(),
            TenantLookup::Inactive(_)
        ));

        tokio::time::sleep(ttl * 3).await;
        assert!(matches!(
            resolver.resolve("toys.orbit360.com").await,
            Err(ResolveError::NotFound)
        ));
    }
}
