//! Application state shared across handlers.

use std::sync::Arc;

use crate::config::StorefrontConfig;
use crate::db::Catalog;
use crate::services::TenantResolver;

/// Application state shared across all handlers.
///
/// This struct is cheaply cloneable via `Arc` and provides access to
/// shared resources like the catalog and the tenant resolver.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    config: StorefrontConfig,
    catalog: Arc<dyn Catalog>,
    tenants: TenantResolver,
}

impl AppState {
    /// Create a new application state.
    ///
    /// # Arguments
    ///
    /// * `config` - Storefront configuration
    /// * `catalog` - Catalog backing every store-scoped read
    #[must_use]
    pub fn new(config: StorefrontConfig, catalog: Arc<dyn Catalog>) -> Self {
        let tenants = TenantResolver::new(
            Arc::clone(&catalog),
            config.tenancy.host_rules(),
            config.tenancy.cache_ttl,
        );

        Self {
            inner: Arc::new(AppStateInner {
                config,
                catalog,
                tenants,
            }),
        }
    }

    /// Get a reference to the storefront configuration.
    #[must_use]
    pub fn config(&self) -> &StorefrontConfig {
        &self.inner.config
    }

    /// Get a reference to the catalog.
    #[must_use]
    pub fn catalog(&self) -> &dyn Catalog {
        self.inner.catalog.as_ref()
    }

    /// Get a shared handle to the catalog, for spawned tasks.
    #[must_use]
    pub fn catalog_handle(&self) -> Arc<dyn Catalog> {
        Arc::clone(&self.inner.catalog)
    }

    /// Get a reference to the tenant resolver.
    #[must_use]
    pub fn tenants(&self) -> &TenantResolver {
        &self.inner.tenants
    }
}
