//! Store inspection commands.
//!
//! Read-only tools for operators debugging host routing and customization.
//! Unlike the storefront, `store show` tells inactive stores apart from
//! missing ones.

use std::sync::Arc;

use clap::ValueEnum;
use tracing::info;

use orbit_core::Subdomain;
use orbit_storefront::config::TenancyConfig;
use orbit_storefront::db::{Catalog, PgCatalog};
use orbit_storefront::models::Store;
use orbit_storefront::services::{TenantLookup, TenantResolver, load_customization};

use super::connect;

/// Output format for documents.
#[derive(Debug, Clone, Copy, Default, ValueEnum)]
pub enum Format {
    #[default]
    Json,
    Yaml,
}

/// Resolve `host` the way the storefront would and print the outcome.
///
/// # Errors
///
/// Returns an error if configuration is invalid or the database query fails.
pub async fn show(host: &str) -> Result<(), Box<dyn std::error::Error>> {
    let tenancy = TenancyConfig::from_env()?;
    let catalog: Arc<dyn Catalog> = Arc::new(PgCatalog::new(connect().await?));
    let resolver = TenantResolver::new(catalog, tenancy.host_rules(), tenancy.cache_ttl);

    info!(host, "Resolving host");
    match resolver.lookup(host).await? {
        TenantLookup::Active(store) => print_store("active", &store),
        TenantLookup::Inactive(store) => print_store("inactive", &store),
        TenantLookup::Missing => {
            #[allow(clippy::print_stdout)]
            {
                println!("No store is routed to {host}");
            }
        }
    }
    Ok(())
}

/// Print a store's customization merged over the defaults.
///
/// # Errors
///
/// Returns an error if the subdomain is invalid, the store does not exist
/// or the database query fails.
pub async fn customization(subdomain: &str, format: Format) -> Result<(), Box<dyn std::error::Error>> {
    let subdomain = Subdomain::parse(subdomain)?;
    let catalog = PgCatalog::new(connect().await?);

    let store = catalog
        .store_by_subdomain(&subdomain)
        .await?
        .ok_or_else(|| format!("Store not found: {subdomain}"))?;

    let resolved = load_customization(&catalog, store.id).await?;
    let output = match format {
        Format::Json => serde_json::to_string_pretty(&resolved)?,
        Format::Yaml => serde_yaml::to_string(&resolved)?,
    };

    #[allow(clippy::print_stdout)]
    {
        println!("{output}");
    }
    Ok(())
}

#[allow(clippy::print_stdout)]
fn print_store(status: &str, store: &Store) {
    println!("Store #{} ({status})", store.id);
    println!("  name:          {}", store.name);
    println!("  subdomain:     {}", store.subdomain);
    println!(
        "  custom domain: {}",
        store.custom_domain.as_deref().unwrap_or("-")
    );
    println!("  theme:         {}", store.theme.as_deref().unwrap_or("-"));
    println!("  category:      {}", store.category.as_deref().unwrap_or("-"));
    println!("  created:       {}", store.created_at.to_rfc3339());
}
