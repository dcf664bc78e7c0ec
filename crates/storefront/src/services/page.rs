//! Storefront page assembly.
//!
//! A page is the store, its merged customization, its categories and the
//! products of every configured section. The customization and category
//! fetches run concurrently, then every section query runs concurrently on a
//! `JoinSet`. No fetch fails the page: a failed customization falls back to
//! the defaults, failed categories or sections render empty, and each
//! failure adds a notice.

use std::sync::Arc;

use serde::Serialize;
use tokio::task::JoinSet;
use tracing::{instrument, warn};

use orbit_core::{ProductSection, ResolvedCustomization};

use super::customization::load_customization;
use crate::db::Catalog;
use crate::models::{Product, Store};

/// A section with the products it shows.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SectionProducts {
    #[serde(flatten)]
    pub section: ProductSection,
    pub products: Vec<Product>,
}

/// Everything needed to render a storefront page.
#[derive(Debug, Clone, Serialize)]
pub struct StorePage {
    pub store: Store,
    pub customization: ResolvedCustomization,
    pub categories: Vec<String>,
    pub sections: Vec<SectionProducts>,
    /// Human-readable notes about data that could not be loaded.
    pub notices: Vec<String>,
}

/// Notice shown when the saved customization could not be read.
pub const CUSTOMIZATION_NOTICE: &str =
    "Store design is temporarily unavailable, showing the default layout";

/// Notice shown when the category list could not be read.
pub const CATEGORIES_NOTICE: &str = "Categories are temporarily unavailable";

/// Build the page for a resolved store.
///
/// Failed fetches are logged and reported in [`StorePage::notices`].
#[instrument(skip(catalog, store), fields(store_id = %store.id))]
pub async fn load_page(catalog: Arc<dyn Catalog>, store: Store) -> StorePage {
    let mut notices = Vec::new();

    let (customization, categories) = tokio::join!(
        load_customization(catalog.as_ref(), store.id),
        catalog.categories(store.id),
    );

    let customization = customization.unwrap_or_else(|e| {
        warn!(error = %e, "customization failed to load, using defaults");
        notices.push(CUSTOMIZATION_NOTICE.to_string());
        ResolvedCustomization::defaults()
    });

    let categories = categories.unwrap_or_else(|e| {
        warn!(error = %e, "categories failed to load");
        notices.push(CATEGORIES_NOTICE.to_string());
        Vec::new()
    });

    let mut sections: Vec<SectionProducts> = customization
        .product_sections
        .iter()
        .map(|section| SectionProducts {
            section: section.clone(),
            products: Vec::new(),
        })
        .collect();
    let mut loaded = vec![false; sections.len()];

    let mut tasks = JoinSet::new();
    for (index, section) in customization.product_sections.iter().enumerate() {
        let catalog = Arc::clone(&catalog);
        let store_id = store.id;
        let category = section.category.as_category().map(String::from);
        let limit = section.limit;

        tasks.spawn(async move {
            let products = catalog
                .section_products(store_id, category.as_deref(), limit)
                .await;
            (index, products)
        });
    }

    while let Some(joined) = tasks.join_next().await {
        match joined {
            Ok((index, Ok(products))) => {
                if let (Some(section), Some(done)) =
                    (sections.get_mut(index), loaded.get_mut(index))
                {
                    section.products = products;
                    *done = true;
                }
            }
            Ok((index, Err(e))) => {
                warn!(error = %e, section = index, "section products failed to load");
            }
            Err(e) => {
                warn!(error = %e, "section task failed");
            }
        }
    }

    notices.extend(
        sections
            .iter()
            .zip(&loaded)
            .filter(|(_, done)| !**done)
            .map(|(s, _)| {
                format!(
                    "Products for \"{}\" are temporarily unavailable",
                    s.section.title
                )
            }),
    );

    StorePage {
        store,
        customization,
        categories,
        sections,
        notices,
    }
}
