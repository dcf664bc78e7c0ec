//! Loading a store's effective customization.

use tracing::{instrument, warn};

use orbit_core::{ResolvedCustomization, StoreId, WebsiteCustomization, merge_customization};

use crate::db::{Catalog, RepositoryError};

/// Load a store's customization document and merge it over the defaults.
///
/// A missing document yields the defaults. Recognized keys with malformed
/// values fall back to their defaults and are logged.
///
/// # Errors
///
/// Returns `RepositoryError` if the document cannot be read.
#[instrument(skip(catalog), fields(store_id = %store_id))]
pub async fn load_customization(
    catalog: &dyn Catalog,
    store_id: StoreId,
) -> Result<ResolvedCustomization, RepositoryError> {
    let document = catalog.customization(store_id).await?;
    Ok(resolve_document(store_id, document.as_ref()))
}

/// Merge an optional raw document over the defaults.
#[must_use]
pub fn resolve_document(
    store_id: StoreId,
    document: Option<&serde_json::Value>,
) -> ResolvedCustomization {
    let persisted = document.map(|doc| {
        let parsed = WebsiteCustomization::from_document(doc);
        if !parsed.rejected.is_empty() {
            warn!(
                store_id = %store_id,
                keys = ?parsed.rejected,
                "ignoring malformed customization keys"
            );
        }
        parsed.customization
    });

    merge_customization(persisted.as_ref(), &ResolvedCustomization::defaults())
}
