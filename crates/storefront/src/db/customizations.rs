//! Website customization repository.

use sqlx::PgPool;
use tracing::instrument;

use orbit_core::StoreId;

use super::RepositoryError;

/// Repository for per-store customization documents.
pub struct CustomizationRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> CustomizationRepository<'a> {
    /// Create a new customization repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Get the raw customization document for a store, if one was saved.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    #[instrument(skip(self), fields(store_id = %store_id))]
    pub async fn get_document(
        &self,
        store_id: StoreId,
    ) -> Result<Option<serde_json::Value>, RepositoryError> {
        let document = sqlx::query_scalar::<_, serde_json::Value>(
            r"
            SELECT document
            FROM storefront.website_customization
            WHERE store_id = $1
            ",
        )
        .bind(store_id)
        .fetch_optional(self.pool)
        .await?;

        Ok(document)
    }
}
