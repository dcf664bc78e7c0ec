//! Store repository.
//!
//! Lookups return stores regardless of their active flag; callers decide how
//! to treat inactive stores.

use chrono::{DateTime, Utc};
use sqlx::PgPool;
use tracing::instrument;

use orbit_core::{StoreId, Subdomain, UserId};

use super::RepositoryError;
use crate::models::Store;

const STORE_COLUMNS: &str = "id, subdomain, custom_domain, name, category, description, logo, \
                             theme, is_active, owner_id, created_at";

#[derive(sqlx::FromRow)]
struct StoreRow {
    id: i32,
    subdomain: String,
    custom_domain: Option<String>,
    name: String,
    category: Option<String>,
    description: Option<String>,
    logo: Option<String>,
    theme: Option<String>,
    is_active: bool,
    owner_id: i32,
    created_at: DateTime<Utc>,
}

impl TryFrom<StoreRow> for Store {
    type Error = RepositoryError;

    fn try_from(row: StoreRow) -> Result<Self, Self::Error> {
        let subdomain = Subdomain::parse(&row.subdomain).map_err(|e| {
            RepositoryError::DataCorruption(format!(
                "invalid subdomain for store {}: {e}",
                row.id
            ))
        })?;

        Ok(Self {
            id: StoreId::new(row.id),
            subdomain,
            custom_domain: row.custom_domain,
            name: row.name,
            category: row.category,
            description: row.description,
            logo: row.logo,
            theme: row.theme,
            is_active: row.is_active,
            owner_id: UserId::new(row.owner_id),
            created_at: row.created_at,
        })
    }
}

/// Repository for store lookups.
pub struct StoreRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> StoreRepository<'a> {
    /// Create a new store repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Get a store by its subdomain.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    /// Returns `RepositoryError::DataCorruption` if the stored subdomain is invalid.
    #[instrument(skip(self), fields(subdomain = %subdomain))]
    pub async fn get_by_subdomain(
        &self,
        subdomain: &Subdomain,
    ) -> Result<Option<Store>, RepositoryError> {
        let sql = format!("SELECT {STORE_COLUMNS} FROM storefront.store WHERE subdomain = $1");
        let row = sqlx::query_as::<_, StoreRow>(&sql)
            .bind(subdomain.as_str())
            .fetch_optional(self.pool)
            .await?;

        row.map(Store::try_from).transpose()
    }

    /// Get a store by its custom domain (case-insensitive).
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    /// Returns `RepositoryError::DataCorruption` if the stored subdomain is invalid.
    #[instrument(skip(self))]
    pub async fn get_by_custom_domain(&self, domain: &str) -> Result<Option<Store>, RepositoryError> {
        let sql =
            format!("SELECT {STORE_COLUMNS} FROM storefront.store WHERE lower(custom_domain) = $1");
        let row = sqlx::query_as::<_, StoreRow>(&sql)
            .bind(domain.to_ascii_lowercase())
            .fetch_optional(self.pool)
            .await?;

        row.map(Store::try_from).transpose()
    }
}
