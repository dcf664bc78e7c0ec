//! Product repository.
//!
//! Only active products are ever returned to the storefront.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use sqlx::PgPool;
use tracing::instrument;

use orbit_core::{ProductId, StoreId};

use super::{RepositoryError, count_to_u64};
use crate::models::{Pagination, Product, ProductPage, ProductQuery};

const PRODUCT_COLUMNS: &str = "id, store_id, name, description, price, compare_at_price, \
                               category, sku, stock, images, is_active, created_at";

#[derive(sqlx::FromRow)]
struct ProductRow {
    id: i32,
    store_id: i32,
    name: String,
    description: Option<String>,
    price: Decimal,
    compare_at_price: Option<Decimal>,
    category: Option<String>,
    sku: Option<String>,
    stock: i32,
    images: Vec<String>,
    is_active: bool,
    created_at: DateTime<Utc>,
}

impl From<ProductRow> for Product {
    fn from(row: ProductRow) -> Self {
        Self {
            id: ProductId::new(row.id),
            store_id: StoreId::new(row.store_id),
            name: row.name,
            description: row.description,
            price: row.price,
            compare_at_price: row.compare_at_price,
            category: row.category,
            sku: row.sku,
            stock: row.stock,
            images: row.images,
            is_active: row.is_active,
            created_at: row.created_at,
        }
    }
}

/// Repository for catalog products.
pub struct ProductRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> ProductRepository<'a> {
    /// Create a new product repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// List a store's active products, newest first.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if a query fails.
    #[instrument(skip(self), fields(store_id = %store_id))]
    pub async fn list(
        &self,
        store_id: StoreId,
        query: &ProductQuery,
    ) -> Result<ProductPage, RepositoryError> {
        let category = query.category();
        let pattern = query.search().map(like_pattern);
        let limit = query.limit();
        let offset = query.offset();

        let filter = r"
            WHERE store_id = $1
              AND is_active
              AND ($2::text IS NULL OR category = $2)
              AND ($3::text IS NULL OR name ILIKE $3 OR description ILIKE $3)
        ";

        let sql = format!(
            "SELECT {PRODUCT_COLUMNS} FROM storefront.product {filter} \
             ORDER BY created_at DESC, id DESC LIMIT $4 OFFSET $5"
        );
        let rows = sqlx::query_as::<_, ProductRow>(&sql)
            .bind(store_id)
            .bind(category)
            .bind(pattern.as_deref())
            .bind(i64::from(limit))
            .bind(i64::from(offset))
            .fetch_all(self.pool)
            .await?;

        let count_sql = format!("SELECT COUNT(*) FROM storefront.product {filter}");
        let total = sqlx::query_scalar::<_, i64>(&count_sql)
            .bind(store_id)
            .bind(category)
            .bind(pattern.as_deref())
            .fetch_one(self.pool)
            .await?;

        Ok(ProductPage {
            products: rows.into_iter().map(Product::from).collect(),
            pagination: Pagination::new(count_to_u64(total)?, limit, offset),
        })
    }

    /// Get one active product belonging to a store.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    #[instrument(skip(self), fields(store_id = %store_id, product_id = %product_id))]
    pub async fn get(
        &self,
        store_id: StoreId,
        product_id: ProductId,
    ) -> Result<Option<Product>, RepositoryError> {
        let sql = format!(
            "SELECT {PRODUCT_COLUMNS} FROM storefront.product \
             WHERE id = $1 AND store_id = $2 AND is_active"
        );
        let row = sqlx::query_as::<_, ProductRow>(&sql)
            .bind(product_id)
            .bind(store_id)
            .fetch_optional(self.pool)
            .await?;

        Ok(row.map(Product::from))
    }

    /// Newest active products for a storefront section.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    #[instrument(skip(self), fields(store_id = %store_id))]
    pub async fn list_for_section(
        &self,
        store_id: StoreId,
        category: Option<&str>,
        limit: u32,
    ) -> Result<Vec<Product>, RepositoryError> {
        let sql = format!(
            "SELECT {PRODUCT_COLUMNS} FROM storefront.product \
             WHERE store_id = $1 AND is_active AND ($2::text IS NULL OR category = $2) \
             ORDER BY created_at DESC, id DESC LIMIT $3"
        );
        let rows = sqlx::query_as::<_, ProductRow>(&sql)
            .bind(store_id)
            .bind(category)
            .bind(i64::from(limit))
            .fetch_all(self.pool)
            .await?;

        Ok(rows.into_iter().map(Product::from).collect())
    }

    /// Distinct non-empty categories of a store's active products.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    #[instrument(skip(self), fields(store_id = %store_id))]
    pub async fn categories(&self, store_id: StoreId) -> Result<Vec<String>, RepositoryError> {
        let categories = sqlx::query_scalar::<_, String>(
            r"
            SELECT DISTINCT category
            FROM storefront.product
            WHERE store_id = $1 AND is_active AND category IS NOT NULL AND category <> ''
            ORDER BY category
            ",
        )
        .bind(store_id)
        .fetch_all(self.pool)
        .await?;

        Ok(categories)
    }
}

/// Build a case-insensitive `LIKE` pattern matching `term` anywhere.
///
/// `LIKE` wildcards in the term are escaped so they match literally.
fn like_pattern(term: &str) -> String {
    let mut pattern = String::with_capacity(term.len() + 2);
    pattern.push('%');
    for c in term.chars() {
        if matches!(c, '%' | '_' | '\\') {
            pattern.push('\\');
        }
        pattern.push(c);
    }
    pattern.push('%');
    pattern
}
