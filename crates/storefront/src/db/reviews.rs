//! Product review repository.

use chrono::{DateTime, Utc};
use sqlx::PgPool;
use tracing::instrument;

use orbit_core::{ProductId, ReviewId};

use super::RepositoryError;
use crate::models::Review;

#[derive(sqlx::FromRow)]
struct ReviewRow {
    id: i32,
    product_id: i32,
    reviewer_name: String,
    rating: i32,
    title: Option<String>,
    comment: Option<String>,
    verified: bool,
    helpful_count: i32,
    created_at: DateTime<Utc>,
}

impl From<ReviewRow> for Review {
    fn from(row: ReviewRow) -> Self {
        Self {
            id: ReviewId::new(row.id),
            product_id: ProductId::new(row.product_id),
            reviewer_name: row.reviewer_name,
            rating: row.rating,
            title: row.title,
            comment: row.comment,
            verified: row.verified,
            helpful_count: row.helpful_count,
            created_at: row.created_at,
        }
    }
}

/// Repository for product reviews.
pub struct ReviewRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> ReviewRepository<'a> {
    /// Create a new review repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// List a product's reviews, newest first.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    #[instrument(skip(self), fields(product_id = %product_id))]
    pub async fn list_for_product(
        &self,
        product_id: ProductId,
    ) -> Result<Vec<Review>, RepositoryError> {
        let rows = sqlx::query_as::<_, ReviewRow>(
            r"
            SELECT id, product_id, reviewer_name, rating, title, comment,
                   verified, helpful_count, created_at
            FROM storefront.review
            WHERE product_id = $1
            ORDER BY created_at DESC, id DESC
            ",
        )
        .bind(product_id)
        .fetch_all(self.pool)
        .await?;

        Ok(rows.into_iter().map(Review::from).collect())
    }
}
