//! Product review domain types.

use chrono::{DateTime, Utc};
use serde::Serialize;

use orbit_core::{ProductId, RatingStats, ReviewId};

/// A shopper's review of a product (domain type).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Review {
    pub id: ReviewId,
    pub product_id: ProductId,
    pub reviewer_name: String,
    /// Star rating, nominally `1..=5`.
    pub rating: i32,
    pub title: Option<String>,
    pub comment: Option<String>,
    /// Reviewer bought the product.
    pub verified: bool,
    pub helpful_count: i32,
    pub created_at: DateTime<Utc>,
}

/// A product's reviews with their aggregate rating.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProductReviews {
    pub reviews: Vec<Review>,
    pub stats: RatingStats,
}

impl ProductReviews {
    /// Aggregate ratings over `reviews`.
    #[must_use]
    pub fn new(reviews: Vec<Review>) -> Self {
        let stats = RatingStats::from_ratings(reviews.iter().map(|r| r.rating));
        Self { reviews, stats }
    }
}
