//! Product domain types and catalog query parameters.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use orbit_core::{ProductId, StoreId};

/// Page size when the client does not ask for one.
pub const DEFAULT_PAGE_LIMIT: u32 = 50;

/// Largest page a client may request.
pub const MAX_PAGE_LIMIT: u32 = 100;

/// A catalog product (domain type).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: ProductId,
    pub store_id: StoreId,
    pub name: String,
    pub description: Option<String>,
    pub price: Decimal,
    pub compare_at_price: Option<Decimal>,
    pub category: Option<String>,
    pub sku: Option<String>,
    pub stock: i32,
    /// Image URLs, primary image first.
    pub images: Vec<String>,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
}

/// Product listing filters, as received from the query string.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct ProductQuery {
    pub category: Option<String>,
    pub search: Option<String>,
    pub limit: Option<u32>,
    pub offset: Option<u32>,
}

impl ProductQuery {
    /// Category filter, ignoring blanks and `all`.
    #[must_use]
    pub fn category(&self) -> Option<&str> {
        self.category
            .as_deref()
            .map(str::trim)
            .filter(|c| !c.is_empty() && !c.eq_ignore_ascii_case("all"))
    }

    /// Search term, ignoring blanks.
    #[must_use]
    pub fn search(&self) -> Option<&str> {
        self.search.as_deref().map(str::trim).filter(|s| !s.is_empty())
    }

    /// Page size clamped to `1..=MAX_PAGE_LIMIT`.
    #[must_use]
    pub fn limit(&self) -> u32 {
        self.limit
            .unwrap_or(DEFAULT_PAGE_LIMIT)
            .clamp(1, MAX_PAGE_LIMIT)
    }

    #[must_use]
    pub fn offset(&self) -> u32 {
        self.offset.unwrap_or(0)
    }
}

/// Pagination metadata for a product listing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Pagination {
    pub total: u64,
    pub limit: u32,
    pub offset: u32,
    pub has_more: bool,
}

impl Pagination {
    #[must_use]
    pub fn new(total: u64, limit: u32, offset: u32) -> Self {
        Self {
            total,
            limit,
            offset,
            has_more: u64::from(offset) + u64::from(limit) < total,
        }
    }
}

/// One page of a product listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProductPage {
    pub products: Vec<Product>,
    pub pagination: Pagination,
}
