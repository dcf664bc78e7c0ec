//! Domain models for the storefront.
//!
//! These types are validated domain objects, separate from database row types.

pub mod product;
pub mod review;
pub mod session;
pub mod store;

pub use product::{Pagination, Product, ProductPage, ProductQuery};
pub use review::{ProductReviews, Review};
pub use session::keys as session_keys;
pub use store::Store;
