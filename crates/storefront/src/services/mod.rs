//! Business logic services for the storefront.
//!
//! # Services
//!
//! - `tenant` - Resolve request hosts to stores (cached)
//! - `customization` - Merge saved customization documents over defaults
//! - `page` - Assemble a storefront page with concurrent section queries
//! - `shopper` - Session-backed cart and wishlist

pub mod customization;
pub mod page;
pub mod shopper;
pub mod tenant;

pub use customization::load_customization;
pub use page::{SectionProducts, StorePage, load_page};
pub use shopper::{
    CartStore, MemoryStorage, ShopperError, ShopperStorage, WishlistStore, sign_out,
};
pub use tenant::{ResolveError, TenantLookup, TenantResolver};
