//! Orbit Core - Shared storefront domain library.
//!
//! This crate provides the types and pure logic used across Orbit components:
//! - `storefront` - Multi-tenant public storefront service
//! - `cli` - Command-line tools for migrations and store inspection
//!
//! # Architecture
//!
//! The core crate contains only types and pure functions - no I/O, no database
//! access, no HTTP. Database encoding for ids and subdomains is available
//! behind the `postgres` feature.
//!
//! # Modules
//!
//! - [`types`] - Type-safe ids, store subdomains and host classification
//! - [`customization`] - Website customization documents and default merging
//! - [`reviews`] - Rating statistics
//! - [`cart`] - Shopping cart lines and totals
//! - [`wishlist`] - Product wishlist

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod cart;
pub mod customization;
pub mod reviews;
pub mod types;
pub mod wishlist;

pub use cart::{Cart, CartError, CartItem, MAX_UNIT_PRICE};
pub use customization::{
    ProductSection, ResolvedCustomization, WebsiteCustomization, merge_customization,
};
pub use reviews::RatingStats;
pub use types::*;
pub use wishlist::Wishlist;
