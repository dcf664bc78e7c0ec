//! Orbit 360 storefront library.
//!
//! Serves the public storefront API for every store on the platform. Each
//! request is routed to a store by its `?domain=` parameter or `Host`
//! header; catalog reads are scoped to that store, while the shopper's cart
//! and wishlist live in their session.
//!
//! The binary in `main.rs` wires configuration, the database pool and the
//! production middleware around [`routes::app`].

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod config;
pub mod db;
pub mod error;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod services;
pub mod state;
