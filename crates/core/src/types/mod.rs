//! Core types for Orbit storefronts.
//!
//! Type-safe wrappers for ids, store subdomains and request hosts.

pub mod host;
pub mod id;
pub mod subdomain;

pub use host::{HostRules, TenantTarget, classify_host, normalize_host};
pub use id::*;
pub use subdomain::{Subdomain, SubdomainError};
