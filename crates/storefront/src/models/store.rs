//! Store domain type.

use chrono::{DateTime, Utc};
use serde::Serialize;

use orbit_core::{StoreId, Subdomain, UserId};

/// A merchant's store (domain type).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Store {
    /// Unique store ID.
    pub id: StoreId,
    /// Routing key, unique across all stores.
    pub subdomain: Subdomain,
    /// Custom domain claimed by the store, unique when set.
    pub custom_domain: Option<String>,
    /// Display name.
    pub name: String,
    /// Merchandise category tag (e.g. `toys`, `beauty`).
    pub category: Option<String>,
    pub description: Option<String>,
    pub logo: Option<String>,
    /// Theme slug used by the renderer.
    pub theme: Option<String>,
    /// Soft-disable flag. Inactive stores are never served.
    pub is_active: bool,
    /// Merchant who owns the store.
    #[serde(skip_serializing)]
    pub owner_id: UserId,
    pub created_at: DateTime<Utc>,
}
