//! HTTP middleware stack for the storefront.
//!
//! # Middleware Order (outermost first)
//!
//! 1. Sentry layers (capture errors, transactions)
//! 2. Path normalization (trailing slashes)
//! 3. `TraceLayer` (request tracing)
//! 4. Request ID (add unique ID to each request)
//! 5. Session layer (tower-sessions with `PostgreSQL` store)
//! 6. Rate limiting on `/api` (governor)
//!
//! Extractors:
//! - [`CurrentStore`] - the active store addressed by the request
//! - [`ShopperSession`] - the shopper's session, required by cart and wishlist routes

pub mod rate_limit;
pub mod request_id;
pub mod session;
pub mod shopper;
pub mod tenant;

pub use rate_limit::api_rate_limiter;
pub use request_id::request_id_middleware;
pub use session::{create_session_layer, session_layer};
pub use shopper::ShopperSession;
pub use tenant::CurrentStore;
