//! Session-related types.

/// Session keys for shopper state.
pub mod keys {
    /// Key for the cart document (JSON array of line items).
    pub const CART: &str = "cart";

    /// Key for the wishlist document (JSON array of product ids).
    pub const WISHLIST: &str = "wishlist";
}
