//! Wishlist of product ids.

use serde::{Deserialize, Serialize};

use crate::types::ProductId;

/// An ordered, duplicate-free list of product ids.
///
/// Persisted as a JSON array of ids. Loading a list that contains duplicates
/// keeps the first occurrence of each id.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Vec<ProductId>", into = "Vec<ProductId>")]
pub struct Wishlist {
    ids: Vec<ProductId>,
}

impl Wishlist {
    /// Create an empty wishlist.
    #[must_use]
    pub const fn new() -> Self {
        Self { ids: Vec::new() }
    }

    /// Product ids in the order they were added.
    #[must_use]
    pub fn ids(&self) -> &[ProductId] {
        &self.ids
    }

    /// Number of products.
    #[must_use]
    pub fn len(&self) -> usize {
        self.ids.len()
    }

    /// Whether the wishlist is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    /// Add a product. Returns `false` if it was already present.
    pub fn add(&mut self, id: ProductId) -> bool {
        if self.contains(id) {
            return false;
        }
        self.ids.push(id);
        true
    }

    /// Remove a product. Returns `false` if it was not present.
    pub fn remove(&mut self, id: ProductId) -> bool {
        let before = self.ids.len();
        self.ids.retain(|existing| *existing != id);
        self.ids.len() != before
    }

    /// Whether a product is on the wishlist.
    #[must_use]
    pub fn contains(&self, id: ProductId) -> bool {
        self.ids.contains(&id)
    }

    /// Remove every product.
    pub fn clear(&mut self) {
        self.ids.clear();
    }
}

impl From<Vec<ProductId>> for Wishlist {
    fn from(ids: Vec<ProductId>) -> Self {
        let mut wishlist = Self::new();
        for id in ids {
            wishlist.add(id);
        }
        wishlist
    }
}

impl From<Wishlist> for Vec<ProductId> {
    fn from(wishlist: Wishlist) -> Self {
        wishlist.ids
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn id(n: i32) -> ProductId {
        ProductId::new(n)
    }

    #[test]
    fn test_add_existing_is_noop() {
        let mut wishlist = Wishlist::new();
        assert!(wishlist.add(id(1)));
        assert!(!wishlist.add(id(1)));
        assert_eq!(wishlist.ids(), &[id(1)]);
    }

    #[test]
    fn test_contains_tracks_add_and_remove() {
        let mut wishlist = Wishlist::new();
        assert!(!wishlist.contains(id(7)));

        wishlist.add(id(7));
        assert!(wishlist.contains(id(7)));

        assert!(wishlist.remove(id(7)));
        assert!(!wishlist.contains(id(7)));
        assert!(!wishlist.remove(id(7)));
    }

    #[test]
    fn test_clear() {
        let mut wishlist = Wishlist::from(vec![id(1), id(2)]);
        wishlist.clear();
        assert!(wishlist.is_empty());
    }

    #[test]
    fn test_load_drops_duplicates_keeping_first() {
        let wishlist: Wishlist = serde_json::from_str("[3, 1, 3, 2, 1]").unwrap();
        assert_eq!(wishlist.ids(), &[id(3), id(1), id(2)]);
    }

    #[test]
    fn test_persisted_shape() {
        let wishlist = Wishlist::from(vec![id(5), id(9)]);
        let json = serde_json::to_string(&wishlist).unwrap();
        assert_eq!(json, "[5,9]");

        let reloaded: Wishlist = serde_json::from_str(&json).unwrap();
        assert_eq!(reloaded, wishlist);
    }
}
