//! Per-browser shopper state: cart and wishlist.
//!
//! Each document lives under its own key in a [`ShopperStorage`] (the
//! browser's session in production). A store object reads its document once
//! when opened and writes it back in full after every mutation. Unreadable
//! documents are treated as empty.

use std::collections::HashMap;
use std::future::Future;
use std::sync::{Arc, Mutex};

use serde::Serialize;
use serde::de::DeserializeOwned;
use thiserror::Error;
use tower_sessions::Session;
use tracing::warn;

use orbit_core::{Cart, CartError, CartItem, ProductId, Wishlist};

use crate::models::session_keys;

/// Errors from reading or writing shopper state.
#[derive(Debug, Error)]
pub enum ShopperError {
    /// The session store failed.
    #[error("session error: {0}")]
    Session(#[from] tower_sessions::session::Error),

    /// A document could not be encoded.
    #[error("encoding error: {0}")]
    Encode(#[from] serde_json::Error),

    /// The in-memory storage lock was poisoned.
    #[error("storage lock poisoned")]
    Poisoned,

    /// The requested change is not a valid cart.
    #[error(transparent)]
    Cart(#[from] CartError),
}

/// Key/value storage for shopper documents.
pub trait ShopperStorage: Send + Sync {
    /// Read a document, `None` if it was never written.
    fn load(
        &self,
        key: &'static str,
    ) -> impl Future<Output = Result<Option<serde_json::Value>, ShopperError>> + Send;

    /// Overwrite a document.
    fn save(
        &self,
        key: &'static str,
        value: serde_json::Value,
    ) -> impl Future<Output = Result<(), ShopperError>> + Send;

    /// Delete a document.
    fn delete(&self, key: &'static str) -> impl Future<Output = Result<(), ShopperError>> + Send;
}

impl ShopperStorage for Session {
    async fn load(&self, key: &'static str) -> Result<Option<serde_json::Value>, ShopperError> {
        Ok(self.get::<serde_json::Value>(key).await?)
    }

    async fn save(&self, key: &'static str, value: serde_json::Value) -> Result<(), ShopperError> {
        Ok(self.insert(key, value).await?)
    }

    async fn delete(&self, key: &'static str) -> Result<(), ShopperError> {
        self.remove::<serde_json::Value>(key).await?;
        Ok(())
    }
}

/// Process-local storage for tests and tools. Clones share the same data.
#[derive(Debug, Clone, Default)]
pub struct MemoryStorage {
    documents: Arc<Mutex<HashMap<&'static str, serde_json::Value>>>,
}

impl MemoryStorage {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl ShopperStorage for MemoryStorage {
    async fn load(&self, key: &'static str) -> Result<Option<serde_json::Value>, ShopperError> {
        let documents = self.documents.lock().map_err(|_| ShopperError::Poisoned)?;
        Ok(documents.get(key).cloned())
    }

    async fn save(&self, key: &'static str, value: serde_json::Value) -> Result<(), ShopperError> {
        let mut documents = self.documents.lock().map_err(|_| ShopperError::Poisoned)?;
        documents.insert(key, value);
        Ok(())
    }

    async fn delete(&self, key: &'static str) -> Result<(), ShopperError> {
        let mut documents = self.documents.lock().map_err(|_| ShopperError::Poisoned)?;
        documents.remove(key);
        Ok(())
    }
}

/// Read a document, treating read and parse failures as "no saved state".
async fn load_or_default<S, T>(storage: &S, key: &'static str) -> T
where
    S: ShopperStorage,
    T: DeserializeOwned + Default,
{
    let value = match storage.load(key).await {
        Ok(Some(value)) => value,
        Ok(None) => return T::default(),
        Err(e) => {
            warn!(error = %e, key, "failed to read shopper state, starting empty");
            return T::default();
        }
    };

    serde_json::from_value(value).unwrap_or_else(|e| {
        warn!(error = %e, key, "discarding unreadable shopper state");
        T::default()
    })
}

async fn persist<S, T>(storage: &S, key: &'static str, document: &T) -> Result<(), ShopperError>
where
    S: ShopperStorage,
    T: Serialize,
{
    storage.save(key, serde_json::to_value(document)?).await
}

/// The shopper's cart, bound to its storage.
pub struct CartStore<S> {
    storage: S,
    cart: Cart,
}

impl<S: ShopperStorage> CartStore<S> {
    /// Load the cart saved in `storage`.
    pub async fn open(storage: S) -> Self {
        let cart = load_or_default(&storage, session_keys::CART).await;
        Self { storage, cart }
    }

    #[must_use]
    pub const fn cart(&self) -> &Cart {
        &self.cart
    }

    /// Add units of a product, merging with an existing line.
    ///
    /// # Errors
    ///
    /// Returns `ShopperError::Cart` for an out-of-range price, otherwise
    /// `ShopperError` if the cart cannot be saved.
    pub async fn add(&mut self, item: CartItem) -> Result<&Cart, ShopperError> {
        self.cart.add(item)?;
        self.save().await
    }

    /// Set a line's quantity; below one removes the line.
    ///
    /// # Errors
    ///
    /// Returns `ShopperError` if the cart cannot be saved.
    pub async fn update_quantity(
        &mut self,
        id: ProductId,
        quantity: u32,
    ) -> Result<&Cart, ShopperError> {
        self.cart.update_quantity(id, quantity);
        self.save().await
    }

    /// Remove a product's line.
    ///
    /// # Errors
    ///
    /// Returns `ShopperError` if the cart cannot be saved.
    pub async fn remove(&mut self, id: ProductId) -> Result<&Cart, ShopperError> {
        self.cart.remove(id);
        self.save().await
    }

    /// Empty the cart.
    ///
    /// # Errors
    ///
    /// Returns `ShopperError` if the cart cannot be saved.
    pub async fn clear(&mut self) -> Result<&Cart, ShopperError> {
        self.cart.clear();
        self.save().await
    }

    async fn save(&self) -> Result<&Cart, ShopperError> {
        persist(&self.storage, session_keys::CART, &self.cart).await?;
        Ok(&self.cart)
    }
}

/// The shopper's wishlist, bound to its storage.
pub struct WishlistStore<S> {
    storage: S,
    wishlist: Wishlist,
}

impl<S: ShopperStorage> WishlistStore<S> {
    /// Load the wishlist saved in `storage`, dropping duplicate ids.
    pub async fn open(storage: S) -> Self {
        let wishlist = load_or_default(&storage, session_keys::WISHLIST).await;
        Self { storage, wishlist }
    }

    #[must_use]
    pub const fn wishlist(&self) -> &Wishlist {
        &self.wishlist
    }

    #[must_use]
    pub fn contains(&self, id: ProductId) -> bool {
        self.wishlist.contains(id)
    }

    /// Add a product. Already-present products leave storage untouched.
    ///
    /// # Errors
    ///
    /// Returns `ShopperError` if the wishlist cannot be saved.
    pub async fn add(&mut self, id: ProductId) -> Result<&Wishlist, ShopperError> {
        if self.wishlist.add(id) {
            persist(&self.storage, session_keys::WISHLIST, &self.wishlist).await?;
        }
        Ok(&self.wishlist)
    }

    /// Remove a product.
    ///
    /// # Errors
    ///
    /// Returns `ShopperError` if the wishlist cannot be saved.
    pub async fn remove(&mut self, id: ProductId) -> Result<&Wishlist, ShopperError> {
        if self.wishlist.remove(id) {
            persist(&self.storage, session_keys::WISHLIST, &self.wishlist).await?;
        }
        Ok(&self.wishlist)
    }

    /// Empty the wishlist.
    ///
    /// # Errors
    ///
    /// Returns `ShopperError` if the wishlist cannot be saved.
    pub async fn clear(&mut self) -> Result<&Wishlist, ShopperError> {
        self.wishlist.clear();
        persist(&self.storage, session_keys::WISHLIST, &self.wishlist).await?;
        Ok(&self.wishlist)
    }
}

/// Forget the shopper's cart and wishlist.
///
/// # Errors
///
/// Returns `ShopperError` if either document cannot be deleted.
pub async fn sign_out<S: ShopperStorage>(storage: &S) -> Result<(), ShopperError> {
    storage.delete(session_keys::CART).await?;
    storage.delete(session_keys::WISHLIST).await
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use std::str::FromStr;

    use rust_decimal::Decimal;
    use serde_json::json;

    use super::*;

    fn item(id: i32, quantity: u32) -> CartItem {
        CartItem {
            id: ProductId::new(id),
            name: format!("Product {id}"),
            price: Decimal::from_str("9.99").unwrap(),
            image: None,
            quantity,
        }
    }

    #[tokio::test]
    async fn test_cart_mutations_are_persisted() {
        let storage = MemoryStorage::new();

        let mut store = CartStore::open(storage.clone()).await;
        store.add(item(1, 1)).await.unwrap();
        store.add(item(1, 2)).await.unwrap();
        store.add(item(2, 1)).await.unwrap();

        let reopened = CartStore::open(storage.clone()).await;
        assert_eq!(reopened.cart(), store.cart());
        assert_eq!(reopened.cart().items()[0].quantity, 3);
        assert_eq!(reopened.cart().total_items(), 4);
    }

    #[tokio::test]
    async fn test_rejected_line_is_not_persisted() {
        let storage = MemoryStorage::new();
        let mut store = CartStore::open(storage.clone()).await;
        store.add(item(1, 1)).await.unwrap();

        let huge = CartItem {
            price: Decimal::MAX,
            ..item(2, 2)
        };
        let err = store.add(huge).await.unwrap_err();
        assert!(matches!(err, ShopperError::Cart(CartError::PriceOutOfRange)));

        let reopened = CartStore::open(storage).await;
        assert_eq!(reopened.cart().items().len(), 1);
    }

    #[tokio::test]
    async fn test_cart_update_below_one_removes() {
        let storage = MemoryStorage::new();
        let mut store = CartStore::open(storage.clone()).await;
        store.add(item(1, 1)).await.unwrap();

        store.update_quantity(ProductId::new(1), 0).await.unwrap();

        assert!(CartStore::open(storage).await.cart().is_empty());
    }

    #[tokio::test]
    async fn test_unreadable_cart_starts_empty() {
        let storage = MemoryStorage::new();
        storage
            .save(session_keys::CART, json!({"not": "a cart"}))
            .await
            .unwrap();

        let store = CartStore::open(storage).await;
        assert!(store.cart().is_empty());
    }

    #[tokio::test]
    async fn test_wishlist_add_is_idempotent() {
        let storage = MemoryStorage::new();
        let mut store = WishlistStore::open(storage.clone()).await;

        store.add(ProductId::new(4)).await.unwrap();
        store.add(ProductId::new(4)).await.unwrap();
        assert!(store.contains(ProductId::new(4)));

        let reopened = WishlistStore::open(storage).await;
        assert_eq!(reopened.wishlist().ids(), &[ProductId::new(4)]);
    }

    #[tokio::test]
    async fn test_wishlist_open_drops_duplicates() {
        let storage = MemoryStorage::new();
        storage
            .save(session_keys::WISHLIST, json!([2, 2, 5]))
            .await
            .unwrap();

        let store = WishlistStore::open(storage).await;
        assert_eq!(
            store.wishlist().ids(),
            &[ProductId::new(2), ProductId::new(5)]
        );
    }

    #[tokio::test]
    async fn test_sign_out_clears_both_documents() {
        let storage = MemoryStorage::new();
        CartStore::open(storage.clone())
            .await
            .add(item(1, 1))
            .await
            .unwrap();
        WishlistStore::open(storage.clone())
            .await
            .add(ProductId::new(1))
            .await
            .unwrap();

        sign_out(&storage).await.unwrap();

        assert!(CartStore::open(storage.clone()).await.cart().is_empty());
        assert!(WishlistStore::open(storage).await.wishlist().is_empty());
    }
}
