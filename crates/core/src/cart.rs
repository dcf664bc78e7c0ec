//! Shopping cart line items.
//!
//! The cart is a small ordered list persisted as a JSON array of
//! `{id, name, price, image?, quantity}` objects. Every mutation happens on
//! the whole value; callers write the full list back after each change.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::types::ProductId;

/// Largest accepted unit price, the range of a `NUMERIC(12, 2)` column.
pub const MAX_UNIT_PRICE: Decimal = Decimal::from_parts(0xD4A5_0FFF, 0xE8, 0, false, 2);

/// Errors from changing a cart.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CartError {
    #[error("price must be between 0 and {}", MAX_UNIT_PRICE)]
    PriceOutOfRange,
}

/// A product line in the cart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartItem {
    pub id: ProductId,
    pub name: String,
    pub price: Decimal,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    pub quantity: u32,
}

impl CartItem {
    /// Price times quantity, saturating at `Decimal::MAX`.
    #[must_use]
    pub fn line_total(&self) -> Decimal {
        self.price.saturating_mul(Decimal::from(self.quantity))
    }
}

/// An ordered list of cart lines, at most one per product.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Cart {
    items: Vec<CartItem>,
}

impl Cart {
    /// Create an empty cart.
    #[must_use]
    pub const fn new() -> Self {
        Self { items: Vec::new() }
    }

    /// Lines in the order they were first added.
    #[must_use]
    pub fn items(&self) -> &[CartItem] {
        &self.items
    }

    /// Whether the cart has no lines.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Add `item.quantity` units of a product.
    ///
    /// A product already in the cart has its quantity increased instead of
    /// gaining a second line. A quantity of zero adds one unit.
    ///
    /// # Errors
    ///
    /// Returns `CartError::PriceOutOfRange` if the price is negative or
    /// above [`MAX_UNIT_PRICE`]; the cart is left unchanged.
    pub fn add(&mut self, item: CartItem) -> Result<(), CartError> {
        if item.price.is_sign_negative() || item.price > MAX_UNIT_PRICE {
            return Err(CartError::PriceOutOfRange);
        }

        let quantity = item.quantity.max(1);

        if let Some(existing) = self.items.iter_mut().find(|line| line.id == item.id) {
            existing.quantity = existing.quantity.saturating_add(quantity);
            return Ok(());
        }

        self.items.push(CartItem { quantity, ..item });
        Ok(())
    }

    /// Remove a product's line. Absent products are ignored.
    pub fn remove(&mut self, id: ProductId) {
        self.items.retain(|line| line.id != id);
    }

    /// Set a line's quantity. Zero removes the line; absent products are ignored.
    pub fn update_quantity(&mut self, id: ProductId, quantity: u32) {
        if quantity < 1 {
            self.remove(id);
            return;
        }

        if let Some(line) = self.items.iter_mut().find(|line| line.id == id) {
            line.quantity = quantity;
        }
    }

    /// Remove every line.
    pub fn clear(&mut self) {
        self.items.clear();
    }

    /// Total units across all lines.
    #[must_use]
    pub fn total_items(&self) -> u64 {
        self.items.iter().map(|line| u64::from(line.quantity)).sum()
    }

    /// Sum of all line totals, saturating at `Decimal::MAX`.
    #[must_use]
    pub fn subtotal(&self) -> Decimal {
        self.items
            .iter()
            .map(CartItem::line_total)
            .fold(Decimal::ZERO, Decimal::saturating_add)
    }
}
