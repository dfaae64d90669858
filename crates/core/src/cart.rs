//! Cart value type and stock-checked reconciliation.
//!
//! A [`Cart`] is an explicit, passed-around value: the server loads it from
//! the session's row, mutates it here, and persists the result. All stock
//! knowledge comes in from the caller as a [`StockSnapshot`] read in the same
//! transaction, so the capacity guarantee is as strong as the surrounding
//! transaction makes it.
//!
//! Line identity is the `(product, variant-or-absence)` pair: a flat-stock
//! line and a variant line for the same product are distinct lines and are
//! never merged.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::types::ProductId;

/// Available stock for one line identity, read at mutation time.
#[derive(Debug, Clone, Copy)]
pub struct StockSnapshot {
    /// Units currently available for the (product, variant) identity.
    pub available: u32,
    /// The variant's additional price, zero for flat-stock products.
    ///
    /// Recorded on the line at add time and deliberately never refreshed,
    /// even if the template's price changes later.
    pub price_delta: Decimal,
}

/// One line of a cart.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CartLine {
    pub product_id: ProductId,
    pub quantity: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub variant_label: Option<String>,
    #[serde(default)]
    pub price_delta: Decimal,
}

impl CartLine {
    fn matches(&self, product_id: ProductId, variant_label: Option<&str>) -> bool {
        self.product_id == product_id && self.variant_label.as_deref() == variant_label
    }
}

/// Errors from cart reconciliation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CartError {
    /// The requested quantity would exceed currently known available stock.
    #[error("only {available} available")]
    CapacityExceeded { available: u32 },

    /// No line with the requested identity exists in the cart.
    #[error("item not in cart")]
    LineNotFound,

    /// A quantity of zero (or less) was requested where at least one unit
    /// is required.
    #[error("quantity must be at least 1")]
    ZeroQuantity,
}

/// An ordered list of cart lines owned by one session.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Cart {
    lines: Vec<CartLine>,
}

impl Cart {
    /// Create an empty cart.
    #[must_use]
    pub const fn new() -> Self {
        Self { lines: Vec::new() }
    }

    /// Rebuild a cart from persisted lines.
    #[must_use]
    pub const fn from_lines(lines: Vec<CartLine>) -> Self {
        Self { lines }
    }

    /// Consume the cart, yielding its lines for persistence.
    #[must_use]
    pub fn into_lines(self) -> Vec<CartLine> {
        self.lines
    }

    /// The cart's lines in insertion order.
    #[must_use]
    pub fn lines(&self) -> &[CartLine] {
        &self.lines
    }

    /// Total unit count across all lines.
    #[must_use]
    pub fn item_count(&self) -> u32 {
        self.lines.iter().map(|line| line.quantity).sum()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Quantity currently held for one line identity.
    #[must_use]
    pub fn quantity_of(&self, product_id: ProductId, variant_label: Option<&str>) -> u32 {
        self.lines
            .iter()
            .find(|line| line.matches(product_id, variant_label))
            .map_or(0, |line| line.quantity)
    }

    /// Merge a requested addition into the cart.
    ///
    /// Finds the line with the same identity and raises its quantity, or
    /// appends a new line carrying the snapshot's `price_delta`. Either the
    /// whole requested quantity applies or none of it does: if the resulting
    /// quantity would exceed `stock.available` the cart is left unchanged.
    ///
    /// # Errors
    ///
    /// Returns [`CartError::ZeroQuantity`] for a zero quantity and
    /// [`CartError::CapacityExceeded`] when the merged quantity would pass
    /// available stock.
    pub fn add(
        &mut self,
        product_id: ProductId,
        quantity: u32,
        variant_label: Option<&str>,
        stock: StockSnapshot,
    ) -> Result<(), CartError> {
        if quantity == 0 {
            return Err(CartError::ZeroQuantity);
        }

        match self
            .lines
            .iter_mut()
            .find(|line| line.matches(product_id, variant_label))
        {
            Some(existing) => {
                let new_quantity = existing.quantity.saturating_add(quantity);
                if new_quantity > stock.available {
                    return Err(CartError::CapacityExceeded {
                        available: stock.available,
                    });
                }
                existing.quantity = new_quantity;
            }
            None => {
                if quantity > stock.available {
                    return Err(CartError::CapacityExceeded {
                        available: stock.available,
                    });
                }
                self.lines.push(CartLine {
                    product_id,
                    quantity,
                    variant_label: variant_label.map(str::to_owned),
                    price_delta: stock.price_delta,
                });
            }
        }

        Ok(())
    }

    /// Set the absolute quantity for a line identity.
    ///
    /// A quantity of zero or less removes the line instead of storing zero.
    /// The line must already exist; `set_quantity` never creates lines.
    ///
    /// # Errors
    ///
    /// Returns [`CartError::LineNotFound`] if no line has the identity, and
    /// [`CartError::CapacityExceeded`] when the new quantity would pass
    /// available stock.
    pub fn set_quantity(
        &mut self,
        product_id: ProductId,
        variant_label: Option<&str>,
        quantity: i64,
        stock: StockSnapshot,
    ) -> Result<(), CartError> {
        let position = self
            .lines
            .iter()
            .position(|line| line.matches(product_id, variant_label))
            .ok_or(CartError::LineNotFound)?;

        if quantity <= 0 {
            self.lines.remove(position);
            return Ok(());
        }

        let quantity = u32::try_from(quantity).map_err(|_| CartError::CapacityExceeded {
            available: stock.available,
        })?;
        if quantity > stock.available {
            return Err(CartError::CapacityExceeded {
                available: stock.available,
            });
        }

        if let Some(line) = self.lines.get_mut(position) {
            line.quantity = quantity;
        }
        Ok(())
    }

    /// Delete the one line whose identity matches exactly.
    ///
    /// Removing by product alone never deletes a variant line for the same
    /// product; the variant-or-absence part of the identity must match.
    ///
    /// # Errors
    ///
    /// Returns [`CartError::LineNotFound`] if no line has the identity.
    pub fn remove(
        &mut self,
        product_id: ProductId,
        variant_label: Option<&str>,
    ) -> Result<(), CartError> {
        let position = self
            .lines
            .iter()
            .position(|line| line.matches(product_id, variant_label))
            .ok_or(CartError::LineNotFound)?;
        self.lines.remove(position);
        Ok(())
    }

    /// Drop every line.
    pub fn clear(&mut self) {
        self.lines.clear();
    }

    /// Compute the cart total from current base prices.
    ///
    /// `base_price_of` supplies the product's base price as of now; the total
    /// is `(base + line.price_delta) * quantity` summed over lines. Lines
    /// whose product no longer exists are skipped. Computed fresh on every
    /// call, never cached, so a price change after add is reflected
    /// immediately while the recorded `price_delta` is not.
    pub fn total<F>(&self, mut base_price_of: F) -> Decimal
    where
        F: FnMut(ProductId) -> Option<Decimal>,
    {
        self.lines
            .iter()
            .filter_map(|line| {
                let base = base_price_of(line.product_id)?;
                Some((base + line.price_delta) * Decimal::from(line.quantity))
            })
            .sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn flat(available: u32) -> StockSnapshot {
        StockSnapshot {
            available,
            price_delta: Decimal::ZERO,
        }
    }

    fn variant(available: u32, delta: Decimal) -> StockSnapshot {
        StockSnapshot {
            available,
            price_delta: delta,
        }
    }

    #[test]
    fn test_add_merges_identical_identity() {
        let product = ProductId::generate();
        let mut cart = Cart::new();

        cart.add(product, 1, None, flat(5)).unwrap();
        cart.add(product, 2, None, flat(5)).unwrap();

        assert_eq!(cart.lines().len(), 1);
        assert_eq!(cart.quantity_of(product, None), 3);
    }

    #[test]
    fn test_add_saturates_at_stock_and_leaves_cart_unchanged() {
        let product = ProductId::generate();
        let mut cart = Cart::new();

        // Repeated adds up to stock succeed; the one that would overshoot is
        // rejected whole, leaving the largest reachable quantity in place.
        cart.add(product, 2, None, flat(5)).unwrap();
        cart.add(product, 2, None, flat(5)).unwrap();
        let err = cart.add(product, 2, None, flat(5)).unwrap_err();

        assert_eq!(err, CartError::CapacityExceeded { available: 5 });
        assert_eq!(cart.quantity_of(product, None), 4);
    }

    #[test]
    fn test_add_rejects_new_line_over_stock() {
        let product = ProductId::generate();
        let mut cart = Cart::new();

        let err = cart.add(product, 3, None, flat(2)).unwrap_err();
        assert_eq!(err, CartError::CapacityExceeded { available: 2 });
        assert!(cart.is_empty());
    }

    #[test]
    fn test_zero_stock_variant_rejected() {
        let product = ProductId::generate();
        let mut cart = Cart::new();

        let err = cart
            .add(product, 1, Some("11x14"), variant(0, dec!(5)))
            .unwrap_err();
        assert_eq!(err, CartError::CapacityExceeded { available: 0 });
    }

    #[test]
    fn test_distinct_variants_form_distinct_lines() {
        let product = ProductId::generate();
        let mut cart = Cart::new();

        cart.add(product, 1, Some("8x10"), variant(4, Decimal::ZERO))
            .unwrap();
        cart.add(product, 1, Some("11x14"), variant(4, dec!(5)))
            .unwrap();

        assert_eq!(cart.lines().len(), 2);
    }

    #[test]
    fn test_flat_and_variant_lines_are_distinct() {
        let product = ProductId::generate();
        let mut cart = Cart::new();

        cart.add(product, 1, None, flat(4)).unwrap();
        cart.add(product, 1, Some("8x10"), variant(4, Decimal::ZERO))
            .unwrap();

        assert_eq!(cart.lines().len(), 2);
        assert_eq!(cart.quantity_of(product, None), 1);
        assert_eq!(cart.quantity_of(product, Some("8x10")), 1);
    }

    #[test]
    fn test_remove_is_exact_identity() {
        let product = ProductId::generate();
        let mut cart = Cart::new();
        cart.add(product, 1, Some("8x10"), variant(4, Decimal::ZERO))
            .unwrap();
        cart.add(product, 2, Some("11x14"), variant(4, dec!(5)))
            .unwrap();

        cart.remove(product, Some("8x10")).unwrap();

        assert_eq!(cart.lines().len(), 1);
        assert_eq!(cart.quantity_of(product, Some("11x14")), 2);

        // Removing by product alone does not touch the remaining variant line.
        assert_eq!(cart.remove(product, None), Err(CartError::LineNotFound));
        assert_eq!(cart.lines().len(), 1);
    }

    #[test]
    fn test_set_quantity_zero_equals_remove() {
        let product = ProductId::generate();

        let mut updated = Cart::new();
        updated.add(product, 2, None, flat(5)).unwrap();
        updated.set_quantity(product, None, 0, flat(5)).unwrap();

        let mut removed = Cart::new();
        removed.add(product, 2, None, flat(5)).unwrap();
        removed.remove(product, None).unwrap();

        assert_eq!(updated, removed);
        assert!(updated.is_empty());
    }

    #[test]
    fn test_set_quantity_checks_stock_and_existence() {
        let product = ProductId::generate();
        let mut cart = Cart::new();
        cart.add(product, 1, None, flat(3)).unwrap();

        assert_eq!(
            cart.set_quantity(product, None, 4, flat(3)),
            Err(CartError::CapacityExceeded { available: 3 })
        );
        assert_eq!(cart.quantity_of(product, None), 1);

        assert_eq!(
            cart.set_quantity(ProductId::generate(), None, 1, flat(3)),
            Err(CartError::LineNotFound)
        );
    }

    #[test]
    fn test_total_tracks_current_price_but_not_delta() {
        let product = ProductId::generate();
        let mut cart = Cart::new();
        cart.add(product, 2, Some("8x10"), variant(5, dec!(5)))
            .unwrap();

        // Base price at read time is joined in; the stored delta stays fixed.
        assert_eq!(cart.total(|_| Some(dec!(20))), dec!(50));
        assert_eq!(cart.total(|_| Some(dec!(30))), dec!(70));
    }

    #[test]
    fn test_total_skips_deleted_products() {
        let gone = ProductId::generate();
        let kept = ProductId::generate();
        let mut cart = Cart::new();
        cart.add(gone, 1, None, flat(5)).unwrap();
        cart.add(kept, 1, None, flat(5)).unwrap();

        let total = cart.total(|id| (id == kept).then(|| dec!(10)));
        assert_eq!(total, dec!(10));
    }

    #[test]
    fn test_clear_empties_cart() {
        let product = ProductId::generate();
        let mut cart = Cart::new();
        cart.add(product, 2, None, flat(5)).unwrap();

        cart.clear();
        assert!(cart.is_empty());
        assert_eq!(cart.item_count(), 0);
    }
}
