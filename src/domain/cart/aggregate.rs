//! Cart aggregate.
//!
//! A cart is owned by exactly one identity (user or guest) and holds at most
//! one line per product. Totals are always recomputed from the lines, never
//! adjusted incrementally.

use chrono::Duration;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::{CartError, CartItem, CartSummary, ProductInfo};
use crate::domain::foundation::{OwnerId, ProductId, Timestamp};

/// Shopping cart aggregate.
///
/// # Invariants
///
/// - `total_price` equals the sum of line subtotals
/// - `total_items` equals the sum of line quantities
/// - product ids are unique across `items`
/// - no line has quantity 0
/// - mutations other than `clear` and `extend_expiry` fail once expired
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Cart {
    owner_id: OwnerId,
    items: Vec<CartItem>,
    total_price: Decimal,
    total_items: u64,
    created_at: Timestamp,
    updated_at: Timestamp,
    expires_at: Timestamp,
}

impl Cart {
    /// Creates an empty cart that expires `ttl` from now.
    pub fn new(owner_id: OwnerId, ttl: Duration) -> Self {
        let now = Timestamp::now();
        Self {
            owner_id,
            items: Vec::new(),
            total_price: Decimal::ZERO,
            total_items: 0,
            created_at: now,
            updated_at: now,
            expires_at: now.plus(ttl),
        }
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Accessors
    // ─────────────────────────────────────────────────────────────────────────

    pub fn owner_id(&self) -> &OwnerId {
        &self.owner_id
    }

    pub fn items(&self) -> &[CartItem] {
        &self.items
    }

    pub fn total_price(&self) -> Decimal {
        self.total_price
    }

    pub fn total_items(&self) -> u64 {
        self.total_items
    }

    pub fn created_at(&self) -> &Timestamp {
        &self.created_at
    }

    pub fn updated_at(&self) -> &Timestamp {
        &self.updated_at
    }

    pub fn expires_at(&self) -> &Timestamp {
        &self.expires_at
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn has_item(&self, product_id: &ProductId) -> bool {
        self.position(product_id).is_some()
    }

    pub fn get_item(&self, product_id: &ProductId) -> Result<&CartItem, CartError> {
        self.position(product_id)
            .map(|idx| &self.items[idx])
            .ok_or_else(|| CartError::item_not_found(product_id.clone()))
    }

    /// True once the current instant is strictly past `expires_at`.
    pub fn is_expired(&self) -> bool {
        Timestamp::now().is_after(&self.expires_at)
    }

    /// Time left before expiry. Negative once expired.
    pub fn remaining_lifetime(&self) -> Duration {
        self.expires_at.duration_since(&Timestamp::now())
    }

    pub fn summary(&self) -> CartSummary {
        CartSummary {
            owner_id: self.owner_id.clone(),
            items: self.items.clone(),
            total_price: self.total_price,
            total_items: self.total_items,
        }
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Mutations
    // ─────────────────────────────────────────────────────────────────────────

    /// Adds a line, or merges into the existing line for the same product.
    ///
    /// A merge keeps the existing line's price and display fields.
    ///
    /// # Errors
    ///
    /// - `Expired` if the cart is past its expiry
    /// - `InvalidQuantity` if the incoming quantity is 0
    /// - `MaxQuantityExceeded` if the resulting line quantity is over `max_quantity`
    /// - `MaxItemsExceeded` if a new product would exceed `max_items`
    pub fn add_item(
        &mut self,
        mut item: CartItem,
        max_items: usize,
        max_quantity: u32,
    ) -> Result<(), CartError> {
        self.ensure_live()?;

        if item.quantity() == 0 {
            return Err(CartError::InvalidQuantity(0));
        }

        if let Some(idx) = self.position(item.product_id()) {
            let merged = u64::from(self.items[idx].quantity()) + u64::from(item.quantity());
            if merged > u64::from(max_quantity) {
                return Err(CartError::MaxQuantityExceeded {
                    limit: max_quantity,
                });
            }
            // merged <= max_quantity, so it fits in u32
            self.items[idx].set_quantity(merged as u32);
        } else {
            if self.items.len() >= max_items {
                return Err(CartError::MaxItemsExceeded { limit: max_items });
            }
            if item.quantity() > max_quantity {
                return Err(CartError::MaxQuantityExceeded {
                    limit: max_quantity,
                });
            }
            item.stamp_added_now();
            self.items.push(item);
        }

        self.recompute_totals();
        self.touch();
        Ok(())
    }

    /// Sets the quantity of an existing line. Zero removes the line.
    ///
    /// # Errors
    ///
    /// - `Expired` if the cart is past its expiry
    /// - `InvalidQuantity` if `quantity` is negative
    /// - `MaxQuantityExceeded` if `quantity` is over `max_quantity`
    /// - `ItemNotFound` if the product has no line
    pub fn update_item_quantity(
        &mut self,
        product_id: &ProductId,
        quantity: i64,
        max_quantity: u32,
    ) -> Result<(), CartError> {
        self.ensure_live()?;

        if quantity < 0 {
            return Err(CartError::InvalidQuantity(quantity));
        }
        if quantity > i64::from(max_quantity) {
            return Err(CartError::MaxQuantityExceeded {
                limit: max_quantity,
            });
        }

        let idx = self
            .position(product_id)
            .ok_or_else(|| CartError::item_not_found(product_id.clone()))?;

        if quantity == 0 {
            self.items.remove(idx);
        } else {
            self.items[idx].set_quantity(quantity as u32);
        }

        self.recompute_totals();
        self.touch();
        Ok(())
    }

    /// Removes the line for a product.
    pub fn remove_item(&mut self, product_id: &ProductId) -> Result<(), CartError> {
        self.ensure_live()?;

        let idx = self
            .position(product_id)
            .ok_or_else(|| CartError::item_not_found(product_id.clone()))?;
        self.items.remove(idx);

        self.recompute_totals();
        self.touch();
        Ok(())
    }

    /// Empties the cart. Allowed even when expired.
    pub fn clear(&mut self) {
        self.items.clear();
        self.recompute_totals();
        self.touch();
    }

    /// Moves the expiry to `ttl` from now. Allowed even when expired.
    pub fn extend_expiry(&mut self, ttl: Duration) {
        let now = Timestamp::now();
        self.expires_at = now.plus(ttl);
        self.updated_at = now;
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Reconciliation
    // ─────────────────────────────────────────────────────────────────────────

    /// Replaces a line's unit price. Returns whether the price changed.
    pub fn reprice_item(&mut self, product_id: &ProductId, price: Decimal) -> Result<bool, CartError> {
        let idx = self
            .position(product_id)
            .ok_or_else(|| CartError::item_not_found(product_id.clone()))?;

        if self.items[idx].price() == price {
            return Ok(false);
        }
        self.items[idx].set_price(price);
        self.recompute_totals();
        self.touch();
        Ok(true)
    }

    /// Copies the catalog's display fields onto a line. Returns whether any
    /// of name, SKU, image or category changed.
    pub fn refresh_item_details(
        &mut self,
        product_id: &ProductId,
        product: &ProductInfo,
    ) -> Result<bool, CartError> {
        let idx = self
            .position(product_id)
            .ok_or_else(|| CartError::item_not_found(product_id.clone()))?;

        let line = &self.items[idx];
        if line.product_name() == product.name
            && line.sku() == product.sku
            && line.image_url() == product.image_url
            && line.category() == product.category
        {
            return Ok(false);
        }
        let refreshed = line.clone().with_details(
            product.name.clone(),
            product.sku.clone(),
            product.image_url.clone(),
            product.category.clone(),
        );
        self.items[idx] = refreshed;
        self.touch();
        Ok(true)
    }

    /// Lowers a line's quantity to `quantity`. Zero drops the line.
    ///
    /// Returns whether the line changed. Never raises a quantity.
    pub fn clamp_item_quantity(
        &mut self,
        product_id: &ProductId,
        quantity: u32,
    ) -> Result<bool, CartError> {
        let idx = self
            .position(product_id)
            .ok_or_else(|| CartError::item_not_found(product_id.clone()))?;

        let current = self.items[idx].quantity();
        if quantity >= current {
            return Ok(false);
        }
        if quantity == 0 {
            self.items.remove(idx);
        } else {
            self.items[idx].set_quantity(quantity);
        }
        self.recompute_totals();
        self.touch();
        Ok(true)
    }

    /// Keeps only the lines matching `keep`. Returns how many were dropped.
    pub fn retain_items<F>(&mut self, mut keep: F) -> usize
    where
        F: FnMut(&CartItem) -> bool,
    {
        let before = self.items.len();
        self.items.retain(|item| keep(item));
        let dropped = before - self.items.len();
        if dropped > 0 {
            self.recompute_totals();
            self.touch();
        }
        dropped
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Internals
    // ─────────────────────────────────────────────────────────────────────────

    fn ensure_live(&self) -> Result<(), CartError> {
        if self.is_expired() {
            return Err(CartError::Expired);
        }
        Ok(())
    }

    fn position(&self, product_id: &ProductId) -> Option<usize> {
        self.items
            .iter()
            .position(|item| item.product_id() == product_id)
    }

    fn recompute_totals(&mut self) {
        self.total_price = self.items.iter().map(CartItem::subtotal).sum();
        self.total_items = self
            .items
            .iter()
            .map(|item| u64::from(item.quantity()))
            .sum();
    }

    fn touch(&mut self) {
        self.updated_at = Timestamp::now();
    }
}
