//! Cart line items and the catalog view they are built from.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::domain::foundation::{ProductId, Timestamp};

/// Current catalog data for a product.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductInfo {
    pub id: ProductId,
    pub name: String,
    #[serde(default)]
    pub sku: String,
    pub price: Decimal,
    #[serde(default)]
    pub image_url: String,
    #[serde(default)]
    pub category: String,
    pub is_active: bool,
    #[serde(default)]
    pub stock_qty: i64,
}

impl ProductInfo {
    /// An active product with only the fields a cart line needs.
    pub fn active(id: ProductId, name: impl Into<String>, price: Decimal) -> Self {
        Self {
            id,
            name: name.into(),
            sku: String::new(),
            price,
            image_url: String::new(),
            category: String::new(),
            is_active: true,
            stock_qty: 0,
        }
    }

    /// Active and carrying a non-negative price.
    pub fn is_sellable(&self) -> bool {
        self.is_active && self.price >= Decimal::ZERO
    }
}

/// One line of a cart.
///
/// `subtotal` is derived from `price * quantity` and is recomputed by every
/// mutation; it cannot be set directly.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartItem {
    product_id: ProductId,
    product_name: String,
    sku: String,
    price: Decimal,
    quantity: u32,
    image_url: String,
    category: String,
    subtotal: Decimal,
    added_at: Timestamp,
}

impl CartItem {
    /// Creates a line with no display details.
    pub fn new(product_id: ProductId, price: Decimal, quantity: u32) -> Self {
        Self {
            product_id,
            product_name: String::new(),
            sku: String::new(),
            price,
            quantity,
            image_url: String::new(),
            category: String::new(),
            subtotal: line_subtotal(price, quantity),
            added_at: Timestamp::now(),
        }
    }

    /// Creates a line from catalog data, copying its display fields.
    pub fn from_product(product: &ProductInfo, quantity: u32) -> Self {
        Self::new(product.id.clone(), product.price, quantity).with_details(
            product.name.clone(),
            product.sku.clone(),
            product.image_url.clone(),
            product.category.clone(),
        )
    }

    /// Replaces the denormalized display fields.
    pub fn with_details(
        mut self,
        product_name: impl Into<String>,
        sku: impl Into<String>,
        image_url: impl Into<String>,
        category: impl Into<String>,
    ) -> Self {
        self.product_name = product_name.into();
        self.sku = sku.into();
        self.image_url = image_url.into();
        self.category = category.into();
        self
    }

    pub fn product_id(&self) -> &ProductId {
        &self.product_id
    }

    pub fn product_name(&self) -> &str {
        &self.product_name
    }

    pub fn sku(&self) -> &str {
        &self.sku
    }

    pub fn price(&self) -> Decimal {
        self.price
    }

    pub fn quantity(&self) -> u32 {
        self.quantity
    }

    pub fn image_url(&self) -> &str {
        &self.image_url
    }

    pub fn category(&self) -> &str {
        &self.category
    }

    pub fn subtotal(&self) -> Decimal {
        self.subtotal
    }

    pub fn added_at(&self) -> &Timestamp {
        &self.added_at
    }

    pub(crate) fn set_quantity(&mut self, quantity: u32) {
        self.quantity = quantity;
        self.subtotal = line_subtotal(self.price, quantity);
    }

    pub(crate) fn set_price(&mut self, price: Decimal) {
        self.price = price;
        self.subtotal = line_subtotal(price, self.quantity);
    }

    pub(crate) fn stamp_added_now(&mut self) {
        self.added_at = Timestamp::now();
    }
}

fn line_subtotal(price: Decimal, quantity: u32) -> Decimal {
    price * Decimal::from(quantity)
}
