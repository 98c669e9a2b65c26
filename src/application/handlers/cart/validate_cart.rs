//! ValidateCartHandler - Reconciles a cart against current catalog and
//! inventory data. GetCartSummaryHandler builds on it.

use std::sync::Arc;

use rust_decimal::Decimal;
use serde::Serialize;

use crate::domain::cart::{Cart, CartError, CartIdentity, CartSummary};
use crate::domain::foundation::ProductId;
use crate::ports::{CartStore, InventoryService, ProductCatalog};

use super::shared::{check_stock, load_live_cart, store_failure};
use super::StockCheck;

#[derive(Debug, Clone)]
pub struct ValidateCartQuery {
    pub identity: CartIdentity,
}

/// One change made while reconciling a cart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum CartAdjustment {
    #[serde(rename_all = "camelCase")]
    Removed { product_id: ProductId, reason: String },
    #[serde(rename_all = "camelCase")]
    Repriced {
        product_id: ProductId,
        old_price: Decimal,
        new_price: Decimal,
    },
    #[serde(rename_all = "camelCase")]
    DetailsRefreshed { product_id: ProductId, product_name: String },
    #[serde(rename_all = "camelCase")]
    QuantityReduced {
        product_id: ProductId,
        from: u32,
        to: u32,
    },
}

#[derive(Debug, Clone)]
pub struct ValidateCartResult {
    pub cart: Cart,
    pub adjustments: Vec<CartAdjustment>,
}

/// Drops unavailable lines, refreshes prices and display fields, and clamps
/// quantities to stock.
///
/// Runs without the lease; the cart is saved only when something changed.
pub struct ValidateCartHandler {
    store: Arc<dyn CartStore>,
    catalog: Arc<dyn ProductCatalog>,
    inventory: Arc<dyn InventoryService>,
}

impl ValidateCartHandler {
    pub fn new(
        store: Arc<dyn CartStore>,
        catalog: Arc<dyn ProductCatalog>,
        inventory: Arc<dyn InventoryService>,
    ) -> Self {
        Self {
            store,
            catalog,
            inventory,
        }
    }

    pub async fn handle(&self, query: ValidateCartQuery) -> Result<ValidateCartResult, CartError> {
        let owner_id = query.identity.id();
        let mut cart = load_live_cart(self.store.as_ref(), owner_id)
            .await?
            .ok_or_else(|| CartError::not_found(owner_id.clone()))?;

        let mut adjustments = Vec::new();
        let lines: Vec<(ProductId, Decimal, u32)> = cart
            .items()
            .iter()
            .map(|line| (line.product_id().clone(), line.price(), line.quantity()))
            .collect();

        for (product_id, price, quantity) in lines {
            self.reconcile_line(&mut cart, &product_id, price, quantity, &mut adjustments)
                .await?;
        }

        if !adjustments.is_empty() {
            self.store
                .save(&cart)
                .await
                .map_err(|e| store_failure(owner_id, e))?;
            tracing::info!(
                owner_id = %owner_id,
                changes = adjustments.len(),
                "cart reconciled"
            );
        }

        Ok(ValidateCartResult { cart, adjustments })
    }

    async fn reconcile_line(
        &self,
        cart: &mut Cart,
        product_id: &ProductId,
        price: Decimal,
        quantity: u32,
        adjustments: &mut Vec<CartAdjustment>,
    ) -> Result<(), CartError> {
        let product = match self.catalog.get_product(product_id).await {
            Ok(product) if product.is_sellable() => product,
            Ok(_) => {
                adjustments.push(drop_line(cart, product_id, "product is no longer available"));
                return Ok(());
            }
            Err(e) => {
                tracing::warn!(product_id = %product_id, error = %e, "product lookup failed during validation");
                adjustments.push(drop_line(cart, product_id, "product could not be found"));
                return Ok(());
            }
        };

        if cart.refresh_item_details(product_id, &product)? {
            adjustments.push(CartAdjustment::DetailsRefreshed {
                product_id: product_id.clone(),
                product_name: product.name.clone(),
            });
        }

        if product.price != price && cart.reprice_item(product_id, product.price)? {
            adjustments.push(CartAdjustment::Repriced {
                product_id: product_id.clone(),
                old_price: price,
                new_price: product.price,
            });
        }

        if check_stock(self.inventory.as_ref(), product_id, quantity).await != StockCheck::Unavailable {
            return Ok(());
        }

        match self.inventory.available_quantity(product_id).await {
            Ok(0) => adjustments.push(drop_line(cart, product_id, "product is out of stock")),
            Err(e) => {
                tracing::warn!(product_id = %product_id, error = %e, "stock level lookup failed during validation");
                adjustments.push(drop_line(cart, product_id, "stock level unknown"));
            }
            Ok(available) if available < quantity => {
                cart.clamp_item_quantity(product_id, available)?;
                adjustments.push(CartAdjustment::QuantityReduced {
                    product_id: product_id.clone(),
                    from: quantity,
                    to: available,
                });
            }
            Ok(_) => {}
        }
        Ok(())
    }
}

fn drop_line(cart: &mut Cart, product_id: &ProductId, reason: &str) -> CartAdjustment {
    cart.retain_items(|line| line.product_id() != product_id);
    tracing::info!(owner_id = %cart.owner_id(), product_id = %product_id, reason, "removed item during validation");
    CartAdjustment::Removed {
        product_id: product_id.clone(),
        reason: reason.to_string(),
    }
}

/// Validates the cart, then projects it for checkout.
pub struct GetCartSummaryHandler {
    validate: ValidateCartHandler,
}

impl GetCartSummaryHandler {
    pub fn new(validate: ValidateCartHandler) -> Self {
        Self { validate }
    }

    pub async fn handle(&self, query: ValidateCartQuery) -> Result<CartSummary, CartError> {
        Ok(self.validate.handle(query).await?.cart.summary())
    }
}

#[cfg(test)]
mod tests {
    use super::super::test_support::*;
    use super::*;
    use crate::domain::cart::CartItem;
    use chrono::Duration;

    fn handler(f: &Fixture) -> ValidateCartHandler {
        ValidateCartHandler::new(f.store.clone(), f.catalog.clone(), f.inventory.clone())
    }

    fn query() -> ValidateCartQuery {
        ValidateCartQuery {
            identity: user("u-1"),
        }
    }

    /// Seeds lines carrying the fixture catalog's names.
    async fn seed(f: &Fixture, lines: &[(&str, &str, u32)]) -> Cart {
        let mut cart = Cart::new(user("u-1").id().clone(), Duration::days(1));
        for (product, price, quantity) in lines {
            let name = match *product {
                "prod-1" => "Widget",
                "prod-2" => "Gadget",
                _ => "",
            };
            let line = CartItem::new(pid(product), dec(price), *quantity).with_details(name, "", "", "");
            cart.add_item(line, 100, 10).unwrap();
        }
        f.store.save(&cart).await.unwrap();
        cart
    }

    #[tokio::test]
    async fn unchanged_cart_is_not_rewritten() {
        let f = Fixture::new();
        let seeded = seed(&f, &[("prod-1", "10.99", 1)]).await;

        let result = handler(&f).handle(query()).await.unwrap();

        assert!(result.adjustments.is_empty());
        assert_eq!(result.cart, seeded);
    }

    #[tokio::test]
    async fn reprices_from_catalog() {
        let f = Fixture::new();
        seed(&f, &[("prod-1", "9.99", 2)]).await;

        let result = handler(&f).handle(query()).await.unwrap();

        assert_eq!(result.cart.total_price(), dec("21.98"));
        assert_eq!(
            result.adjustments,
            vec![CartAdjustment::Repriced {
                product_id: pid("prod-1"),
                old_price: dec("9.99"),
                new_price: dec("10.99"),
            }]
        );
        let stored = f.store.get(user("u-1").id()).await.unwrap().unwrap();
        assert_eq!(stored.total_price(), dec("21.98"));
    }

    #[tokio::test]
    async fn drops_inactive_and_unknown_products() {
        let f = Fixture::new();
        seed(&f, &[("prod-1", "10.99", 1), ("prod-2", "5.00", 1), ("ghost", "1.00", 1)]).await;
        f.catalog.set_active(&pid("prod-2"), false).await;

        let result = handler(&f).handle(query()).await.unwrap();

        assert_eq!(result.cart.items().len(), 1);
        assert!(result.cart.has_item(&pid("prod-1")));
        assert_eq!(result.adjustments.len(), 2);
    }

    #[tokio::test]
    async fn refreshes_renamed_products() {
        let f = Fixture::new();
        seed(&f, &[("prod-1", "10.99", 1)]).await;
        f.catalog.upsert(product("prod-1", "Widget Pro", "10.99")).await;

        let result = handler(&f).handle(query()).await.unwrap();

        assert_eq!(
            result.cart.get_item(&pid("prod-1")).unwrap().product_name(),
            "Widget Pro"
        );
        assert_eq!(
            result.adjustments,
            vec![CartAdjustment::DetailsRefreshed {
                product_id: pid("prod-1"),
                product_name: "Widget Pro".to_string(),
            }]
        );
        let stored = f.store.get(user("u-1").id()).await.unwrap().unwrap();
        assert_eq!(stored.get_item(&pid("prod-1")).unwrap().product_name(), "Widget Pro");
    }

    #[tokio::test]
    async fn drops_lines_with_negative_catalog_price() {
        let f = Fixture::new();
        seed(&f, &[("prod-1", "10.99", 1)]).await;
        f.catalog.set_price(&pid("prod-1"), dec("-1.00")).await;

        let result = handler(&f).handle(query()).await.unwrap();

        assert!(result.cart.is_empty());
        assert!(matches!(
            result.adjustments.as_slice(),
            [CartAdjustment::Removed { .. }]
        ));
    }

    #[tokio::test]
    async fn clamps_to_available_stock() {
        let f = Fixture::new();
        seed(&f, &[("prod-1", "10.99", 5)]).await;
        f.inventory.set_stock(&pid("prod-1"), 3).await;

        let result = handler(&f).handle(query()).await.unwrap();

        assert_eq!(result.cart.get_item(&pid("prod-1")).unwrap().quantity(), 3);
        assert_eq!(result.cart.total_items(), 3);
    }

    #[tokio::test]
    async fn drops_out_of_stock_lines() {
        let f = Fixture::new();
        seed(&f, &[("prod-1", "10.99", 5)]).await;
        f.inventory.set_stock(&pid("prod-1"), 0).await;

        let result = handler(&f).handle(query()).await.unwrap();

        assert!(result.cart.is_empty());
    }

    #[tokio::test]
    async fn inventory_outage_keeps_lines() {
        let f = Fixture::new();
        seed(&f, &[("prod-1", "10.99", 5)]).await;
        f.inventory.set_unavailable(true);

        let result = handler(&f).handle(query()).await.unwrap();

        assert_eq!(result.cart.total_items(), 5);
    }

    #[tokio::test]
    async fn missing_cart_is_not_found() {
        let f = Fixture::new();
        let result = handler(&f).handle(query()).await;
        assert!(matches!(result, Err(CartError::NotFound(_))));
    }

    #[tokio::test]
    async fn summary_reflects_reconciled_cart() {
        let f = Fixture::new();
        seed(&f, &[("prod-1", "9.99", 1), ("prod-2", "5.00", 2)]).await;
        let summary_handler = GetCartSummaryHandler::new(handler(&f));

        let summary = summary_handler.handle(query()).await.unwrap();

        assert_eq!(summary.total_price, dec("20.99"));
        assert_eq!(summary.total_items, 3);
        assert_eq!(summary.items.len(), 2);
    }
}
