//! Loading and collaborator checks shared by the cart handlers.

use crate::domain::cart::{Cart, CartError, CartIdentity, ProductInfo};
use crate::domain::foundation::{OwnerId, ProductId};
use crate::ports::{CartStore, CatalogError, InventoryService, ProductCatalog, StoreError};

use super::{CartPolicy, StockCheck};

/// Logs a store failure and converts it.
pub(crate) fn store_failure(owner_id: &OwnerId, err: StoreError) -> CartError {
    tracing::error!(owner_id = %owner_id, error = %err, "cart store failure");
    CartError::from(err)
}

/// Loads the owner's cart, treating a logically expired record as absent.
///
/// Expired records are deleted on sight.
pub(crate) async fn load_live_cart(
    store: &dyn CartStore,
    owner_id: &OwnerId,
) -> Result<Option<Cart>, CartError> {
    let cart = store
        .get(owner_id)
        .await
        .map_err(|e| store_failure(owner_id, e))?;

    match cart {
        Some(cart) if cart.is_expired() => {
            tracing::info!(owner_id = %owner_id, "discarding expired cart");
            store
                .delete(owner_id)
                .await
                .map_err(|e| store_failure(owner_id, e))?;
            Ok(None)
        }
        other => Ok(other),
    }
}

/// Loads the live cart or builds a fresh one with the identity's lifetime.
///
/// The fresh cart is not persisted; the second value says whether it was
/// created.
pub(crate) async fn load_or_new(
    store: &dyn CartStore,
    identity: &CartIdentity,
    policy: &CartPolicy,
) -> Result<(Cart, bool), CartError> {
    match load_live_cart(store, identity.id()).await? {
        Some(cart) => Ok((cart, false)),
        None => Ok((
            Cart::new(identity.id().clone(), policy.ttl_for(identity.kind())),
            true,
        )),
    }
}

/// Looks up a product and requires it to be active with a non-negative price.
pub(crate) async fn fetch_active_product(
    catalog: &dyn ProductCatalog,
    product_id: &ProductId,
) -> Result<ProductInfo, CartError> {
    let product = catalog.get_product(product_id).await.map_err(|e| {
        match &e {
            CatalogError::NotFound(_) => {
                tracing::debug!(product_id = %product_id, "product not in catalog")
            }
            _ => tracing::warn!(product_id = %product_id, error = %e, "product lookup failed"),
        }
        CartError::ProductNotFound(product_id.clone())
    })?;

    if !product.is_sellable() {
        if product.is_active {
            tracing::warn!(product_id = %product_id, price = %product.price, "catalog returned a negative price");
        }
        return Err(CartError::ProductUnavailable(product_id.clone()));
    }
    Ok(product)
}

/// Asks inventory about `quantity` units, logging when it cannot answer.
pub(crate) async fn check_stock(
    inventory: &dyn InventoryService,
    product_id: &ProductId,
    quantity: u32,
) -> StockCheck {
    let check = StockCheck::from(inventory.check_availability(product_id, quantity).await);
    if let StockCheck::Unknown(reason) = &check {
        tracing::warn!(
            product_id = %product_id,
            quantity,
            error = %reason,
            "inventory check failed, allowing operation"
        );
    }
    check
}

/// Fails with `InsufficientStock` only when inventory explicitly says no.
pub(crate) async fn require_stock(
    inventory: &dyn InventoryService,
    product_id: &ProductId,
    quantity: u32,
) -> Result<(), CartError> {
    match check_stock(inventory, product_id, quantity).await {
        StockCheck::Unavailable => Err(CartError::InsufficientStock(product_id.clone())),
        StockCheck::Available | StockCheck::Unknown(_) => Ok(()),
    }
}
