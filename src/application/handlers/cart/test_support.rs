//! Shared fixtures for cart handler tests.

use std::sync::Arc;

use rust_decimal::Decimal;

use crate::adapters::cart_store::InMemoryCartStore;
use crate::adapters::catalog::InMemoryProductCatalog;
use crate::adapters::inventory::InMemoryInventory;
use crate::domain::cart::{CartIdentity, ProductInfo};
use crate::domain::foundation::{OwnerId, ProductId};

use super::CartPolicy;

pub(crate) struct Fixture {
    pub store: Arc<InMemoryCartStore>,
    pub catalog: Arc<InMemoryProductCatalog>,
    pub inventory: Arc<InMemoryInventory>,
    pub policy: CartPolicy,
}

impl Fixture {
    /// Two active products (`prod-1` at 10.99, `prod-2` at 5.00) with 50 in stock.
    pub fn new() -> Self {
        let catalog = InMemoryProductCatalog::new()
            .with_product(product("prod-1", "Widget", "10.99"))
            .with_product(product("prod-2", "Gadget", "5.00"));
        let inventory = InMemoryInventory::new()
            .with_stock(pid("prod-1"), 50)
            .with_stock(pid("prod-2"), 50);

        Self {
            store: Arc::new(InMemoryCartStore::new()),
            catalog: Arc::new(catalog),
            inventory: Arc::new(inventory),
            policy: CartPolicy::default(),
        }
    }
}

pub(crate) fn dec(raw: &str) -> Decimal {
    raw.parse().unwrap()
}

pub(crate) fn pid(raw: &str) -> ProductId {
    ProductId::new(raw).unwrap()
}

pub(crate) fn user(raw: &str) -> CartIdentity {
    CartIdentity::user(OwnerId::new(raw).unwrap())
}

pub(crate) fn guest(raw: &str) -> CartIdentity {
    CartIdentity::guest(OwnerId::new(raw).unwrap())
}

pub(crate) fn product(id: &str, name: &str, price: &str) -> ProductInfo {
    ProductInfo::active(pid(id), name, dec(price))
}
