//! Ports - interfaces the application layer depends on.
//!
//! Each external collaborator gets one trait. Adapters implement them and are
//! chosen at wiring time; handlers hold `Arc<dyn Trait>`.

mod cart_store;
mod inventory;
mod product_catalog;
mod session_validator;

pub use cart_store::{cart_key, lock_key, store_ttl_for, CartStore, StoreError, MIN_STORE_TTL};
pub use inventory::{InventoryError, InventoryService};
pub use product_catalog::{CatalogError, ProductCatalog};
pub use session_validator::SessionValidator;
