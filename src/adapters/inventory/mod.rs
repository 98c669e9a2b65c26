//! Inventory adapters.

mod http;
mod in_memory;

pub use self::http::HttpInventoryService;
pub use in_memory::InMemoryInventory;
