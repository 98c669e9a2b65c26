//! Product catalog adapters.

mod http;
mod in_memory;

pub use self::http::HttpProductCatalog;
pub use in_memory::InMemoryProductCatalog;
