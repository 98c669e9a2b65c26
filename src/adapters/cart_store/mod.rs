//! Cart store adapters.
//!
//! - `RedisCartStore` - production, shared across replicas
//! - `InMemoryCartStore` - tests and local development

mod in_memory;
mod redis;

pub use in_memory::InMemoryCartStore;
pub use self::redis::RedisCartStore;
