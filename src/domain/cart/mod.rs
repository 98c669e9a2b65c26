//! Cart module - the shopping cart aggregate and its value types.

mod aggregate;
mod errors;
mod identity;
mod item;
mod summary;

pub use aggregate::Cart;
pub use errors::CartError;
pub use identity::{CartIdentity, IdentityKind};
pub use item::{CartItem, ProductInfo};
pub use summary::CartSummary;
