//! Cart command and query handlers.
//!
//! Every mutation of a cart runs under the owner's lease; reads and
//! validation do not.

mod add_item;
mod clear_cart;
mod get_cart;
mod lease;
mod policy;
mod remove_item;
mod shared;
mod transfer_cart;
mod update_item;
mod validate_cart;

#[cfg(test)]
mod test_support;

pub use add_item::{AddItemCommand, AddItemHandler};
pub use clear_cart::{ClearCartCommand, ClearCartHandler};
pub use get_cart::{GetCartHandler, GetCartQuery};
pub use lease::CartLease;
pub use policy::{CartPolicy, StockCheck};
pub use remove_item::{RemoveItemCommand, RemoveItemHandler};
pub use transfer_cart::{TransferCartCommand, TransferCartHandler};
pub use update_item::{UpdateItemCommand, UpdateItemHandler};
pub use validate_cart::{
    CartAdjustment, GetCartSummaryHandler, ValidateCartHandler, ValidateCartQuery,
    ValidateCartResult,
};
