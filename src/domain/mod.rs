//! Domain layer containing business logic and domain types.
//!
//! # Module Organization
//!
//! - `foundation` - Shared domain primitives (identifiers, timestamps, errors, auth)
//! - `cart` - The cart aggregate, its line items, and cart errors

pub mod cart;
pub mod foundation;
