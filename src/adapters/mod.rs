//! Adapters - Implementations of port interfaces.
//!
//! - `cart_store`: Redis and in-memory cart persistence
//! - `catalog`, `inventory`: HTTP clients and in-memory doubles for
//!   downstream services
//! - `auth`: bearer token validation
//! - `http`: the axum REST surface

pub mod auth;
pub mod cart_store;
pub mod catalog;
pub mod http;
pub mod inventory;
