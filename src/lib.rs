//! Cart Service - Shopping carts for users and guests
//!
//! Carts are keyed by owner, expire on a rolling lifetime, and are mutated
//! under a short per-owner lease so concurrent writers never lose updates.
//! Product data and stock come from downstream services at mutation time.

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
