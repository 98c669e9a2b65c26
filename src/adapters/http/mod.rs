//! HTTP adapter - REST API for carts.

pub mod cart;
pub mod health;
pub mod middleware;
mod router;

pub use cart::{cart_routes, CartHandlers};
pub use router::{build_router, CORRELATION_ID_HEADER};
