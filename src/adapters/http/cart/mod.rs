//! Cart HTTP adapter.

mod dto;
mod handlers;
mod routes;

pub use dto::{
    AddItemRequest, ApiResponse, CartItemResponse, CartResponse, CartSummaryResponse,
    ErrorResponse, TransferRequest, UpdateItemRequest, ValidatedCartResponse,
};
pub use handlers::CartHandlers;
pub use routes::cart_routes;
