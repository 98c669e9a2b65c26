//! Application layer - Commands, Queries, and Handlers.
//!
//! This layer orchestrates cart operations and coordinates between ports.

pub mod handlers;

pub use handlers::cart::{
    AddItemCommand, AddItemHandler, CartAdjustment, CartLease, CartPolicy, ClearCartCommand,
    ClearCartHandler, GetCartHandler, GetCartQuery, GetCartSummaryHandler, RemoveItemCommand,
    RemoveItemHandler, StockCheck, TransferCartCommand, TransferCartHandler, UpdateItemCommand,
    UpdateItemHandler, ValidateCartHandler, ValidateCartQuery, ValidateCartResult,
};
