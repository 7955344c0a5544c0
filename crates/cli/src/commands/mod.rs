//! Command implementations.
//!
//! Each command loads what it needs through [`bazaar_client::state::AppState`]
//! and prints a plain-text report. Printing is the whole point here, so the
//! stdout lint is allowed for the module tree.

#![allow(clippy::print_stdout)]

pub mod cart;
pub mod favorites;
pub mod orders;
pub mod products;

/// Errors shared by the command implementations.
#[derive(Debug, thiserror::Error)]
pub enum CommandError {
    #[error("product {0} not found")]
    ProductNotFound(String),

    #[error("order {0} not found")]
    OrderNotFound(String),

    #[error("quantity must be at least 1, got {0}")]
    InvalidQuantity(i64),
}
