//! Core types for Bazaar.
//!
//! This module provides type-safe wrappers for common domain concepts.

pub mod id;
pub mod order_number;
pub mod price;
pub mod status;

pub use id::*;
pub use order_number::OrderNumber;
pub use price::Price;
pub use status::OrderStatus;
