//! Orders
//!
//! Checkout turns a user's cart into an immutable order carrying a globally
//! unique, gap-free order number.

pub mod data;
pub mod errors;
pub mod records;
pub(crate) mod repository;
pub mod service;
pub mod stage;

pub use errors::{CheckoutError, OrdersServiceError};
pub use service::*;
