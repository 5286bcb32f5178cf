//! Coupons
//!
//! Single-use discount coupons, optionally bound to one position in the
//! redeeming user's order sequence.

pub mod codes;
pub mod data;
pub mod errors;
pub mod records;
pub(crate) mod redemption;
pub(crate) mod repository;
pub mod service;

pub use errors::CouponsServiceError;
pub use service::*;
