//! Coupon Handlers

pub(crate) mod generate;
pub(crate) mod unused;
