//! Coupon Data

use rust_decimal::Decimal;

use crate::domain::coupons::records::CouponUuid;

/// Discount applied by coupons created without an explicit percentage.
pub fn default_discount_percentage() -> Decimal {
    Decimal::new(10_00, 2)
}

/// New Coupon Data
#[derive(Debug, Clone, PartialEq)]
pub struct NewCoupon {
    pub uuid: CouponUuid,
    pub code: String,
    pub discount_percentage: Decimal,

    /// Order position the coupon is restricted to; `None` for any position.
    pub order_n: Option<u32>,
}
