//! Order Data

use rust_decimal::{Decimal, RoundingStrategy};

use crate::domain::{
    carts::records::CartUuid,
    coupons::records::CouponUuid,
    orders::records::OrderUuid,
    users::records::UserUuid,
};

/// Amounts charged for a checkout.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CheckoutTotals {
    pub total_amount: Decimal,
    pub total_discount_amount: Decimal,
}

impl CheckoutTotals {
    /// Apply an optional percentage discount to a cart subtotal.
    ///
    /// The discount is rounded to cents, half away from zero, and the total
    /// is whatever remains, so the two always add back up to the subtotal.
    pub fn compute(subtotal: Decimal, discount_percentage: Option<Decimal>) -> Self {
        let total_discount_amount = discount_percentage.map_or(Decimal::ZERO, |percentage| {
            (subtotal * percentage / Decimal::ONE_HUNDRED)
                .round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
        });

        Self {
            total_amount: subtotal - total_discount_amount,
            total_discount_amount,
        }
    }
}

/// Order row written by checkout; the order number is assigned on insert.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct NewOrder {
    pub uuid: OrderUuid,
    pub user_uuid: UserUuid,
    pub cart_uuid: CartUuid,
    pub coupon_uuid: Option<CouponUuid>,
    pub position: u32,
    pub totals: CheckoutTotals,
    pub total_items_purchased: u32,
}
