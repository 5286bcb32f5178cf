//! Order Records

use jiff::Timestamp;
use rust_decimal::Decimal;

use crate::{
    domain::{carts::records::CartUuid, coupons::records::CouponUuid, users::records::UserUuid},
    uuids::typed_uuid,
};

typed_uuid!(
    /// Order UUID
    OrderUuid
);

/// Order Record
///
/// `order_number` orders all checkouts across every user. `position` is the
/// order's place in its own user's sequence and is what position-restricted
/// coupons are checked against.
#[derive(Debug, Clone, PartialEq)]
pub struct OrderRecord {
    pub uuid: OrderUuid,
    pub order_number: u32,
    pub user_uuid: UserUuid,
    pub cart_uuid: CartUuid,
    pub coupon_uuid: Option<CouponUuid>,
    pub coupon_code: Option<String>,
    pub position: u32,
    pub total_amount: Decimal,
    pub total_discount_amount: Decimal,
    pub total_items_purchased: u32,
    pub created_at: Timestamp,
}
