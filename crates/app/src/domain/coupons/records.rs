//! Coupon Records

use jiff::Timestamp;
use rust_decimal::Decimal;

use crate::{domain::coupons::errors::CouponsServiceError, uuids::typed_uuid};

typed_uuid!(
    /// Coupon UUID
    CouponUuid
);

/// Coupon Record
#[derive(Debug, Clone, PartialEq)]
pub struct CouponRecord {
    pub uuid: CouponUuid,
    pub code: String,
    pub is_used: bool,
    pub order_n: Option<u32>,
    pub discount_percentage: Decimal,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl CouponRecord {
    /// Check whether a checkout occupying `position` in its user's order
    /// sequence may redeem this coupon.
    ///
    /// A coupon without `order_n` is valid for any position.
    pub fn check_position(&self, position: u32) -> Result<(), CouponsServiceError> {
        match self.order_n {
            Some(required) if required != position => {
                Err(CouponsServiceError::PositionMismatch { required, position })
            }
            Some(_) | None => Ok(()),
        }
    }
}

/// A coupon locked for redemption by an in-flight checkout.
#[derive(Debug, Clone, PartialEq)]
pub struct Redemption {
    pub coupon_uuid: CouponUuid,
    pub code: String,
    pub discount_percentage: Decimal,
}

impl From<CouponRecord> for Redemption {
    fn from(coupon: CouponRecord) -> Self {
        Self {
            coupon_uuid: coupon.uuid,
            code: coupon.code,
            discount_percentage: coupon.discount_percentage,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn coupon(order_n: Option<u32>) -> CouponRecord {
        CouponRecord {
            uuid: CouponUuid::new(),
            code: "ABC123".to_string(),
            is_used: false,
            order_n,
            discount_percentage: Decimal::TEN,
            created_at: Timestamp::UNIX_EPOCH,
            updated_at: Timestamp::UNIX_EPOCH,
        }
    }

    #[test]
    fn unrestricted_coupon_is_valid_for_any_position() {
        let coupon = coupon(None);

        assert!(coupon.check_position(1).is_ok());
        assert!(coupon.check_position(42).is_ok());
    }

    #[test]
    fn restricted_coupon_is_valid_only_at_its_position() {
        let coupon = coupon(Some(5));

        assert!(coupon.check_position(5).is_ok());

        let result = coupon.check_position(3);

        assert!(
            matches!(
                result,
                Err(CouponsServiceError::PositionMismatch {
                    required: 5,
                    position: 3
                })
            ),
            "expected PositionMismatch, got {result:?}"
        );
    }
}
