//! Orders service errors.

use sqlx::{
    Error,
    error::{DatabaseError, ErrorKind},
};
use thiserror::Error;

use crate::domain::coupons::errors::CouponsServiceError;

/// `SQLSTATE` codes Postgres uses for transactions that lost a race.
const SERIALIZATION_FAILURE: &str = "40001";
const DEADLOCK_DETECTED: &str = "40P01";

fn is_retryable(error: &dyn DatabaseError) -> bool {
    error
        .code()
        .is_some_and(|code| code == SERIALIZATION_FAILURE || code == DEADLOCK_DETECTED)
}

#[derive(Debug, Error)]
pub enum CheckoutError {
    #[error("cart not found")]
    CartNotFound,

    #[error("cart is empty")]
    EmptyCart,

    /// The code does not name an unused coupon.
    #[error("invalid or used coupon code")]
    InvalidCoupon,

    #[error("coupon code is not valid for order #{position}")]
    CouponPositionMismatch { required: u32, position: u32 },

    /// Lost a race with a concurrent checkout, even after retrying.
    #[error("checkout conflicted with a concurrent checkout")]
    Conflict,

    /// The cart holds more units than a single order can record.
    #[error("cart has too many items")]
    TooManyItems,

    #[error("coupon error")]
    Coupon(#[source] CouponsServiceError),

    #[error("storage error")]
    Sql(#[source] Error),
}

impl From<Error> for CheckoutError {
    fn from(error: Error) -> Self {
        let Some(database_error) = error.as_database_error() else {
            return Self::Sql(error);
        };

        if is_retryable(database_error) {
            return Self::Conflict;
        }

        match database_error.kind() {
            // Order number, cart or coupon already claimed by another order.
            ErrorKind::UniqueViolation => Self::Conflict,
            ErrorKind::ForeignKeyViolation
            | ErrorKind::NotNullViolation
            | ErrorKind::CheckViolation
            | ErrorKind::Other
            | _ => Self::Sql(error),
        }
    }
}

impl From<CouponsServiceError> for CheckoutError {
    fn from(error: CouponsServiceError) -> Self {
        match error {
            CouponsServiceError::NotFound => Self::InvalidCoupon,
            CouponsServiceError::PositionMismatch { required, position } => {
                Self::CouponPositionMismatch { required, position }
            }
            CouponsServiceError::Conflict => Self::Conflict,
            CouponsServiceError::Sql(error) => Self::from(error),
            other => Self::Coupon(other),
        }
    }
}

#[derive(Debug, Error)]
pub enum OrdersServiceError {
    #[error("storage error")]
    Sql(#[from] Error),
}
