//! Coupons service errors.

use sqlx::{
    Error,
    error::{DatabaseError, ErrorKind},
};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CouponsServiceError {
    /// No unused coupon with the given code exists. Never-issued and
    /// already-used codes are indistinguishable.
    #[error("invalid or used coupon code")]
    NotFound,

    #[error("coupon code already exists")]
    AlreadyExists,

    #[error("coupon code must not be blank")]
    InvalidCode,

    #[error("nth_order must be a positive integer")]
    InvalidOrderPosition,

    #[error("discount percentage must be greater than 0 and at most 100")]
    InvalidDiscount,

    #[error("coupon code is not valid for order #{position} (valid for order #{required})")]
    PositionMismatch { required: u32, position: u32 },

    /// Another checkout consumed the coupon first.
    #[error("coupon was redeemed concurrently")]
    Conflict,

    #[error("could not find an unused coupon code after {0} attempts")]
    CodeSpaceExhausted(usize),

    #[error("storage error")]
    Sql(#[source] Error),
}

impl From<Error> for CouponsServiceError {
    fn from(error: Error) -> Self {
        if matches!(error, Error::RowNotFound) {
            return Self::NotFound;
        }

        match error.as_database_error().map(DatabaseError::kind) {
            Some(ErrorKind::UniqueViolation) => Self::AlreadyExists,
            Some(ErrorKind::CheckViolation) => Self::InvalidDiscount,
            Some(ErrorKind::ForeignKeyViolation | ErrorKind::NotNullViolation | ErrorKind::Other | _) | None => {
                Self::Sql(error)
            }
        }
    }
}
