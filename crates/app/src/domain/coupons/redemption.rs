//! Coupon redemption inside a checkout transaction.

use sqlx::{Postgres, Transaction};
use tracing::{debug, warn};

use crate::domain::coupons::{
    errors::CouponsServiceError,
    records::{CouponUuid, Redemption},
    repository::PgCouponsRepository,
};

/// Lock the unused coupon named by `code` and check it may be applied to the
/// order at `position`.
///
/// The lock is held until `tx` ends, so a concurrent checkout presenting the
/// same code waits and then finds nothing unused.
pub(crate) async fn redeem(
    repository: &PgCouponsRepository,
    tx: &mut Transaction<'_, Postgres>,
    code: &str,
    position: u32,
) -> Result<Redemption, CouponsServiceError> {
    let coupon = repository
        .lock_unused(tx, code)
        .await?
        .ok_or(CouponsServiceError::NotFound)?;

    coupon.check_position(position)?;

    debug!(coupon_uuid = %coupon.uuid, position, "coupon redeemed");

    Ok(coupon.into())
}

/// Mark a redeemed coupon as used.
///
/// Fails with [`CouponsServiceError::Conflict`] when the coupon was already
/// flagged.
pub(crate) async fn consume(
    repository: &PgCouponsRepository,
    tx: &mut Transaction<'_, Postgres>,
    coupon: CouponUuid,
) -> Result<(), CouponsServiceError> {
    match repository.mark_used(tx, coupon).await? {
        0 => {
            warn!(coupon_uuid = %coupon, "coupon was already used");

            Err(CouponsServiceError::Conflict)
        }
        _ => Ok(()),
    }
}
