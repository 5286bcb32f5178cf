//! Coupons service.

use async_trait::async_trait;
use mockall::automock;
use rust_decimal::Decimal;
use tracing::{debug, info};

use crate::{
    database::Db,
    domain::coupons::{
        codes::generate_code,
        data::{NewCoupon, default_discount_percentage},
        errors::CouponsServiceError,
        records::{CouponRecord, CouponUuid},
        repository::PgCouponsRepository,
    },
};

/// Attempts at drawing an unused code before giving up.
pub const MAX_CODE_ATTEMPTS: usize = 64;

#[derive(Debug, Clone)]
pub struct PgCouponsService {
    db: Db,
    repository: PgCouponsRepository,
}

impl PgCouponsService {
    #[must_use]
    pub fn new(db: Db) -> Self {
        Self {
            db,
            repository: PgCouponsRepository::new(),
        }
    }

    /// Insert a coupon unless its code is already taken. `Ok(None)` means
    /// the code collided and the caller should draw another.
    async fn try_insert(
        &self,
        coupon: NewCoupon,
    ) -> Result<Option<CouponRecord>, CouponsServiceError> {
        let mut tx = self.db.begin().await?;

        if self.repository.code_exists(&mut tx, &coupon.code).await? {
            return Ok(None);
        }

        let record = match self.repository.create_coupon(&mut tx, coupon).await {
            Ok(record) => record,
            Err(error) => match CouponsServiceError::from(error) {
                // Lost a race with another writer using the same code.
                CouponsServiceError::AlreadyExists => return Ok(None),
                other => return Err(other),
            },
        };

        tx.commit().await?;

        Ok(Some(record))
    }
}

fn fresh_code() -> String {
    generate_code(&mut rand::thread_rng())
}

fn validate_order_position(nth_order: i64) -> Result<u32, CouponsServiceError> {
    u32::try_from(nth_order)
        .ok()
        .filter(|&n| n > 0 && i32::try_from(n).is_ok())
        .ok_or(CouponsServiceError::InvalidOrderPosition)
}

fn validate_new_coupon(coupon: &NewCoupon) -> Result<(), CouponsServiceError> {
    if coupon.code.trim().is_empty() {
        return Err(CouponsServiceError::InvalidCode);
    }

    if coupon.order_n == Some(0) {
        return Err(CouponsServiceError::InvalidOrderPosition);
    }

    if coupon.discount_percentage <= Decimal::ZERO
        || coupon.discount_percentage > Decimal::ONE_HUNDRED
    {
        return Err(CouponsServiceError::InvalidDiscount);
    }

    Ok(())
}

#[async_trait]
impl CouponsService for PgCouponsService {
    async fn generate_coupon(&self, nth_order: i64) -> Result<CouponRecord, CouponsServiceError> {
        let order_n = validate_order_position(nth_order)?;

        for attempt in 1..=MAX_CODE_ATTEMPTS {
            let coupon = NewCoupon {
                uuid: CouponUuid::new(),
                code: fresh_code(),
                discount_percentage: default_discount_percentage(),
                order_n: Some(order_n),
            };

            if let Some(record) = self.try_insert(coupon).await? {
                info!(
                    coupon_uuid = %record.uuid,
                    order_n,
                    attempt,
                    "coupon generated"
                );

                return Ok(record);
            }

            debug!(attempt, "coupon code collision, drawing another");
        }

        Err(CouponsServiceError::CodeSpaceExhausted(MAX_CODE_ATTEMPTS))
    }

    async fn create_coupon(&self, coupon: NewCoupon) -> Result<CouponRecord, CouponsServiceError> {
        validate_new_coupon(&coupon)?;

        let coupon = NewCoupon {
            code: coupon.code.trim().to_string(),
            ..coupon
        };

        let mut tx = self.db.begin().await?;

        let record = self.repository.create_coupon(&mut tx, coupon).await?;

        tx.commit().await?;

        info!(coupon_uuid = %record.uuid, "coupon created");

        Ok(record)
    }

    async fn get_coupon(&self, code: &str) -> Result<CouponRecord, CouponsServiceError> {
        let mut tx = self.db.begin().await?;

        let record = self.repository.get_coupon_by_code(&mut tx, code).await?;

        tx.commit().await?;

        Ok(record)
    }

    async fn list_unused_coupons(&self) -> Result<Vec<CouponRecord>, CouponsServiceError> {
        let mut tx = self.db.begin().await?;

        let coupons = self.repository.list_unused(&mut tx).await?;

        tx.commit().await?;

        Ok(coupons)
    }
}

#[automock]
#[async_trait]
pub trait CouponsService: Send + Sync {
    /// Issue a coupon with a fresh random code, restricted to the given
    /// position in the redeeming user's order sequence.
    async fn generate_coupon(&self, nth_order: i64) -> Result<CouponRecord, CouponsServiceError>;

    /// Insert a coupon with a caller-chosen code.
    async fn create_coupon(&self, coupon: NewCoupon) -> Result<CouponRecord, CouponsServiceError>;

    /// Look up a coupon by code, used or not.
    async fn get_coupon(&self, code: &str) -> Result<CouponRecord, CouponsServiceError>;

    /// All coupons not yet consumed by a checkout, oldest first.
    async fn list_unused_coupons(&self) -> Result<Vec<CouponRecord>, CouponsServiceError>;
}
