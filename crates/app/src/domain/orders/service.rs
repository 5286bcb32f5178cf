//! Orders service.

use async_trait::async_trait;
use mockall::automock;
use tracing::{debug, error, info, warn};

use crate::{
    database::Db,
    domain::{
        carts::{
            records::CartItemRecord,
            repositories::{PgCartItemsRepository, PgCartsRepository},
        },
        coupons::{codes::normalize_code, redemption, repository::PgCouponsRepository},
        orders::{
            data::{CheckoutTotals, NewOrder},
            errors::{CheckoutError, OrdersServiceError},
            records::{OrderRecord, OrderUuid},
            repository::PgOrdersRepository,
            stage::CheckoutStage,
        },
        users::records::UserUuid,
    },
};

/// Attempts at placing an order before a conflict is surfaced to the caller.
pub const CHECKOUT_ATTEMPTS: u32 = 2;

#[derive(Debug, Clone)]
pub struct PgOrdersService {
    db: Db,
    orders_repository: PgOrdersRepository,
    carts_repository: PgCartsRepository,
    items_repository: PgCartItemsRepository,
    coupons_repository: PgCouponsRepository,
}

impl PgOrdersService {
    #[must_use]
    pub fn new(db: Db) -> Self {
        Self {
            db,
            orders_repository: PgOrdersRepository::new(),
            carts_repository: PgCartsRepository::new(),
            items_repository: PgCartItemsRepository::new(),
            coupons_repository: PgCouponsRepository::new(),
        }
    }

    /// Turn the user's cart into a committed order.
    ///
    /// The cart row and any redeemed coupon stay locked until commit, and
    /// order numbers are handed out under a transaction-scoped advisory lock.
    /// The coupon is consumed and the cart deleted in the same transaction as
    /// the order insert, so either all of it lands or none of it does.
    async fn place_order(
        &self,
        user: UserUuid,
        coupon_code: Option<&str>,
    ) -> Result<OrderRecord, CheckoutError> {
        let mut tx = self.db.begin().await?;

        let cart = self
            .carts_repository
            .lock_cart(&mut tx, user)
            .await?
            .ok_or(CheckoutError::CartNotFound)?;

        let items = self
            .items_repository
            .get_cart_items(&mut tx, cart.uuid)
            .await?;

        if items.is_empty() {
            return Err(CheckoutError::EmptyCart);
        }

        debug!(stage = %CheckoutStage::CartLoaded, cart_uuid = %cart.uuid, lines = items.len(), "checkout");

        let position = self.orders_repository.next_position(&mut tx, user).await?;

        let redemption = match coupon_code {
            Some(code) => {
                Some(redemption::redeem(&self.coupons_repository, &mut tx, code, position).await?)
            }
            None => None,
        };

        debug!(
            stage = %CheckoutStage::CouponResolved,
            position,
            coupon_uuid = ?redemption.as_ref().map(|r| r.coupon_uuid),
            "checkout"
        );

        let totals = CheckoutTotals::compute(
            cart.total_amount,
            redemption.as_ref().map(|r| r.discount_percentage),
        );

        let total_items_purchased = total_items(&items)?;

        debug!(
            stage = %CheckoutStage::TotalComputed,
            subtotal = %cart.total_amount,
            total_amount = %totals.total_amount,
            total_discount_amount = %totals.total_discount_amount,
            "checkout"
        );

        self.orders_repository.lock_order_numbers(&mut tx).await?;

        let order = self
            .orders_repository
            .create_order(
                &mut tx,
                NewOrder {
                    uuid: OrderUuid::new(),
                    user_uuid: user,
                    cart_uuid: cart.uuid,
                    coupon_uuid: redemption.map(|r| r.coupon_uuid),
                    position,
                    totals,
                    total_items_purchased,
                },
            )
            .await?;

        // Both rows are already locked above, so retiring them here keeps the
        // cart-then-coupon lock order.
        if let Some(coupon) = order.coupon_uuid {
            redemption::consume(&self.coupons_repository, &mut tx, coupon).await?;
        }

        if self.carts_repository.delete_cart(&mut tx, cart.uuid).await? == 0 {
            return Err(CheckoutError::Conflict);
        }

        debug!(stage = %CheckoutStage::CartRetired, cart_uuid = %cart.uuid, "checkout");

        if let Err(source) = tx.commit().await {
            error!(
                order_number = order.order_number,
                order_uuid = %order.uuid,
                cart_uuid = %cart.uuid,
                error = %source,
                "checkout commit failed"
            );

            return Err(source.into());
        }

        debug!(
            stage = %CheckoutStage::OrderCommitted,
            order_number = order.order_number,
            order_uuid = %order.uuid,
            "checkout"
        );

        Ok(order)
    }
}

/// Units across all lines, bounded by what `orders.total_items_purchased`
/// can hold.
fn total_items(items: &[CartItemRecord]) -> Result<u32, CheckoutError> {
    items
        .iter()
        .try_fold(0_u32, |total, item| total.checked_add(item.quantity))
        .filter(|total| i32::try_from(*total).is_ok())
        .ok_or(CheckoutError::TooManyItems)
}

#[async_trait]
impl OrdersService for PgOrdersService {
    async fn checkout(
        &self,
        user: UserUuid,
        coupon_code: Option<String>,
    ) -> Result<OrderRecord, CheckoutError> {
        let coupon_code = normalize_code(coupon_code.as_deref());

        let mut attempt = 1;

        let order = loop {
            match self.place_order(user, coupon_code.as_deref()).await {
                Err(CheckoutError::Conflict) if attempt < CHECKOUT_ATTEMPTS => {
                    warn!(user_uuid = %user, attempt, "checkout conflicted, retrying");

                    attempt += 1;
                }
                result => break result?,
            }
        };

        info!(
            order_number = order.order_number,
            order_uuid = %order.uuid,
            user_uuid = %user,
            total_amount = %order.total_amount,
            "order created"
        );

        Ok(order)
    }

    async fn list_orders(&self, user: UserUuid) -> Result<Vec<OrderRecord>, OrdersServiceError> {
        let mut tx = self.db.begin().await?;

        let orders = self.orders_repository.list_orders(&mut tx, user).await?;

        tx.commit().await?;

        Ok(orders)
    }
}

#[automock]
#[async_trait]
pub trait OrdersService: Send + Sync {
    /// Convert the user's cart into an order, applying an optional coupon.
    ///
    /// A blank coupon code is the same as none.
    async fn checkout(
        &self,
        user: UserUuid,
        coupon_code: Option<String>,
    ) -> Result<OrderRecord, CheckoutError>;

    /// The user's orders, newest first.
    async fn list_orders(&self, user: UserUuid) -> Result<Vec<OrderRecord>, OrdersServiceError>;
}
