//! Orders Repository

use jiff_sqlx::Timestamp as SqlxTimestamp;
use sqlx::{FromRow, Postgres, Row, Transaction, postgres::PgRow, query, query_as, query_scalar};
use uuid::Uuid;

use crate::{
    database::{encode_count, try_get_count},
    domain::{
        carts::records::CartUuid,
        coupons::records::CouponUuid,
        orders::{
            data::NewOrder,
            records::{OrderRecord, OrderUuid},
        },
        users::records::UserUuid,
    },
};

const NEXT_POSITION_SQL: &str = include_str!("sql/next_position.sql");
const LOCK_ORDER_NUMBERS_SQL: &str = include_str!("sql/lock_order_numbers.sql");
const CREATE_ORDER_SQL: &str = include_str!("sql/create_order.sql");
const LIST_ORDERS_SQL: &str = include_str!("sql/list_orders.sql");

/// Advisory lock key serialising order number assignment.
const ORDER_NUMBER_LOCK_KEY: i64 = 0x756e_6963_6172_7401;

#[derive(Debug, Clone, Default)]
pub(crate) struct PgOrdersRepository;

impl PgOrdersRepository {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self
    }

    /// Position the user's next order occupies in their own sequence.
    pub(crate) async fn next_position(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        user: UserUuid,
    ) -> Result<u32, sqlx::Error> {
        let position: i32 = query_scalar(NEXT_POSITION_SQL)
            .bind(user.into_uuid())
            .fetch_one(&mut **tx)
            .await?;

        u32::try_from(position).map_err(|e| sqlx::Error::Decode(Box::new(e)))
    }

    /// Block until no other transaction can assign order numbers. Released
    /// on commit or rollback.
    pub(crate) async fn lock_order_numbers(
        &self,
        tx: &mut Transaction<'_, Postgres>,
    ) -> Result<(), sqlx::Error> {
        query(LOCK_ORDER_NUMBERS_SQL)
            .bind(ORDER_NUMBER_LOCK_KEY)
            .execute(&mut **tx)
            .await?;

        Ok(())
    }

    /// Insert an order numbered one past the current maximum. Callers must
    /// hold the order number lock.
    pub(crate) async fn create_order(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        order: NewOrder,
    ) -> Result<OrderRecord, sqlx::Error> {
        query_as::<Postgres, OrderRecord>(CREATE_ORDER_SQL)
            .bind(order.uuid.into_uuid())
            .bind(order.user_uuid.into_uuid())
            .bind(order.cart_uuid.into_uuid())
            .bind(order.coupon_uuid.map(CouponUuid::into_uuid))
            .bind(encode_count(order.position)?)
            .bind(order.totals.total_amount)
            .bind(order.totals.total_discount_amount)
            .bind(encode_count(order.total_items_purchased)?)
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn list_orders(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        user: UserUuid,
    ) -> Result<Vec<OrderRecord>, sqlx::Error> {
        query_as::<Postgres, OrderRecord>(LIST_ORDERS_SQL)
            .bind(user.into_uuid())
            .fetch_all(&mut **tx)
            .await
    }
}

impl<'r> FromRow<'r, PgRow> for OrderRecord {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        Ok(Self {
            uuid: OrderUuid::from_uuid(row.try_get("uuid")?),
            order_number: try_get_count(row, "order_number")?,
            user_uuid: UserUuid::from_uuid(row.try_get("user_uuid")?),
            cart_uuid: CartUuid::from_uuid(row.try_get("cart_uuid")?),
            coupon_uuid: row
                .try_get::<Option<Uuid>, _>("coupon_uuid")?
                .map(CouponUuid::from_uuid),
            coupon_code: row.try_get("coupon_code")?,
            position: try_get_count(row, "position")?,
            total_amount: row.try_get("total_amount")?,
            total_discount_amount: row.try_get("total_discount_amount")?,
            total_items_purchased: try_get_count(row, "total_items_purchased")?,
            created_at: row.try_get::<SqlxTimestamp, _>("created_at")?.to_jiff(),
        })
    }
}
