//! Reports Repository

use jiff_sqlx::Timestamp as SqlxTimestamp;
use sqlx::{FromRow, Postgres, Row, Transaction, postgres::PgRow, query_as};

use crate::{
    database::try_get_count,
    domain::{
        orders::records::OrderUuid, reports::records::ReportOrder, users::records::UserUuid,
    },
};

const LIST_REPORT_ORDERS_SQL: &str = include_str!("sql/list_report_orders.sql");

#[derive(Debug, Clone, Default)]
pub(crate) struct PgReportsRepository;

impl PgReportsRepository {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self
    }

    pub(crate) async fn list_report_orders(
        &self,
        tx: &mut Transaction<'_, Postgres>,
    ) -> Result<Vec<ReportOrder>, sqlx::Error> {
        query_as::<Postgres, ReportOrder>(LIST_REPORT_ORDERS_SQL)
            .fetch_all(&mut **tx)
            .await
    }
}

impl<'r> FromRow<'r, PgRow> for ReportOrder {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        Ok(Self {
            order_uuid: OrderUuid::from_uuid(row.try_get("order_uuid")?),
            order_number: try_get_count(row, "order_number")?,
            user_uuid: UserUuid::from_uuid(row.try_get("user_uuid")?),
            username: row.try_get("username")?,
            total_items_purchased: try_get_count(row, "total_items_purchased")?,
            total_amount: row.try_get("total_amount")?,
            coupon_code: row.try_get("coupon_code")?,
            total_discount_amount: row.try_get("total_discount_amount")?,
            created_at: row.try_get::<SqlxTimestamp, _>("created_at")?.to_jiff(),
        })
    }
}
