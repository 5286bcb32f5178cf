//! Sales Report Handler

use salvo::{oapi::ToSchema, prelude::*};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use unicart_app::domain::reports::records::{ReportOrder, ReportSummary, SalesReport};

use crate::{extensions::*, money::format_amount};

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct ReportOrderResponse {
    pub order_uuid: Uuid,
    pub order_number: u32,
    pub user_uuid: Uuid,
    pub username: String,
    pub total_items_purchased: u32,
    pub total_amount: String,
    pub coupon_code: Option<String>,
    pub total_discount_amount: String,
    pub created_at: String,
}

impl From<ReportOrder> for ReportOrderResponse {
    fn from(order: ReportOrder) -> Self {
        ReportOrderResponse {
            order_uuid: order.order_uuid.into(),
            order_number: order.order_number,
            user_uuid: order.user_uuid.into(),
            username: order.username,
            total_items_purchased: order.total_items_purchased,
            total_amount: format_amount(order.total_amount),
            coupon_code: order.coupon_code,
            total_discount_amount: format_amount(order.total_discount_amount),
            created_at: order.created_at.to_string(),
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct ReportSummaryResponse {
    pub total_orders: u64,
    pub total_items_purchased: u64,
    pub total_amount: String,
    pub total_discount_amount: String,
}

impl From<ReportSummary> for ReportSummaryResponse {
    fn from(summary: ReportSummary) -> Self {
        ReportSummaryResponse {
            total_orders: summary.total_orders,
            total_items_purchased: summary.total_items_purchased,
            total_amount: format_amount(summary.total_amount),
            total_discount_amount: format_amount(summary.total_discount_amount),
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct ReportResponse {
    pub orders: Vec<ReportOrderResponse>,
    pub summary: ReportSummaryResponse,
}

impl From<SalesReport> for ReportResponse {
    fn from(report: SalesReport) -> Self {
        ReportResponse {
            orders: report.orders.into_iter().map(Into::into).collect(),
            summary: report.summary.into(),
        }
    }
}

/// Sales Report Handler
///
/// Every order with its customer and coupon, plus totals. Administrators only.
#[endpoint(
    tags("reports"),
    summary = "Sales Report",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "Sales report"),
        (status_code = StatusCode::FORBIDDEN, description = "Not an administrator"),
    ),
)]
pub(crate) async fn handler(depot: &mut Depot) -> Result<Json<ReportResponse>, StatusError> {
    let state = depot.state_or_500()?;

    depot.administrator_or_403()?;

    let report = state
        .app
        .reports
        .generate_report()
        .await
        .or_500("failed to generate sales report")?;

    Ok(Json(report.into()))
}

#[cfg(test)]
mod tests {
    use jiff::Timestamp;
    use rust_decimal::Decimal;
    use salvo::test::{ResponseExt, TestClient};
    use testresult::TestResult;

    use unicart_app::domain::{
        orders::records::OrderUuid, reports::ReportsServiceError, users::records::UserUuid,
    };

    use crate::test_helpers::{Mocks, admin_service, user_service};

    use super::*;

    fn route() -> Router {
        Router::with_path("cart/report").get(handler)
    }

    fn report_order(order_number: u32, amount: i64, discount: i64) -> ReportOrder {
        ReportOrder {
            order_uuid: OrderUuid::new(),
            order_number,
            user_uuid: UserUuid::new(),
            username: "alice".to_string(),
            total_items_purchased: 2,
            total_amount: Decimal::new(amount, 0),
            coupon_code: (discount > 0).then(|| "DISCOUNT10".to_string()),
            total_discount_amount: Decimal::new(discount, 0),
            created_at: Timestamp::UNIX_EPOCH,
        }
    }

    #[tokio::test]
    async fn test_report_includes_orders_and_summary() -> TestResult {
        let mut mocks = Mocks::default();

        mocks
            .reports
            .expect_generate_report()
            .once()
            .return_once(|| {
                Ok(SalesReport::from(vec![
                    report_order(1, 360, 40),
                    report_order(2, 100, 0),
                ]))
            });

        let body: ReportResponse = TestClient::get("http://example.com/cart/report")
            .send(&admin_service(mocks, route()))
            .await
            .take_json()
            .await?;

        assert_eq!(body.orders.len(), 2);
        assert_eq!(body.summary.total_orders, 2);
        assert_eq!(body.summary.total_items_purchased, 4);
        assert_eq!(body.summary.total_amount, "460.00");
        assert_eq!(body.summary.total_discount_amount, "40.00");

        Ok(())
    }

    #[tokio::test]
    async fn test_report_as_shopper_returns_403() -> TestResult {
        let mut mocks = Mocks::default();

        mocks.reports.expect_generate_report().never();

        let res = TestClient::get("http://example.com/cart/report")
            .send(&user_service(mocks, route()))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::FORBIDDEN));

        Ok(())
    }

    #[tokio::test]
    async fn test_report_storage_error_returns_500() -> TestResult {
        let mut mocks = Mocks::default();

        mocks
            .reports
            .expect_generate_report()
            .once()
            .return_once(|| Err(ReportsServiceError::Sql(sqlx::Error::PoolClosed)));

        let res = TestClient::get("http://example.com/cart/report")
            .send(&admin_service(mocks, route()))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::INTERNAL_SERVER_ERROR));

        Ok(())
    }
}
