//! Checkout Handler

use salvo::{
    oapi::{ToSchema, extract::JsonBody},
    prelude::*,
};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::{
    extensions::*,
    observability::record_order_created,
    orders::{OrderResponse, errors::into_status_error},
};

/// Checkout Request
#[derive(Debug, Default, Serialize, Deserialize, ToSchema)]
pub(crate) struct CheckoutRequest {
    /// Optional discount code; blank is the same as none
    #[serde(default)]
    pub coupon_code: Option<String>,
}

/// Checkout Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct CheckoutResponse {
    pub order: OrderResponse,
    pub message: String,
}

/// Checkout Handler
///
/// Turns the caller's cart into an order, applying the coupon if one is given.
#[endpoint(
    tags("orders"),
    summary = "Checkout",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::CREATED, description = "Order created"),
        (status_code = StatusCode::BAD_REQUEST, description = "Empty cart or unusable coupon"),
        (status_code = StatusCode::NOT_FOUND, description = "No open cart"),
        (status_code = StatusCode::CONFLICT, description = "Lost a race with a concurrent checkout"),
    ),
)]
pub(crate) async fn handler(
    json: JsonBody<CheckoutRequest>,
    depot: &mut Depot,
    res: &mut Response,
) -> Result<Json<CheckoutResponse>, StatusError> {
    let state = depot.state_or_500()?;
    let caller = depot.caller_or_401()?;

    let order = state
        .app
        .orders
        .checkout(caller.user_uuid, json.into_inner().coupon_code)
        .await
        .map_err(into_status_error)?;

    record_order_created(order.coupon_uuid.is_some());

    info!(
        order_number = order.order_number,
        user = %caller.user_uuid,
        "order created"
    );

    res.status_code(StatusCode::CREATED);

    Ok(Json(CheckoutResponse {
        message: format!("Order #{} created successfully", order.order_number),
        order: order.into(),
    }))
}

#[cfg(test)]
mod tests {
    use salvo::test::{ResponseExt, TestClient};
    use serde_json::json;
    use testresult::TestResult;

    use unicart_app::domain::orders::CheckoutError;

    use crate::{
        orders::handlers::tests::make_order,
        test_helpers::{Mocks, TEST_USER_UUID, user_service},
    };

    use super::*;

    fn make_service(mocks: Mocks) -> Service {
        user_service(mocks, Router::with_path("cart/checkout").post(handler))
    }

    fn checkout_failing_with(error: CheckoutError) -> Mocks {
        let mut mocks = Mocks::default();

        mocks
            .orders
            .expect_checkout()
            .once()
            .return_once(move |_, _| Err(error));

        mocks
    }

    #[tokio::test]
    async fn test_checkout_without_coupon_returns_201() -> TestResult {
        let order = make_order(TEST_USER_UUID, 7, None);
        let mut mocks = Mocks::default();

        mocks
            .orders
            .expect_checkout()
            .once()
            .withf(|user, code| *user == TEST_USER_UUID && code.is_none())
            .return_once(move |_, _| Ok(order));

        let mut res = TestClient::post("http://example.com/cart/checkout")
            .json(&json!({}))
            .send(&make_service(mocks))
            .await;

        let body: CheckoutResponse = res.take_json().await?;

        assert_eq!(res.status_code, Some(StatusCode::CREATED));
        assert_eq!(body.message, "Order #7 created successfully");
        assert_eq!(body.order.total_amount, "400.00");
        assert_eq!(body.order.total_discount_amount, "0.00");

        Ok(())
    }

    #[tokio::test]
    async fn test_checkout_forwards_coupon_code() -> TestResult {
        let order = make_order(TEST_USER_UUID, 1, Some("DISCOUNT10"));
        let mut mocks = Mocks::default();

        mocks
            .orders
            .expect_checkout()
            .once()
            .withf(|_, code| code.as_deref() == Some("DISCOUNT10"))
            .return_once(move |_, _| Ok(order));

        let mut res = TestClient::post("http://example.com/cart/checkout")
            .json(&json!({ "coupon_code": "DISCOUNT10" }))
            .send(&make_service(mocks))
            .await;

        let body: CheckoutResponse = res.take_json().await?;

        assert_eq!(res.status_code, Some(StatusCode::CREATED));
        assert_eq!(body.order.total_amount, "360.00");
        assert_eq!(body.order.total_discount_amount, "40.00");
        assert_eq!(body.order.coupon_code.as_deref(), Some("DISCOUNT10"));

        Ok(())
    }

    #[tokio::test]
    async fn test_checkout_with_invalid_coupon_returns_400() -> TestResult {
        let mut res = TestClient::post("http://example.com/cart/checkout")
            .json(&json!({ "coupon_code": "NOPE" }))
            .send(&make_service(checkout_failing_with(
                CheckoutError::InvalidCoupon,
            )))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::BAD_REQUEST));
        assert!(
            res.take_string()
                .await?
                .contains("Invalid or used coupon code.")
        );

        Ok(())
    }

    #[tokio::test]
    async fn test_checkout_with_coupon_for_another_position_returns_400() -> TestResult {
        let mut res = TestClient::post("http://example.com/cart/checkout")
            .json(&json!({ "coupon_code": "AB12CD" }))
            .send(&make_service(checkout_failing_with(
                CheckoutError::CouponPositionMismatch {
                    required: 5,
                    position: 3,
                },
            )))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::BAD_REQUEST));
        assert!(
            res.take_string()
                .await?
                .contains("Coupon code is not valid for order #3.")
        );

        Ok(())
    }

    #[tokio::test]
    async fn test_checkout_with_oversized_cart_returns_400() -> TestResult {
        let mut res = TestClient::post("http://example.com/cart/checkout")
            .json(&json!({}))
            .send(&make_service(checkout_failing_with(
                CheckoutError::TooManyItems,
            )))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::BAD_REQUEST));
        assert!(res.take_string().await?.contains("Cart has too many items."));

        Ok(())
    }

    #[tokio::test]
    async fn test_checkout_error_statuses() -> TestResult {
        let cases = [
            (CheckoutError::EmptyCart, StatusCode::BAD_REQUEST),
            (CheckoutError::CartNotFound, StatusCode::NOT_FOUND),
            (CheckoutError::Conflict, StatusCode::CONFLICT),
            (
                CheckoutError::Sql(sqlx::Error::PoolClosed),
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
        ];

        for (error, expected) in cases {
            let res = TestClient::post("http://example.com/cart/checkout")
                .json(&json!({}))
                .send(&make_service(checkout_failing_with(error)))
                .await;

            assert_eq!(res.status_code, Some(expected));
        }

        Ok(())
    }
}
