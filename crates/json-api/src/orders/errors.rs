//! Checkout Errors

use salvo::http::StatusError;
use tracing::error;

use unicart_app::domain::orders::{CheckoutError, OrdersServiceError};

use crate::observability::record_checkout_conflict;

pub(crate) fn into_status_error(error: CheckoutError) -> StatusError {
    match error {
        CheckoutError::CartNotFound => StatusError::not_found().brief("Cart not found."),
        CheckoutError::EmptyCart => StatusError::bad_request().brief("Cart is empty."),
        CheckoutError::InvalidCoupon => {
            StatusError::bad_request().brief("Invalid or used coupon code.")
        }
        CheckoutError::CouponPositionMismatch { position, .. } => StatusError::bad_request()
            .brief(format!("Coupon code is not valid for order #{position}.")),
        CheckoutError::Conflict => {
            record_checkout_conflict();

            StatusError::conflict()
                .brief("Checkout conflicted with a concurrent request. Please retry.")
        }
        CheckoutError::TooManyItems => {
            StatusError::bad_request().brief("Cart has too many items.")
        }
        CheckoutError::Coupon(source) => {
            error!("coupon failure during checkout: {source}");

            StatusError::internal_server_error()
        }
        CheckoutError::Sql(source) => {
            error!("checkout storage failure: {source}");

            StatusError::internal_server_error()
        }
    }
}

pub(crate) fn orders_status_error(error: OrdersServiceError) -> StatusError {
    match error {
        OrdersServiceError::Sql(source) => {
            error!("orders storage failure: {source}");

            StatusError::internal_server_error()
        }
    }
}
