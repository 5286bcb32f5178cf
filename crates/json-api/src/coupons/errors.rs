//! Coupon Errors

use salvo::http::StatusError;
use tracing::error;

use unicart_app::domain::coupons::CouponsServiceError;

pub(crate) fn into_status_error(error: CouponsServiceError) -> StatusError {
    match error {
        CouponsServiceError::NotFound => {
            StatusError::not_found().brief("Invalid or used coupon code.")
        }
        CouponsServiceError::AlreadyExists => {
            StatusError::conflict().brief("Coupon code already exists.")
        }
        CouponsServiceError::InvalidOrderPosition => {
            StatusError::bad_request().brief("nth_order must be a positive integer.")
        }
        CouponsServiceError::InvalidCode | CouponsServiceError::InvalidDiscount => {
            StatusError::bad_request().brief("Invalid coupon payload.")
        }
        CouponsServiceError::PositionMismatch { position, .. } => StatusError::bad_request()
            .brief(format!("Coupon code is not valid for order #{position}.")),
        CouponsServiceError::Conflict => StatusError::conflict(),
        CouponsServiceError::CodeSpaceExhausted(attempts) => {
            error!(attempts, "no free coupon code found");

            StatusError::service_unavailable().brief("Could not allocate a coupon code.")
        }
        CouponsServiceError::Sql(source) => {
            error!("coupons storage failure: {source}");

            StatusError::internal_server_error()
        }
    }
}
