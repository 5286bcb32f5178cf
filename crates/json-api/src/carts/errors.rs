//! Errors

use salvo::http::StatusError;
use tracing::error;

use unicart_app::domain::carts::CartsServiceError;

pub(crate) fn into_status_error(error: CartsServiceError) -> StatusError {
    match error {
        CartsServiceError::NotFound => StatusError::not_found().brief("Cart not found"),
        CartsServiceError::NoItems => {
            StatusError::bad_request().brief("A list of products is required")
        }
        CartsServiceError::InvalidQuantity => {
            StatusError::bad_request().brief("Each product must have a quantity between 1 and 2147483647")
        }
        CartsServiceError::ProductNotFound(product) => {
            StatusError::not_found().brief(format!("Product {product} not found"))
        }
        CartsServiceError::InvalidReference => {
            StatusError::not_found().brief("Referenced resource not found")
        }
        CartsServiceError::InvalidData => StatusError::bad_request().brief("Invalid cart payload"),
        CartsServiceError::Sql(source) => {
            error!("carts storage failure: {source}");

            StatusError::internal_server_error()
        }
    }
}
