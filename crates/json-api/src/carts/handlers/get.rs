//! Get Cart Handler

use salvo::{oapi::ToSchema, prelude::*};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use unicart_app::domain::carts::records::{CartItemRecord, CartRecord};

use crate::{carts::errors::into_status_error, extensions::*, money::format_amount};

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct CartItemResponse {
    pub uuid: Uuid,
    pub product_uuid: Uuid,
    pub product_name: String,

    /// Unit price
    pub price: String,
    pub quantity: u32,

    /// Unit price multiplied by quantity
    pub line_total: String,
}

impl From<CartItemRecord> for CartItemResponse {
    fn from(item: CartItemRecord) -> Self {
        CartItemResponse {
            uuid: item.uuid.into(),
            product_uuid: item.product_uuid.into(),
            line_total: format_amount(item.line_total()),
            product_name: item.product_name,
            price: format_amount(item.price),
            quantity: item.quantity,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct CartResponse {
    pub uuid: Uuid,
    pub user_uuid: Uuid,
    pub total_amount: String,
    pub total_items: u32,
    pub items: Vec<CartItemResponse>,
    pub created_at: String,
    pub updated_at: String,
}

impl From<CartRecord> for CartResponse {
    fn from(cart: CartRecord) -> Self {
        CartResponse {
            uuid: cart.uuid.into(),
            user_uuid: cart.user_uuid.into(),
            total_amount: format_amount(cart.total_amount),
            total_items: cart.total_items(),
            created_at: cart.created_at.to_string(),
            updated_at: cart.updated_at.to_string(),
            items: cart.items.into_iter().map(Into::into).collect(),
        }
    }
}

/// Get Cart Handler
///
/// Returns the caller's open cart.
#[endpoint(
    tags("carts"),
    summary = "Get Cart",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "Cart found"),
        (status_code = StatusCode::NOT_FOUND, description = "No open cart"),
    ),
)]
pub(crate) async fn handler(depot: &mut Depot) -> Result<Json<CartResponse>, StatusError> {
    let state = depot.state_or_500()?;
    let caller = depot.caller_or_401()?;

    let cart = state
        .app
        .carts
        .get_cart(caller.user_uuid)
        .await
        .map_err(into_status_error)?;

    Ok(Json(cart.into()))
}
