//! Add Cart Items Handler

use salvo::{
    oapi::{ToSchema, extract::JsonBody},
    prelude::*,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use unicart_app::domain::carts::data::NewCartItem;

use crate::{
    carts::{errors::into_status_error, get::CartResponse},
    extensions::*,
};

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct AddItemRequest {
    pub product_id: Uuid,
    pub quantity: u32,
}

impl From<AddItemRequest> for NewCartItem {
    fn from(item: AddItemRequest) -> Self {
        NewCartItem {
            product_uuid: item.product_id.into(),
            quantity: item.quantity,
        }
    }
}

/// Add Items Request
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct AddItemsRequest {
    pub products: Vec<AddItemRequest>,
}

/// Add Cart Items Handler
///
/// Merges products into the caller's cart, creating it on first use.
/// Quantities for a product already in the cart are added together.
#[endpoint(
    tags("carts"),
    summary = "Add Items to Cart",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "Updated cart"),
        (status_code = StatusCode::BAD_REQUEST, description = "Invalid items"),
        (status_code = StatusCode::NOT_FOUND, description = "Unknown product"),
    ),
)]
pub(crate) async fn handler(
    json: JsonBody<AddItemsRequest>,
    depot: &mut Depot,
) -> Result<Json<CartResponse>, StatusError> {
    let state = depot.state_or_500()?;
    let caller = depot.caller_or_401()?;

    let items = json
        .into_inner()
        .products
        .into_iter()
        .map(Into::into)
        .collect();

    let cart = state
        .app
        .carts
        .add_items(caller.user_uuid, items)
        .await
        .map_err(into_status_error)?;

    Ok(Json(cart.into()))
}
