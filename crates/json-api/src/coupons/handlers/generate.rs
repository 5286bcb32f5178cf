//! Generate Discount Code Handler

use salvo::{
    oapi::{ToSchema, extract::JsonBody},
    prelude::*,
};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::{coupons::errors::into_status_error, extensions::*};

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct GenerateCouponRequest {
    /// The order position (in each customer's own history) the code is valid for
    pub nth_order: i64,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct GenerateCouponResponse {
    pub coupon_code: String,
}

/// Generate Discount Code Handler
///
/// Administrators only.
#[endpoint(
    tags("coupons"),
    summary = "Generate Discount Code",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::CREATED, description = "Coupon issued"),
        (status_code = StatusCode::BAD_REQUEST, description = "Invalid nth_order"),
        (status_code = StatusCode::FORBIDDEN, description = "Not an administrator"),
    ),
)]
pub(crate) async fn handler(
    json: JsonBody<GenerateCouponRequest>,
    depot: &mut Depot,
    res: &mut Response,
) -> Result<Json<GenerateCouponResponse>, StatusError> {
    let state = depot.state_or_500()?;
    let admin = depot.administrator_or_403()?;

    let coupon = state
        .app
        .coupons
        .generate_coupon(json.into_inner().nth_order)
        .await
        .map_err(into_status_error)?;

    info!(admin = %admin.user_uuid, order_n = ?coupon.order_n, "coupon generated");

    res.status_code(StatusCode::CREATED);

    Ok(Json(GenerateCouponResponse {
        coupon_code: coupon.code,
    }))
}
