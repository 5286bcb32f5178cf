//! Unused Coupons Handler

use salvo::{oapi::ToSchema, prelude::*};
use serde::{Deserialize, Serialize};

use unicart_app::domain::coupons::records::CouponRecord;

use crate::{coupons::errors::into_status_error, extensions::*, money::format_amount};

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct CouponResponse {
    pub code: String,

    /// Percentage taken off the cart total, e.g. `"10.00"`
    pub discount_percentage: String,
    pub is_used: bool,

    /// Order position the code is restricted to, if any
    pub order_n: Option<u32>,
}

impl From<CouponRecord> for CouponResponse {
    fn from(coupon: CouponRecord) -> Self {
        CouponResponse {
            code: coupon.code,
            discount_percentage: format_amount(coupon.discount_percentage),
            is_used: coupon.is_used,
            order_n: coupon.order_n,
        }
    }
}

/// Unused Coupons Handler
#[endpoint(
    tags("coupons"),
    summary = "List Unused Coupons",
    security(("bearer_auth" = []))
)]
pub(crate) async fn handler(depot: &mut Depot) -> Result<Json<Vec<CouponResponse>>, StatusError> {
    let state = depot.state_or_500()?;

    depot.caller_or_401()?;

    let coupons = state
        .app
        .coupons
        .list_unused_coupons()
        .await
        .map_err(into_status_error)?;

    Ok(Json(coupons.into_iter().map(Into::into).collect()))
}
