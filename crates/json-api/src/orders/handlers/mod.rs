//! Order Handlers

pub(crate) mod checkout;
pub(crate) mod index;

use salvo::oapi::ToSchema;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use unicart_app::domain::orders::records::OrderRecord;

use crate::money::format_amount;

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct OrderResponse {
    pub uuid: Uuid,

    /// Global, gap-free order number
    pub order_number: u32,

    /// The order's place in the caller's own order history, starting at 1
    pub position: u32,
    pub total_amount: String,
    pub total_discount_amount: String,
    pub total_items_purchased: u32,
    pub coupon_code: Option<String>,
    pub created_at: String,
}

impl From<OrderRecord> for OrderResponse {
    fn from(order: OrderRecord) -> Self {
        OrderResponse {
            uuid: order.uuid.into(),
            order_number: order.order_number,
            position: order.position,
            total_amount: format_amount(order.total_amount),
            total_discount_amount: format_amount(order.total_discount_amount),
            total_items_purchased: order.total_items_purchased,
            coupon_code: order.coupon_code,
            created_at: order.created_at.to_string(),
        }
    }
}
