//! Report Records

use jiff::Timestamp;
use rust_decimal::Decimal;

use crate::domain::{orders::records::OrderUuid, users::records::UserUuid};

/// One order as it appears in the sales report.
#[derive(Debug, Clone, PartialEq)]
pub struct ReportOrder {
    pub order_uuid: OrderUuid,
    pub order_number: u32,
    pub user_uuid: UserUuid,
    pub username: String,
    pub total_items_purchased: u32,
    pub total_amount: Decimal,
    pub coupon_code: Option<String>,
    pub total_discount_amount: Decimal,
    pub created_at: Timestamp,
}

/// Totals across every order in the report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ReportSummary {
    pub total_orders: u64,
    pub total_items_purchased: u64,
    pub total_amount: Decimal,
    pub total_discount_amount: Decimal,
}

impl ReportSummary {
    pub fn from_orders(orders: &[ReportOrder]) -> Self {
        orders.iter().fold(Self::default(), |summary, order| Self {
            total_orders: summary.total_orders + 1,
            total_items_purchased: summary.total_items_purchased
                + u64::from(order.total_items_purchased),
            total_amount: summary.total_amount + order.total_amount,
            total_discount_amount: summary.total_discount_amount + order.total_discount_amount,
        })
    }
}

/// Sales Report
#[derive(Debug, Clone, PartialEq)]
pub struct SalesReport {
    pub orders: Vec<ReportOrder>,
    pub summary: ReportSummary,
}

impl From<Vec<ReportOrder>> for SalesReport {
    fn from(orders: Vec<ReportOrder>) -> Self {
        let summary = ReportSummary::from_orders(&orders);

        Self { orders, summary }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn order(order_number: u32, items: u32, amount: i64, discount: i64) -> ReportOrder {
        ReportOrder {
            order_uuid: OrderUuid::new(),
            order_number,
            user_uuid: UserUuid::new(),
            username: "alice".to_string(),
            total_items_purchased: items,
            total_amount: Decimal::new(amount, 2),
            coupon_code: None,
            total_discount_amount: Decimal::new(discount, 2),
            created_at: Timestamp::UNIX_EPOCH,
        }
    }

    #[test]
    fn empty_report_has_zero_summary() {
        let report = SalesReport::from(Vec::new());

        assert!(report.orders.is_empty());
        assert_eq!(report.summary, ReportSummary::default());
    }

    #[test]
    fn summary_adds_up_every_order() {
        let report = SalesReport::from(vec![
            order(1, 3, 400_00, 0),
            order(2, 1, 9_00, 1_00),
            order(3, 2, 360_00, 40_00),
        ]);

        assert_eq!(
            report.summary,
            ReportSummary {
                total_orders: 3,
                total_items_purchased: 6,
                total_amount: Decimal::new(769_00, 2),
                total_discount_amount: Decimal::new(41_00, 2),
            }
        );
    }
}
