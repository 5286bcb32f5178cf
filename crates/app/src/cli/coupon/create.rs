use clap::Args;
use rust_decimal::Decimal;
use unicart_app::domain::coupons::{
    CouponsService, PgCouponsService,
    data::{NewCoupon, default_discount_percentage},
    records::CouponUuid,
};

use crate::cli::DatabaseArgs;

#[derive(Debug, Args)]
pub(crate) struct CreateCouponArgs {
    #[command(flatten)]
    database: DatabaseArgs,

    /// Coupon code customers will enter, e.g. DISCOUNT10
    #[arg(long)]
    code: String,

    /// Discount percentage; defaults to 10
    #[arg(long)]
    discount: Option<Decimal>,

    /// Restrict the coupon to this position in the customer's order history
    #[arg(long)]
    order_n: Option<u32>,
}

pub(crate) async fn run(args: CreateCouponArgs) -> Result<(), String> {
    let db = args.database.connect().await?;

    let coupon = PgCouponsService::new(db)
        .create_coupon(NewCoupon {
            uuid: CouponUuid::new(),
            code: args.code,
            discount_percentage: args.discount.unwrap_or_else(default_discount_percentage),
            order_n: args.order_n,
        })
        .await
        .map_err(|error| format!("failed to create coupon: {error}"))?;

    super::print_coupon(&coupon);

    Ok(())
}
