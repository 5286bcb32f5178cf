use clap::Args;
use unicart_app::domain::coupons::{CouponsService, PgCouponsService};

use crate::cli::DatabaseArgs;

#[derive(Debug, Args)]
pub(crate) struct GenerateCouponArgs {
    #[command(flatten)]
    database: DatabaseArgs,

    /// Position in the customer's order history the coupon is valid for
    #[arg(long)]
    nth_order: i64,
}

pub(crate) async fn run(args: GenerateCouponArgs) -> Result<(), String> {
    let db = args.database.connect().await?;

    let coupon = PgCouponsService::new(db)
        .generate_coupon(args.nth_order)
        .await
        .map_err(|error| format!("failed to generate coupon: {error}"))?;

    super::print_coupon(&coupon);

    Ok(())
}
