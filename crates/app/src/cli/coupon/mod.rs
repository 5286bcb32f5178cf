use clap::{Args, Subcommand};

mod create;
mod generate;

#[derive(Debug, Args)]
pub(crate) struct CouponCommand {
    #[command(subcommand)]
    command: CouponSubcommand,
}

#[derive(Debug, Subcommand)]
enum CouponSubcommand {
    Create(create::CreateCouponArgs),
    Generate(generate::GenerateCouponArgs),
}

pub(crate) async fn run(command: CouponCommand) -> Result<(), String> {
    match command.command {
        CouponSubcommand::Create(args) => create::run(args).await,
        CouponSubcommand::Generate(args) => generate::run(args).await,
    }
}

fn print_coupon(coupon: &unicart_app::domain::coupons::records::CouponRecord) {
    println!("coupon_uuid: {}", coupon.uuid);
    println!("code: {}", coupon.code);
    println!("discount_percentage: {}", coupon.discount_percentage);
    println!(
        "order_n: {}",
        coupon
            .order_n
            .map_or_else(|| "any".to_string(), |value| value.to_string())
    );
}
