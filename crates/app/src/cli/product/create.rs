use clap::Args;
use rust_decimal::Decimal;
use unicart_app::domain::products::{
    PgProductsService, ProductsService,
    data::NewProduct,
    records::ProductUuid,
};

use crate::cli::DatabaseArgs;

#[derive(Debug, Args)]
pub(crate) struct CreateProductArgs {
    #[command(flatten)]
    database: DatabaseArgs,

    /// Product display name
    #[arg(long)]
    name: String,

    /// Unit price, e.g. 19.99
    #[arg(long)]
    price: Decimal,
}

pub(crate) async fn run(args: CreateProductArgs) -> Result<(), String> {
    let db = args.database.connect().await?;

    let product = PgProductsService::new(db)
        .create_product(NewProduct {
            uuid: ProductUuid::new(),
            name: args.name,
            price: args.price,
        })
        .await
        .map_err(|error| format!("failed to create product: {error}"))?;

    println!("product_uuid: {}", product.uuid);
    println!("name: {}", product.name);
    println!("price: {}", product.price);

    Ok(())
}
