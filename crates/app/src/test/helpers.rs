//! Test Helpers

use rust_decimal::Decimal;

use crate::{
    domain::{
        coupons::{
            CouponsService, CouponsServiceError,
            data::{NewCoupon, default_discount_percentage},
            records::{CouponRecord, CouponUuid},
        },
        products::{
            ProductsService, ProductsServiceError,
            data::NewProduct,
            records::{ProductRecord, ProductUuid},
        },
        users::{
            UsersService, UsersServiceError,
            data::NewUser,
            records::{UserRecord, UserUuid},
        },
    },
    test::TestContext,
};

async fn insert_user(
    ctx: &TestContext,
    username: &str,
    is_administrator: bool,
) -> Result<UserRecord, UsersServiceError> {
    ctx.users
        .create_user(NewUser {
            uuid: UserUuid::new(),
            username: username.to_string(),
            is_administrator,
        })
        .await
}

pub(crate) async fn create_user(
    ctx: &TestContext,
    username: &str,
) -> Result<UserRecord, UsersServiceError> {
    insert_user(ctx, username, false).await
}

pub(crate) async fn create_administrator(
    ctx: &TestContext,
    username: &str,
) -> Result<UserRecord, UsersServiceError> {
    insert_user(ctx, username, true).await
}

pub(crate) async fn create_product(
    ctx: &TestContext,
    name: &str,
    price: Decimal,
) -> Result<ProductRecord, ProductsServiceError> {
    ctx.products
        .create_product(NewProduct {
            uuid: ProductUuid::new(),
            name: name.to_string(),
            price,
        })
        .await
}

/// Create a coupon with the default 10% discount.
pub(crate) async fn create_coupon(
    ctx: &TestContext,
    code: &str,
    order_n: Option<u32>,
) -> Result<CouponRecord, CouponsServiceError> {
    ctx.coupons
        .create_coupon(NewCoupon {
            uuid: CouponUuid::new(),
            code: code.to_string(),
            discount_percentage: default_discount_percentage(),
            order_n,
        })
        .await
}
