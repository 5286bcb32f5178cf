//! App Router

use salvo::Router;

use crate::{auth, carts, coupons, orders, products, reports};

/// Every route that requires a bearer token.
pub(crate) fn app_router() -> Router {
    Router::new()
        .hoop(auth::middleware::handler)
        .push(
            Router::with_path("cart")
                .get(carts::get::handler)
                .push(Router::with_path("add-items").post(carts::add_items::handler))
                .push(Router::with_path("checkout").post(orders::checkout::handler))
                .push(
                    Router::with_path("generate-discount-code")
                        .post(coupons::generate::handler),
                )
                .push(Router::with_path("unused-coupons").get(coupons::unused::handler))
                .push(Router::with_path("report").get(reports::show::handler)),
        )
        .push(Router::with_path("orders").get(orders::index::handler))
        .push(
            Router::with_path("products")
                .get(products::index::handler)
                .post(products::create::handler)
                .push(Router::with_path("{product}").get(products::get::handler)),
        )
}

#[cfg(test)]
mod tests {
    use salvo::{
        affix_state::inject,
        http::header::AUTHORIZATION,
        prelude::*,
        test::{ResponseExt, TestClient},
    };
    use testresult::TestResult;
    use unicart_app::auth::{AuthServiceError, Caller};

    use crate::test_helpers::{Mocks, TEST_USER_UUID};

    use super::*;

    fn make_service(mocks: Mocks) -> Service {
        Service::new(
            Router::new()
                .hoop(inject(mocks.into_state()))
                .push(app_router()),
        )
    }

    #[tokio::test]
    async fn test_routes_require_a_token() -> TestResult {
        let mut mocks = Mocks::default();

        mocks.auth.expect_authenticate_bearer().never();

        let service = make_service(mocks);

        for path in ["/cart", "/cart/unused-coupons", "/cart/report", "/orders"] {
            let res = TestClient::get(format!("http://example.com{path}"))
                .send(&service)
                .await;

            assert_eq!(res.status_code, Some(StatusCode::UNAUTHORIZED), "{path}");
        }

        Ok(())
    }

    #[tokio::test]
    async fn test_rejected_token_never_reaches_handlers() -> TestResult {
        let mut mocks = Mocks::default();

        mocks
            .auth
            .expect_authenticate_bearer()
            .once()
            .return_once(|_| Err(AuthServiceError::NotFound));
        mocks.coupons.expect_list_unused_coupons().never();

        let res = TestClient::get("http://example.com/cart/unused-coupons")
            .add_header(AUTHORIZATION, "Bearer uc_bogus", true)
            .send(&make_service(mocks))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::UNAUTHORIZED));

        Ok(())
    }

    #[tokio::test]
    async fn test_authenticated_request_reaches_handler() -> TestResult {
        let mut mocks = Mocks::default();

        mocks
            .auth
            .expect_authenticate_bearer()
            .once()
            .return_once(|_| Ok(Caller::new(TEST_USER_UUID, "shopper", false)));
        mocks
            .coupons
            .expect_list_unused_coupons()
            .once()
            .return_once(|| Ok(vec![]));

        let mut res = TestClient::get("http://example.com/cart/unused-coupons")
            .add_header(AUTHORIZATION, "Bearer uc_valid", true)
            .send(&make_service(mocks))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::OK));
        assert_eq!(res.take_string().await?, "[]");

        Ok(())
    }

    #[tokio::test]
    async fn test_admin_route_forbids_shoppers() -> TestResult {
        let mut mocks = Mocks::default();

        mocks
            .auth
            .expect_authenticate_bearer()
            .once()
            .return_once(|_| Ok(Caller::new(TEST_USER_UUID, "shopper", false)));
        mocks
            .coupons
            .expect_generate_coupon()
            .never();

        let res = TestClient::post("http://example.com/cart/generate-discount-code")
            .add_header(AUTHORIZATION, "Bearer uc_valid", true)
            .json(&serde_json::json!({ "nth_order": 1 }))
            .send(&make_service(mocks))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::FORBIDDEN));

        Ok(())
    }
}
