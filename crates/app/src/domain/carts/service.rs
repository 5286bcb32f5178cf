//! Carts service.

use async_trait::async_trait;
use mockall::automock;
use tracing::debug;

use crate::{
    database::Db,
    domain::{
        carts::{
            data::NewCartItem,
            errors::CartsServiceError,
            records::{CartRecord, CartUuid},
            repositories::{PgCartItemsRepository, PgCartsRepository},
        },
        products::records::ProductUuid,
        users::records::UserUuid,
    },
};

#[derive(Debug, Clone)]
pub struct PgCartsService {
    db: Db,
    carts_repository: PgCartsRepository,
    items_repository: PgCartItemsRepository,
}

impl PgCartsService {
    #[must_use]
    pub fn new(db: Db) -> Self {
        Self {
            db,
            carts_repository: PgCartsRepository::new(),
            items_repository: PgCartItemsRepository::new(),
        }
    }
}

/// Reject a batch before any storage work happens.
fn validate_items(items: &[NewCartItem]) -> Result<(), CartsServiceError> {
    if items.is_empty() {
        return Err(CartsServiceError::NoItems);
    }

    if items
        .iter()
        .any(|item| item.quantity == 0 || i32::try_from(item.quantity).is_err())
    {
        return Err(CartsServiceError::InvalidQuantity);
    }

    Ok(())
}

#[async_trait]
impl CartsService for PgCartsService {
    async fn get_cart(&self, user: UserUuid) -> Result<CartRecord, CartsServiceError> {
        let mut tx = self.db.begin().await?;

        let mut cart = self.carts_repository.get_cart(&mut tx, user).await?;

        let items = self
            .items_repository
            .get_cart_items(&mut tx, cart.uuid)
            .await?;

        tx.commit().await?;

        cart.items.extend(items);

        Ok(cart)
    }

    async fn add_items(
        &self,
        user: UserUuid,
        items: Vec<NewCartItem>,
    ) -> Result<CartRecord, CartsServiceError> {
        validate_items(&items)?;

        let mut tx = self.db.begin().await?;

        let cart = self
            .carts_repository
            .upsert_cart(&mut tx, CartUuid::new(), user)
            .await?;

        let requested: Vec<ProductUuid> = items.iter().map(|item| item.product_uuid).collect();

        let existing = self
            .carts_repository
            .existing_products(&mut tx, &requested)
            .await?;

        if let Some(missing) = requested.iter().find(|uuid| !existing.contains(*uuid)) {
            // Dropping the transaction rolls back the cart upsert.
            return Err(CartsServiceError::ProductNotFound(*missing));
        }

        for item in items {
            self.items_repository
                .upsert_cart_item(&mut tx, cart.uuid, item)
                .await?;
        }

        let mut cart = self.carts_repository.refresh_total(&mut tx, cart.uuid).await?;

        let items = self
            .items_repository
            .get_cart_items(&mut tx, cart.uuid)
            .await?;

        tx.commit().await?;

        cart.items.extend(items);

        debug!(
            cart_uuid = %cart.uuid,
            user_uuid = %user,
            total_amount = %cart.total_amount,
            "cart updated"
        );

        Ok(cart)
    }
}

#[automock]
#[async_trait]
pub trait CartsService: Send + Sync {
    /// Retrieve the user's cart with its lines.
    async fn get_cart(&self, user: UserUuid) -> Result<CartRecord, CartsServiceError>;

    /// Merge products into the user's cart, creating the cart when needed.
    ///
    /// Either every line is applied or none is.
    async fn add_items(
        &self,
        user: UserUuid,
        items: Vec<NewCartItem>,
    ) -> Result<CartRecord, CartsServiceError>;
}
