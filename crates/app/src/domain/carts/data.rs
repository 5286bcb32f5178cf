//! Cart Data

use crate::domain::products::records::ProductUuid;

/// A product and quantity to merge into a cart.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NewCartItem {
    pub product_uuid: ProductUuid,
    pub quantity: u32,
}
