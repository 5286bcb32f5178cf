//! Product Records

use jiff::Timestamp;
use rust_decimal::Decimal;

use crate::uuids::typed_uuid;

typed_uuid!(
    /// Product UUID
    ProductUuid
);

/// Product Record
#[derive(Debug, Clone, PartialEq)]
pub struct ProductRecord {
    pub uuid: ProductUuid,
    pub name: String,
    pub price: Decimal,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}
