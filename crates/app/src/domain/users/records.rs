//! User Records

use jiff::Timestamp;

use crate::uuids::typed_uuid;

typed_uuid!(
    /// User UUID
    UserUuid
);

/// User Record
#[derive(Debug, Clone)]
pub struct UserRecord {
    /// Unique user identifier.
    pub uuid: UserUuid,

    /// Unique login name.
    pub username: String,

    /// Administrator capability flag.
    pub is_administrator: bool,

    /// User creation timestamp.
    pub created_at: Timestamp,

    /// Last update timestamp.
    pub updated_at: Timestamp,
}
