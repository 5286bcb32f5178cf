//! User Data

use crate::domain::users::records::UserUuid;

/// New User Data
#[derive(Debug, Clone, PartialEq)]
pub struct NewUser {
    /// UUID to assign to the user row.
    pub uuid: UserUuid,

    /// Unique login name.
    pub username: String,

    /// Whether the user may use administrator endpoints.
    pub is_administrator: bool,
}
