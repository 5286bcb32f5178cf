//! Auth records.

use jiff::Timestamp;

use crate::{domain::users::records::UserUuid, uuids::typed_uuid};

typed_uuid!(
    /// API Token UUID
    ApiTokenUuid
);

/// The authenticated user behind a request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Caller {
    pub user_uuid: UserUuid,
    pub username: String,
    is_administrator: bool,
}

impl Caller {
    #[must_use]
    pub fn new(user_uuid: UserUuid, username: impl Into<String>, is_administrator: bool) -> Self {
        Self {
            user_uuid,
            username: username.into(),
            is_administrator,
        }
    }

    /// Whether the caller may use administrator-only operations.
    #[must_use]
    pub fn is_administrator(&self) -> bool {
        self.is_administrator
    }
}

/// API token metadata persisted in storage.
#[derive(Debug, Clone)]
pub struct ApiTokenRecord {
    pub uuid: ApiTokenUuid,
    pub user_uuid: UserUuid,
    pub created_at: Timestamp,
    pub last_used_at: Option<Timestamp>,
    pub revoked_at: Option<Timestamp>,
}

/// New API token persistence payload.
#[derive(Debug, Clone)]
pub(crate) struct NewApiToken {
    pub uuid: ApiTokenUuid,
    pub user_uuid: UserUuid,
    pub token_hash: String,
}

/// API token issuance result with one-time raw token.
#[derive(Debug, Clone)]
pub struct IssuedApiToken {
    pub token: String,
    pub record: ApiTokenRecord,
}
