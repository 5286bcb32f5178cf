//! Auth service.

use async_trait::async_trait;
use mockall::automock;
use tracing::{debug, warn};

use crate::{
    auth::{
        errors::AuthServiceError,
        records::{ApiTokenUuid, Caller, IssuedApiToken, NewApiToken},
        repository::PgAuthRepository,
        token::{generate_api_token, hash_api_token, parse_api_token},
    },
    database::Db,
    domain::users::records::UserUuid,
};

#[derive(Debug, Clone)]
pub struct PgAuthService {
    db: Db,
    repository: PgAuthRepository,
}

impl PgAuthService {
    #[must_use]
    pub fn new(db: Db) -> Self {
        Self {
            db,
            repository: PgAuthRepository::new(),
        }
    }

    /// Issue a new API token for the given user.
    ///
    /// # Errors
    ///
    /// Returns an error if the user does not exist or insertion fails.
    pub async fn issue_api_token(&self, user: UserUuid) -> Result<IssuedApiToken, AuthServiceError> {
        let token_uuid = ApiTokenUuid::new();
        let token = generate_api_token(token_uuid);

        let mut tx = self.db.begin().await?;

        let record = self
            .repository
            .create_api_token(
                &mut tx,
                NewApiToken {
                    uuid: token_uuid,
                    user_uuid: user,
                    token_hash: hash_api_token(&token),
                },
            )
            .await?;

        tx.commit().await?;

        Ok(IssuedApiToken { token, record })
    }

    /// Revoke a token by UUID. Returns `true` if the token was active.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn revoke_api_token(&self, token: ApiTokenUuid) -> Result<bool, AuthServiceError> {
        let mut tx = self.db.begin().await?;

        let revoked = self.repository.revoke_api_token(&mut tx, token).await?;

        tx.commit().await?;

        Ok(revoked.is_some())
    }
}

#[async_trait]
impl AuthService for PgAuthService {
    async fn authenticate_bearer(&self, bearer_token: &str) -> Result<Caller, AuthServiceError> {
        let token_uuid = parse_api_token(bearer_token).map_err(|error| {
            debug!(%error, "rejected malformed api token");

            AuthServiceError::NotFound
        })?;

        let mut tx = self.db.begin().await?;

        let token = self
            .repository
            .find_caller_by_token_hash(&mut tx, &hash_api_token(bearer_token))
            .await?
            .ok_or(AuthServiceError::NotFound)?;

        if token.token_uuid != token_uuid {
            return Err(AuthServiceError::NotFound);
        }

        // Auth success does not depend on recording the last use.
        if let Err(error) = self.repository.touch_api_token(&mut tx, token_uuid).await {
            warn!(%error, token_uuid = %token_uuid, "failed to record api token use");

            return Ok(token.caller);
        }

        tx.commit().await?;

        Ok(token.caller)
    }
}

#[automock]
#[async_trait]
pub trait AuthService: Send + Sync {
    /// Resolve a raw bearer token to the user it was issued to.
    async fn authenticate_bearer(&self, bearer_token: &str) -> Result<Caller, AuthServiceError>;
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use crate::test::{TestContext, helpers};

    use super::*;

    #[tokio::test]
    async fn issued_token_authenticates_its_user() -> TestResult {
        let ctx = TestContext::new().await;
        let user = helpers::create_user(&ctx, "alice").await?;

        let issued = ctx.auth.issue_api_token(user.uuid).await?;
        let caller = ctx.auth.authenticate_bearer(&issued.token).await?;

        assert_eq!(caller.user_uuid, user.uuid);
        assert_eq!(caller.username, "alice");
        assert!(!caller.is_administrator());

        Ok(())
    }

    #[tokio::test]
    async fn administrator_flag_is_resolved() -> TestResult {
        let ctx = TestContext::new().await;
        let admin = helpers::create_administrator(&ctx, "root").await?;

        let issued = ctx.auth.issue_api_token(admin.uuid).await?;
        let caller = ctx.auth.authenticate_bearer(&issued.token).await?;

        assert!(caller.is_administrator());

        Ok(())
    }

    #[tokio::test]
    async fn unknown_and_malformed_tokens_are_rejected() -> TestResult {
        let ctx = TestContext::new().await;
        let unknown = generate_api_token(ApiTokenUuid::new());

        for token in [unknown.as_str(), "garbage", ""] {
            let result = ctx.auth.authenticate_bearer(token).await;

            assert!(
                matches!(result, Err(AuthServiceError::NotFound)),
                "expected NotFound for {token:?}, got {result:?}"
            );
        }

        Ok(())
    }

    #[tokio::test]
    async fn revoked_token_is_rejected() -> TestResult {
        let ctx = TestContext::new().await;
        let user = helpers::create_user(&ctx, "alice").await?;
        let issued = ctx.auth.issue_api_token(user.uuid).await?;

        assert!(ctx.auth.revoke_api_token(issued.record.uuid).await?);
        assert!(!ctx.auth.revoke_api_token(issued.record.uuid).await?);

        let result = ctx.auth.authenticate_bearer(&issued.token).await;

        assert!(
            matches!(result, Err(AuthServiceError::NotFound)),
            "expected NotFound, got {result:?}"
        );

        Ok(())
    }

    #[tokio::test]
    async fn issuing_for_unknown_user_fails() -> TestResult {
        let ctx = TestContext::new().await;

        let result = ctx.auth.issue_api_token(UserUuid::new()).await;

        assert!(
            matches!(result, Err(AuthServiceError::UnknownUser)),
            "expected UnknownUser, got {result:?}"
        );

        Ok(())
    }
}
