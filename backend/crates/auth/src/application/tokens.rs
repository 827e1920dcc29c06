//! Token Issuance and Revocation
//!
//! Creates the session-backed token pair handed out at sign-in, verifies
//! access tokens on behalf of request handlers, and revokes refresh grants.

use std::sync::Arc;

use kernel::id::IdentityId;

use crate::application::config::AuthConfig;
use crate::domain::entity::identity::Identity;
use crate::domain::repository::SessionRepository;
use crate::error::{AuthError, AuthResult};
use crate::token::{AccessClaims, TokenCodec, TokenError, TokenPair};

/// Issues, verifies, and revokes the token pair
pub struct TokenService<S>
where
    S: SessionRepository,
{
    session_repo: Arc<S>,
    codec: TokenCodec,
}

impl<S> TokenService<S>
where
    S: SessionRepository,
{
    pub fn new(session_repo: Arc<S>, config: Arc<AuthConfig>) -> Self {
        let codec = TokenCodec::new(&config.token_secret, config.access_token_ttl_minutes);

        Self {
            session_repo,
            codec,
        }
    }

    /// Issue a fresh token pair for an identity.
    ///
    /// Creates a session record first; both tokens embed its id. The
    /// subject and session for the access token are re-read from the
    /// verified refresh claims, so the two tokens of a pair cannot
    /// disagree on their linkage.
    pub async fn issue(&self, identity: &Identity) -> AuthResult<TokenPair> {
        let session = self.session_repo.insert(&identity.id).await?;

        let refresh = self
            .codec
            .sign_refresh(&identity.id, &session.id)
            .map_err(|e| AuthError::Internal(e.to_string()))?;

        let linked = self
            .codec
            .verify_refresh(refresh.as_str())
            .map_err(|e| AuthError::Internal(e.to_string()))?;

        let access = self
            .codec
            .sign_access(&linked.sub, identity.role, &linked.sid)
            .map_err(|e| AuthError::Internal(e.to_string()))?;

        tracing::info!(
            identity_id = %identity.id,
            session_id = %session.id,
            "Issued token pair"
        );

        Ok(TokenPair { access, refresh })
    }

    /// Verify an access token and return its claims
    pub fn verify_access(&self, token: &str) -> AuthResult<AccessClaims> {
        self.codec.verify_access(token).map_err(|e| match e {
            TokenError::Expired => AuthError::AuthTokenExpired,
            _ => AuthError::InvalidAuthToken,
        })
    }

    /// Revoke the session named by a refresh token.
    ///
    /// The token must verify and belong to `identity_id`. A malformed
    /// token, a token signed with another secret, and a token belonging
    /// to a different identity all fail with the same error, and the
    /// session store is not consulted for any of them. Revoking a session
    /// that is already gone succeeds.
    pub async fn revoke(&self, identity_id: &IdentityId, refresh_token: &str) -> AuthResult<()> {
        let claims = self
            .codec
            .verify_refresh(refresh_token)
            .map_err(|_| AuthError::InvalidCredentialsToken)?;

        if claims.sub != *identity_id {
            return Err(AuthError::InvalidCredentialsToken);
        }

        self.session_repo.delete(&claims.sid).await?;

        tracing::info!(
            identity_id = %identity_id,
            session_id = %claims.sid,
            "Revoked refresh session"
        );

        Ok(())
    }
}
