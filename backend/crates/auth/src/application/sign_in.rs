//! Sign In Use Case
//!
//! Authenticates a username and password and issues a session-backed
//! token pair.

use std::sync::Arc;

use crate::application::config::AuthConfig;
use crate::application::tokens::TokenService;
use crate::domain::entity::identity::Identity;
use crate::domain::repository::{CredentialRepository, IdentityRepository, SessionRepository};
use crate::error::{AuthError, AuthResult};
use crate::token::TokenPair;

/// Sign in input
pub struct SignInInput {
    /// Sign-in username
    pub username: String,
    /// Clear-text password
    pub password: String,
}

/// Sign in output
pub struct SignInOutput {
    /// Freshly issued token pair
    pub tokens: TokenPair,
    /// The authenticated identity
    pub identity: Identity,
}

/// Sign in use case
pub struct SignInUseCase<I, C, S>
where
    I: IdentityRepository,
    C: CredentialRepository,
    S: SessionRepository,
{
    identity_repo: Arc<I>,
    credential_repo: Arc<C>,
    token_service: TokenService<S>,
}

impl<I, C, S> SignInUseCase<I, C, S>
where
    I: IdentityRepository,
    C: CredentialRepository,
    S: SessionRepository,
{
    pub fn new(
        identity_repo: Arc<I>,
        credential_repo: Arc<C>,
        session_repo: Arc<S>,
        config: Arc<AuthConfig>,
    ) -> Self {
        Self {
            identity_repo,
            credential_repo,
            token_service: TokenService::new(session_repo, config),
        }
    }

    /// Authenticate and issue tokens.
    ///
    /// An unknown username, a missing credential, and a wrong password all
    /// fail with the same error.
    pub async fn execute(&self, input: SignInInput) -> AuthResult<SignInOutput> {
        match self.try_sign_in(&input).await {
            Ok(output) => {
                tracing::info!(identity_id = %output.identity.id, "User signed in");
                Ok(output)
            }
            Err(AuthError::InvalidCredentials) => {
                // One generic line for every rejection; the log must not
                // reveal whether the username exists
                tracing::warn!("Invalid sign-in attempt");
                Err(AuthError::InvalidCredentials)
            }
            Err(e) => Err(e),
        }
    }

    async fn try_sign_in(&self, input: &SignInInput) -> AuthResult<SignInOutput> {
        let identity = self
            .identity_repo
            .lock_by_username(&input.username)
            .await?
            .ok_or(AuthError::InvalidCredentials)?;

        let credential = self
            .credential_repo
            .find_by_identity(&identity.id)
            .await?
            .ok_or(AuthError::InvalidCredentials)?;

        if !credential.password_hash.verify(&input.password) {
            return Err(AuthError::InvalidCredentials);
        }

        let tokens = self.token_service.issue(&identity).await?;

        Ok(SignInOutput { tokens, identity })
    }
}
