//! Enrollment Use Case
//!
//! Attaches a username and password credential to an identity that was
//! provisioned without a sign-in method. Enrollment is one-way: once an
//! identity has a username it can change its password but never re-enroll.

use std::sync::Arc;

use kernel::id::IdentityId;

use crate::domain::entity::credential::PasswordCredential;
use crate::domain::repository::{CredentialRepository, IdentityRepository};
use crate::domain::value_object::password_hash::PasswordHash;
use crate::error::{AuthError, AuthResult};

/// Enrollment input
pub struct EnrollInput {
    /// Identity to enroll
    pub identity_id: IdentityId,
    /// Sign-in username to attach; non-empty, validated at the boundary
    pub username: String,
    /// Clear-text password, hashed under the current strength policy
    pub password: String,
}

/// Enrollment use case
pub struct EnrollUseCase<I, C>
where
    I: IdentityRepository,
    C: CredentialRepository,
{
    identity_repo: Arc<I>,
    credential_repo: Arc<C>,
}

impl<I, C> EnrollUseCase<I, C>
where
    I: IdentityRepository,
    C: CredentialRepository,
{
    pub fn new(identity_repo: Arc<I>, credential_repo: Arc<C>) -> Self {
        Self {
            identity_repo,
            credential_repo,
        }
    }

    pub async fn execute(&self, input: EnrollInput) -> AuthResult<()> {
        let identity = self
            .identity_repo
            .lock_by_id(&input.identity_id)
            .await?
            .ok_or(AuthError::UserNotFound)?;

        if identity.has_sign_in_method() {
            return Err(AuthError::UserAlreadyHasSignInMethod);
        }

        // Policy violations surface before anything is written
        let password_hash = PasswordHash::from_plain(&input.password)?;

        let credential = PasswordCredential::new(input.identity_id, password_hash);
        self.credential_repo.insert(&credential).await?;

        self.identity_repo
            .set_username(&input.identity_id, &input.username)
            .await?;

        tracing::info!(
            identity_id = %input.identity_id,
            username = %input.username,
            "Sign-in method enrolled"
        );

        Ok(())
    }
}
