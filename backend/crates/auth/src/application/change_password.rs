//! Change Password Use Case
//!
//! Rotates the password credential of an enrolled identity after checking
//! the current password.

use std::sync::Arc;

use kernel::id::IdentityId;

use crate::domain::repository::{CredentialRepository, IdentityRepository};
use crate::domain::value_object::password_hash::PasswordHash;
use crate::error::{AuthError, AuthResult};

/// Change password input
pub struct ChangePasswordInput {
    /// Identity whose credential is rotated
    pub identity_id: IdentityId,
    /// Current clear-text password, checked against the stored hash
    pub current_password: String,
    /// Replacement password, hashed under the current strength policy
    pub new_password: String,
}

/// Change password use case
pub struct ChangePasswordUseCase<I, C>
where
    I: IdentityRepository,
    C: CredentialRepository,
{
    identity_repo: Arc<I>,
    credential_repo: Arc<C>,
}

impl<I, C> ChangePasswordUseCase<I, C>
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

    /// Rotate the credential.
    ///
    /// An unknown identity, an identity without a sign-in method, a missing
    /// credential, and a wrong current password all fail with the same
    /// error; only the new password's policy violations are reported
    /// distinctly.
    pub async fn execute(&self, input: ChangePasswordInput) -> AuthResult<()> {
        let identity = self
            .identity_repo
            .lock_by_id(&input.identity_id)
            .await?
            .ok_or(AuthError::InvalidCredentials)?;

        if !identity.has_sign_in_method() {
            return Err(AuthError::InvalidCredentials);
        }

        let mut credential = self
            .credential_repo
            .find_by_identity(&input.identity_id)
            .await?
            .ok_or(AuthError::InvalidCredentials)?;

        if !credential.password_hash.verify(&input.current_password) {
            tracing::warn!(identity_id = %input.identity_id, "Password change rejected");
            return Err(AuthError::InvalidCredentials);
        }

        let new_hash = PasswordHash::from_plain(&input.new_password)?;
        credential.set_password_hash(new_hash);

        self.credential_repo.update(&credential).await?;

        tracing::info!(identity_id = %input.identity_id, "Password changed");

        Ok(())
    }
}
