//! Password Credential Entity

use kernel::id::IdentityId;

use crate::domain::value_object::password_hash::PasswordHash;

/// Password credential attached to an identity.
///
/// At most one credential exists per identity, created during enrollment
/// and rewritten on password change.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PasswordCredential {
    /// Identity this credential signs in
    pub identity_id: IdentityId,
    /// Salted password hash in stored form
    pub password_hash: PasswordHash,
}

impl PasswordCredential {
    /// Create a credential for an identity
    pub fn new(identity_id: IdentityId, password_hash: PasswordHash) -> Self {
        Self {
            identity_id,
            password_hash,
        }
    }

    /// Replace the stored hash with a freshly derived one
    pub fn set_password_hash(&mut self, password_hash: PasswordHash) {
        self.password_hash = password_hash;
    }
}
