//! Password Hash Value Object

use platform::password::{self, PasswordHashError};

/// Stored form of a password credential.
///
/// Holds the salted scrypt hash in its serialized `salt:digest` encoding.
/// Hashing a new password enforces the strength policy; loading a stored
/// hash does not, so credentials written under older policies keep
/// verifying.
#[derive(Clone, PartialEq, Eq)]
pub struct PasswordHash(String);

impl PasswordHash {
    /// Hash a clear-text password under the current strength policy.
    pub fn from_plain(secret: &str) -> Result<Self, PasswordHashError> {
        password::hash_password(secret).map(Self)
    }

    /// Wrap an already-stored hash string without revalidating it.
    pub fn from_stored(stored: impl Into<String>) -> Self {
        Self(stored.into())
    }

    /// Check a clear-text password against this hash.
    pub fn verify(&self, secret: &str) -> bool {
        password::verify_password(secret, &self.0)
    }

    /// Get the stored string form
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Debug for PasswordHash {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "PasswordHash([REDACTED])")
    }
}
