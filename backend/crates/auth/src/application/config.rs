//! Auth Configuration

/// Configuration for token issuance.
///
/// Constructed by the embedding application and passed into use cases
/// explicitly; nothing in this crate reads the environment. The signing
/// secret is shared by every codec in the process, so rotating it
/// invalidates all outstanding tokens at once.
#[derive(Clone)]
pub struct AuthConfig {
    /// Symmetric secret for signing and verifying both token kinds
    pub token_secret: String,
    /// Access token lifetime in minutes
    pub access_token_ttl_minutes: i64,
}

impl AuthConfig {
    /// Create a new auth configuration
    pub fn new(token_secret: impl Into<String>, access_token_ttl_minutes: i64) -> Self {
        Self {
            token_secret: token_secret.into(),
            access_token_ttl_minutes,
        }
    }
}

impl std::fmt::Debug for AuthConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuthConfig")
            .field("token_secret", &"[REDACTED]")
            .field("access_token_ttl_minutes", &self.access_token_ttl_minutes)
            .finish()
    }
}
