//! Repository Traits
//!
//! Storage interfaces for identities, password credentials, and sessions.
//! The `lock_*` methods acquire a row-level write lock inside the caller's
//! transaction (`SELECT ... FOR UPDATE` on SQL backends), so concurrent
//! enrollments or password changes for the same identity serialize instead
//! of interleaving.

use kernel::id::{IdentityId, SessionId};

use crate::domain::entity::credential::PasswordCredential;
use crate::domain::entity::identity::Identity;
use crate::domain::entity::session::SessionRecord;
use crate::error::AuthResult;

/// Identity persistence interface
#[trait_variant::make(IdentityRepository: Send)]
pub trait LocalIdentityRepository {
    /// Load an identity by id, locking the row for update
    async fn lock_by_id(&self, identity_id: &IdentityId) -> AuthResult<Option<Identity>>;

    /// Load an identity by username, locking the row for update
    async fn lock_by_username(&self, username: &str) -> AuthResult<Option<Identity>>;

    /// Set the sign-in username for an identity
    async fn set_username(&self, identity_id: &IdentityId, username: &str) -> AuthResult<()>;
}

/// Password credential persistence interface
#[trait_variant::make(CredentialRepository: Send)]
pub trait LocalCredentialRepository {
    /// Insert a new credential
    async fn insert(&self, credential: &PasswordCredential) -> AuthResult<()>;

    /// Find the credential for an identity
    async fn find_by_identity(
        &self,
        identity_id: &IdentityId,
    ) -> AuthResult<Option<PasswordCredential>>;

    /// Replace the stored credential for an identity
    async fn update(&self, credential: &PasswordCredential) -> AuthResult<()>;
}

/// Session persistence interface
#[trait_variant::make(SessionRepository: Send)]
pub trait LocalSessionRepository {
    /// Create a session for an identity, returning the stored record
    async fn insert(&self, identity_id: &IdentityId) -> AuthResult<SessionRecord>;

    /// Find a session by identity and session id
    async fn find(
        &self,
        identity_id: &IdentityId,
        session_id: &SessionId,
    ) -> AuthResult<Option<SessionRecord>>;

    /// Delete a session; deleting an absent session is not an error
    async fn delete(&self, session_id: &SessionId) -> AuthResult<()>;
}
