//! In-Memory Repository Implementation
//!
//! Backs the repository traits with plain hash maps behind a single
//! `RwLock`. Intended for tests and single-process wiring; every call
//! serializes on the lock, which also stands in for the row-level locking
//! a database adapter provides. Data does not survive the process.

use std::collections::HashMap;

use kernel::id::{IdentityId, SessionId};
use tokio::sync::RwLock;

use crate::domain::entity::credential::PasswordCredential;
use crate::domain::entity::identity::Identity;
use crate::domain::entity::session::SessionRecord;
use crate::domain::repository::{CredentialRepository, IdentityRepository, SessionRepository};
use crate::error::{AuthError, AuthResult};

#[derive(Default)]
struct State {
    identities: HashMap<IdentityId, Identity>,
    credentials: HashMap<IdentityId, PasswordCredential>,
    sessions: HashMap<SessionId, SessionRecord>,
}

/// In-memory auth repository
#[derive(Default)]
pub struct InMemoryAuthRepository {
    state: RwLock<State>,
}

impl InMemoryAuthRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert an identity directly, bypassing enrollment
    pub async fn seed_identity(&self, identity: Identity) {
        let mut state = self.state.write().await;
        state.identities.insert(identity.id, identity);
    }

    /// Read an identity without locking semantics
    pub async fn identity(&self, identity_id: &IdentityId) -> Option<Identity> {
        let state = self.state.read().await;
        state.identities.get(identity_id).cloned()
    }

    /// Number of live sessions
    pub async fn session_count(&self) -> usize {
        let state = self.state.read().await;
        state.sessions.len()
    }
}

// ============================================================================
// Identity Repository Implementation
// ============================================================================

impl IdentityRepository for InMemoryAuthRepository {
    async fn lock_by_id(&self, identity_id: &IdentityId) -> AuthResult<Option<Identity>> {
        let state = self.state.read().await;
        Ok(state.identities.get(identity_id).cloned())
    }

    async fn lock_by_username(&self, username: &str) -> AuthResult<Option<Identity>> {
        let state = self.state.read().await;
        Ok(state
            .identities
            .values()
            .find(|identity| identity.username.as_deref() == Some(username))
            .cloned())
    }

    async fn set_username(&self, identity_id: &IdentityId, username: &str) -> AuthResult<()> {
        let mut state = self.state.write().await;
        match state.identities.get_mut(identity_id) {
            Some(identity) => {
                identity.set_username(username);
                Ok(())
            }
            None => Err(AuthError::UserNotFound),
        }
    }
}

// ============================================================================
// Credential Repository Implementation
// ============================================================================

impl CredentialRepository for InMemoryAuthRepository {
    async fn insert(&self, credential: &PasswordCredential) -> AuthResult<()> {
        let mut state = self.state.write().await;
        state
            .credentials
            .insert(credential.identity_id, credential.clone());
        Ok(())
    }

    async fn find_by_identity(
        &self,
        identity_id: &IdentityId,
    ) -> AuthResult<Option<PasswordCredential>> {
        let state = self.state.read().await;
        Ok(state.credentials.get(identity_id).cloned())
    }

    async fn update(&self, credential: &PasswordCredential) -> AuthResult<()> {
        let mut state = self.state.write().await;
        state
            .credentials
            .insert(credential.identity_id, credential.clone());
        Ok(())
    }
}

// ============================================================================
// Session Repository Implementation
// ============================================================================

impl SessionRepository for InMemoryAuthRepository {
    async fn insert(&self, identity_id: &IdentityId) -> AuthResult<SessionRecord> {
        let record = SessionRecord::new(*identity_id);

        let mut state = self.state.write().await;
        state.sessions.insert(record.id, record.clone());

        Ok(record)
    }

    async fn find(
        &self,
        identity_id: &IdentityId,
        session_id: &SessionId,
    ) -> AuthResult<Option<SessionRecord>> {
        let state = self.state.read().await;
        Ok(state
            .sessions
            .get(session_id)
            .filter(|session| session.identity_id == *identity_id)
            .cloned())
    }

    async fn delete(&self, session_id: &SessionId) -> AuthResult<()> {
        let mut state = self.state.write().await;
        state.sessions.remove(session_id);
        Ok(())
    }
}
