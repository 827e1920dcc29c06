//! Unit tests for the auth crate
//!
//! Scenario coverage across enrollment, sign-in, the token lifecycle, and
//! the authorization gates, all running against the in-memory repository.

#[cfg(test)]
mod enrollment_tests {
    use std::sync::Arc;

    use kernel::id::IdentityId;

    use crate::application::enroll::{EnrollInput, EnrollUseCase};
    use crate::domain::entity::identity::Identity;
    use crate::domain::value_object::role::Role;
    use crate::error::{AuthError, AuthResult};
    use crate::infra::memory::InMemoryAuthRepository;

    async fn enroll(
        repo: &Arc<InMemoryAuthRepository>,
        identity_id: IdentityId,
        username: &str,
        password: &str,
    ) -> AuthResult<()> {
        EnrollUseCase::new(repo.clone(), repo.clone())
            .execute(EnrollInput {
                identity_id,
                username: username.to_string(),
                password: password.to_string(),
            })
            .await
    }

    #[tokio::test]
    async fn test_enroll_attaches_username_and_credential() {
        let repo = Arc::new(InMemoryAuthRepository::new());
        let identity = Identity::new(Role::Viewer);
        let identity_id = identity.id;
        repo.seed_identity(identity).await;

        enroll(&repo, identity_id, "alice", "sturdy-password")
            .await
            .unwrap();

        let stored = repo.identity(&identity_id).await.unwrap();
        assert_eq!(stored.username.as_deref(), Some("alice"));
        assert!(stored.has_sign_in_method());
    }

    #[tokio::test]
    async fn test_enroll_twice_conflicts() {
        let repo = Arc::new(InMemoryAuthRepository::new());
        let identity = Identity::new(Role::Viewer);
        let identity_id = identity.id;
        repo.seed_identity(identity).await;

        enroll(&repo, identity_id, "alice", "sturdy-password")
            .await
            .unwrap();

        let result = enroll(&repo, identity_id, "alice2", "another-password").await;
        assert!(matches!(result, Err(AuthError::UserAlreadyHasSignInMethod)));

        // The original username survives the rejected attempt
        let stored = repo.identity(&identity_id).await.unwrap();
        assert_eq!(stored.username.as_deref(), Some("alice"));
    }

    #[tokio::test]
    async fn test_enroll_unknown_identity() {
        let repo = Arc::new(InMemoryAuthRepository::new());

        let result = enroll(&repo, IdentityId::new(), "ghost", "sturdy-password").await;
        assert!(matches!(result, Err(AuthError::UserNotFound)));
    }

    #[tokio::test]
    async fn test_enroll_rejects_weak_password() {
        let repo = Arc::new(InMemoryAuthRepository::new());
        let identity = Identity::new(Role::Viewer);
        let identity_id = identity.id;
        repo.seed_identity(identity).await;

        let result = enroll(&repo, identity_id, "alice", "seven77").await;
        assert!(matches!(result, Err(AuthError::PasswordTooWeak)));

        // Nothing was written
        let stored = repo.identity(&identity_id).await.unwrap();
        assert!(!stored.has_sign_in_method());
    }

    #[tokio::test]
    async fn test_enroll_rejects_oversized_password() {
        let repo = Arc::new(InMemoryAuthRepository::new());
        let identity = Identity::new(Role::Viewer);
        let identity_id = identity.id;
        repo.seed_identity(identity).await;

        let result = enroll(&repo, identity_id, "alice", &"x".repeat(256)).await;
        assert!(matches!(result, Err(AuthError::PasswordTooLong)));
    }
}

#[cfg(test)]
mod sign_in_tests {
    use std::sync::Arc;

    use crate::application::config::AuthConfig;
    use crate::application::enroll::{EnrollInput, EnrollUseCase};
    use crate::application::sign_in::{SignInInput, SignInOutput, SignInUseCase};
    use crate::domain::entity::identity::Identity;
    use crate::domain::value_object::role::Role;
    use crate::error::{AuthError, AuthResult};
    use crate::infra::memory::InMemoryAuthRepository;

    fn config() -> Arc<AuthConfig> {
        Arc::new(AuthConfig::new("sign-in-test-secret", 15))
    }

    async fn seed_enrolled(
        repo: &Arc<InMemoryAuthRepository>,
        username: &str,
        password: &str,
    ) -> Identity {
        let identity = Identity::new(Role::Viewer);
        let identity_id = identity.id;
        repo.seed_identity(identity).await;

        EnrollUseCase::new(repo.clone(), repo.clone())
            .execute(EnrollInput {
                identity_id,
                username: username.to_string(),
                password: password.to_string(),
            })
            .await
            .unwrap();

        repo.identity(&identity_id).await.unwrap()
    }

    async fn sign_in(
        repo: &Arc<InMemoryAuthRepository>,
        username: &str,
        password: &str,
    ) -> AuthResult<SignInOutput> {
        SignInUseCase::new(repo.clone(), repo.clone(), repo.clone(), config())
            .execute(SignInInput {
                username: username.to_string(),
                password: password.to_string(),
            })
            .await
    }

    #[tokio::test]
    async fn test_sign_in_returns_tokens_and_identity() {
        let repo = Arc::new(InMemoryAuthRepository::new());
        let identity = seed_enrolled(&repo, "alice", "sturdy-password").await;

        let output = sign_in(&repo, "alice", "sturdy-password").await.unwrap();

        assert_eq!(output.identity.id, identity.id);
        assert_eq!(output.identity.username.as_deref(), Some("alice"));
        assert!(!output.tokens.access.as_str().is_empty());
        assert!(!output.tokens.refresh.as_str().is_empty());
        assert_eq!(repo.session_count().await, 1);
    }

    #[tokio::test]
    async fn test_unknown_username_rejected() {
        let repo = Arc::new(InMemoryAuthRepository::new());
        seed_enrolled(&repo, "alice", "sturdy-password").await;

        let result = sign_in(&repo, "mallory", "sturdy-password").await;
        assert!(matches!(result, Err(AuthError::InvalidCredentials)));
    }

    #[tokio::test]
    async fn test_wrong_password_rejected() {
        let repo = Arc::new(InMemoryAuthRepository::new());
        seed_enrolled(&repo, "alice", "sturdy-password").await;

        let result = sign_in(&repo, "alice", "sturdy-guessword").await;
        assert!(matches!(result, Err(AuthError::InvalidCredentials)));

        // No session gets created for a failed attempt
        assert_eq!(repo.session_count().await, 0);
    }

    #[tokio::test]
    async fn test_missing_credential_rejected_like_wrong_password() {
        let repo = Arc::new(InMemoryAuthRepository::new());

        // Construct an identity with a username but no credential row,
        // which a storage adapter should never produce
        let mut identity = Identity::new(Role::Viewer);
        identity.set_username("alice");
        repo.seed_identity(identity).await;

        let result = sign_in(&repo, "alice", "sturdy-password").await;
        assert!(matches!(result, Err(AuthError::InvalidCredentials)));
    }
}

#[cfg(test)]
mod token_service_tests {
    use std::sync::Arc;

    use kernel::id::{IdentityId, SessionId};

    use crate::application::config::AuthConfig;
    use crate::application::tokens::TokenService;
    use crate::domain::entity::identity::Identity;
    use crate::domain::entity::session::SessionRecord;
    use crate::domain::repository::SessionRepository;
    use crate::domain::value_object::role::Role;
    use crate::error::{AuthError, AuthResult};
    use crate::infra::memory::InMemoryAuthRepository;
    use crate::token::TokenCodec;

    const SECRET: &str = "token-service-test-secret";

    /// Session store that fails the test if its deleter runs.
    struct PanickingSessions;

    impl SessionRepository for PanickingSessions {
        async fn insert(&self, _identity_id: &IdentityId) -> AuthResult<SessionRecord> {
            panic!("insert must not run");
        }

        async fn find(
            &self,
            _identity_id: &IdentityId,
            _session_id: &SessionId,
        ) -> AuthResult<Option<SessionRecord>> {
            panic!("find must not run");
        }

        async fn delete(&self, _session_id: &SessionId) -> AuthResult<()> {
            panic!("delete must not run");
        }
    }

    fn service(repo: &Arc<InMemoryAuthRepository>) -> TokenService<InMemoryAuthRepository> {
        TokenService::new(repo.clone(), Arc::new(AuthConfig::new(SECRET, 15)))
    }

    fn codec() -> TokenCodec {
        TokenCodec::new(SECRET, 15)
    }

    #[tokio::test]
    async fn test_issue_links_both_tokens_to_the_stored_session() {
        let repo = Arc::new(InMemoryAuthRepository::new());
        let identity = Identity::new(Role::Admin);

        let pair = service(&repo).issue(&identity).await.unwrap();

        let access = codec().verify_access(pair.access.as_str()).unwrap();
        let refresh = codec().verify_refresh(pair.refresh.as_str()).unwrap();

        assert_eq!(access.sub, identity.id);
        assert_eq!(access.role, Role::Admin);
        assert_eq!(refresh.sub, identity.id);
        assert_eq!(access.sid, refresh.sid);

        // The shared sid is the stored session's id
        let session = repo.find(&identity.id, &access.sid).await.unwrap();
        assert!(session.is_some());
        assert_eq!(repo.session_count().await, 1);
    }

    #[tokio::test]
    async fn test_verify_access_reports_expiry_distinctly() {
        let repo = Arc::new(InMemoryAuthRepository::new());
        let identity = Identity::new(Role::Viewer);

        let expired_service =
            TokenService::new(repo.clone(), Arc::new(AuthConfig::new(SECRET, -5)));
        let pair = expired_service.issue(&identity).await.unwrap();

        let result = expired_service.verify_access(pair.access.as_str());
        assert!(matches!(result, Err(AuthError::AuthTokenExpired)));

        let result = service(&repo).verify_access("not-a-token");
        assert!(matches!(result, Err(AuthError::InvalidAuthToken)));
    }

    #[tokio::test]
    async fn test_revoke_deletes_exactly_the_named_session() {
        let repo = Arc::new(InMemoryAuthRepository::new());
        let identity = Identity::new(Role::Viewer);
        let service = service(&repo);

        let first = service.issue(&identity).await.unwrap();
        let second = service.issue(&identity).await.unwrap();
        assert_eq!(repo.session_count().await, 2);

        service
            .revoke(&identity.id, first.refresh.as_str())
            .await
            .unwrap();

        assert_eq!(repo.session_count().await, 1);

        let first_sid = codec().verify_refresh(first.refresh.as_str()).unwrap().sid;
        let second_sid = codec().verify_refresh(second.refresh.as_str()).unwrap().sid;
        assert!(repo.find(&identity.id, &first_sid).await.unwrap().is_none());
        assert!(repo.find(&identity.id, &second_sid).await.unwrap().is_some());
    }

    #[tokio::test]
    async fn test_revoke_rejects_another_identitys_token() {
        let repo = Arc::new(InMemoryAuthRepository::new());
        let alice = Identity::new(Role::Viewer);
        let bob = Identity::new(Role::Viewer);
        let service = service(&repo);

        let pair = service.issue(&alice).await.unwrap();

        let result = service.revoke(&bob.id, pair.refresh.as_str()).await;
        assert!(matches!(result, Err(AuthError::InvalidCredentialsToken)));

        // Alice's session is untouched
        assert_eq!(repo.session_count().await, 1);
    }

    #[tokio::test]
    async fn test_revoke_rejects_garbage_tokens() {
        let repo = Arc::new(InMemoryAuthRepository::new());
        let identity = Identity::new(Role::Viewer);
        let service = service(&repo);

        service.issue(&identity).await.unwrap();

        for garbage in ["", "junk", "a.b.c"] {
            let result = service.revoke(&identity.id, garbage).await;
            assert!(
                matches!(result, Err(AuthError::InvalidCredentialsToken)),
                "revocation accepted garbage token: {garbage:?}"
            );
        }

        assert_eq!(repo.session_count().await, 1);
    }

    #[tokio::test]
    async fn test_failed_revocation_never_reaches_the_deleter() {
        let service = TokenService::new(
            Arc::new(PanickingSessions),
            Arc::new(AuthConfig::new(SECRET, 15)),
        );

        // Verifies fine but belongs to a different identity
        let token = codec()
            .sign_refresh(&IdentityId::new(), &SessionId::new())
            .unwrap();
        let result = service.revoke(&IdentityId::new(), token.as_str()).await;
        assert!(matches!(result, Err(AuthError::InvalidCredentialsToken)));

        // Does not verify at all
        let result = service.revoke(&IdentityId::new(), "garbage").await;
        assert!(matches!(result, Err(AuthError::InvalidCredentialsToken)));
    }

    #[tokio::test]
    async fn test_revoking_an_already_deleted_session_succeeds() {
        let repo = Arc::new(InMemoryAuthRepository::new());
        let identity = Identity::new(Role::Viewer);
        let service = service(&repo);

        let pair = service.issue(&identity).await.unwrap();

        service
            .revoke(&identity.id, pair.refresh.as_str())
            .await
            .unwrap();
        service
            .revoke(&identity.id, pair.refresh.as_str())
            .await
            .unwrap();

        assert_eq!(repo.session_count().await, 0);
    }
}

#[cfg(test)]
mod authorization_tests {
    use chrono::{Duration, Utc};
    use kernel::id::{IdentityId, SessionId};

    use crate::domain::authorize::require_self_or_admin;
    use crate::domain::entity::session::SessionRecord;
    use crate::domain::repository::SessionRepository;
    use crate::domain::value_object::role::Role;
    use crate::error::{AuthError, AuthResult};
    use crate::infra::memory::InMemoryAuthRepository;
    use crate::token::AccessClaims;

    /// Session store that fails the test if any method runs.
    struct UntouchableSessions;

    impl SessionRepository for UntouchableSessions {
        async fn insert(&self, _identity_id: &IdentityId) -> AuthResult<SessionRecord> {
            panic!("session store must not be touched");
        }

        async fn find(
            &self,
            _identity_id: &IdentityId,
            _session_id: &SessionId,
        ) -> AuthResult<Option<SessionRecord>> {
            panic!("session store must not be touched");
        }

        async fn delete(&self, _session_id: &SessionId) -> AuthResult<()> {
            panic!("session store must not be touched");
        }
    }

    fn claims(identity_id: IdentityId, role: Role, session_id: SessionId) -> AccessClaims {
        AccessClaims {
            sub: identity_id,
            role,
            sid: session_id,
            exp: (Utc::now() + Duration::minutes(15)).timestamp(),
        }
    }

    #[tokio::test]
    async fn test_admin_passes_without_a_session_lookup() {
        let admin = claims(IdentityId::new(), Role::Admin, SessionId::new());
        let target = IdentityId::new();

        let result = require_self_or_admin(Some(&target), &admin, &UntouchableSessions).await;
        assert!(result.is_ok());
    }

    #[tokio::test]
    async fn test_self_access_with_live_session() {
        let repo = InMemoryAuthRepository::new();
        let identity_id = IdentityId::new();
        let session = SessionRepository::insert(&repo, &identity_id).await.unwrap();

        let viewer = claims(identity_id, Role::Viewer, session.id);

        let result = require_self_or_admin(Some(&identity_id), &viewer, &repo).await;
        assert!(result.is_ok());
    }

    #[tokio::test]
    async fn test_self_access_fails_after_revocation() {
        let repo = InMemoryAuthRepository::new();
        let identity_id = IdentityId::new();
        let session = SessionRepository::insert(&repo, &identity_id).await.unwrap();
        repo.delete(&session.id).await.unwrap();

        let viewer = claims(identity_id, Role::Viewer, session.id);

        let result = require_self_or_admin(Some(&identity_id), &viewer, &repo).await;
        assert!(matches!(result, Err(AuthError::UserOrRefreshTokenNotFound)));
    }

    #[tokio::test]
    async fn test_self_access_fails_for_a_session_the_token_does_not_name() {
        let repo = InMemoryAuthRepository::new();
        let identity_id = IdentityId::new();
        SessionRepository::insert(&repo, &identity_id).await.unwrap();

        // Live session exists, but the token names a different one
        let viewer = claims(identity_id, Role::Viewer, SessionId::new());

        let result = require_self_or_admin(Some(&identity_id), &viewer, &repo).await;
        assert!(matches!(result, Err(AuthError::UserOrRefreshTokenNotFound)));
    }
}

#[cfg(test)]
mod account_lifecycle_tests {
    use std::sync::Arc;

    use crate::application::change_password::{ChangePasswordInput, ChangePasswordUseCase};
    use crate::application::config::AuthConfig;
    use crate::application::enroll::{EnrollInput, EnrollUseCase};
    use crate::application::sign_in::{SignInInput, SignInUseCase};
    use crate::application::tokens::TokenService;
    use crate::domain::authorize::require_self_or_admin;
    use crate::domain::entity::identity::Identity;
    use crate::domain::value_object::role::Role;
    use crate::error::{AuthError, AuthResult};
    use crate::infra::memory::InMemoryAuthRepository;

    fn config() -> Arc<AuthConfig> {
        Arc::new(AuthConfig::new("lifecycle-test-secret", 15))
    }

    async fn enroll(
        repo: &Arc<InMemoryAuthRepository>,
        username: &str,
        password: &str,
    ) -> Identity {
        let identity = Identity::new(Role::Viewer);
        let identity_id = identity.id;
        repo.seed_identity(identity).await;

        EnrollUseCase::new(repo.clone(), repo.clone())
            .execute(EnrollInput {
                identity_id,
                username: username.to_string(),
                password: password.to_string(),
            })
            .await
            .unwrap();

        repo.identity(&identity_id).await.unwrap()
    }

    async fn change_password(
        repo: &Arc<InMemoryAuthRepository>,
        identity: &Identity,
        current: &str,
        new: &str,
    ) -> AuthResult<()> {
        ChangePasswordUseCase::new(repo.clone(), repo.clone())
            .execute(ChangePasswordInput {
                identity_id: identity.id,
                current_password: current.to_string(),
                new_password: new.to_string(),
            })
            .await
    }

    #[tokio::test]
    async fn test_full_lifecycle_from_enrollment_to_revocation() {
        let repo = Arc::new(InMemoryAuthRepository::new());
        let identity = enroll(&repo, "alice", "sturdy-password").await;

        let sign_in = SignInUseCase::new(repo.clone(), repo.clone(), repo.clone(), config());
        let output = sign_in
            .execute(SignInInput {
                username: "alice".to_string(),
                password: "sturdy-password".to_string(),
            })
            .await
            .unwrap();

        let tokens = TokenService::new(repo.clone(), config());
        let claims = tokens.verify_access(output.tokens.access.as_str()).unwrap();
        assert_eq!(claims.sub, identity.id);

        // Self access holds while the session is live
        require_self_or_admin(Some(&identity.id), &claims, &*repo)
            .await
            .unwrap();

        tokens
            .revoke(&identity.id, output.tokens.refresh.as_str())
            .await
            .unwrap();
        assert_eq!(repo.session_count().await, 0);

        // The access token still verifies; only the session-backed gate closes
        tokens.verify_access(output.tokens.access.as_str()).unwrap();
        let result = require_self_or_admin(Some(&identity.id), &claims, &*repo).await;
        assert!(matches!(result, Err(AuthError::UserOrRefreshTokenNotFound)));
    }

    #[tokio::test]
    async fn test_change_password_rotates_the_credential() {
        let repo = Arc::new(InMemoryAuthRepository::new());
        let identity = enroll(&repo, "alice", "original-password").await;

        change_password(&repo, &identity, "original-password", "replacement-pw")
            .await
            .unwrap();

        let sign_in = SignInUseCase::new(repo.clone(), repo.clone(), repo.clone(), config());

        let old = sign_in
            .execute(SignInInput {
                username: "alice".to_string(),
                password: "original-password".to_string(),
            })
            .await;
        assert!(matches!(old, Err(AuthError::InvalidCredentials)));

        sign_in
            .execute(SignInInput {
                username: "alice".to_string(),
                password: "replacement-pw".to_string(),
            })
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn test_change_password_rejects_wrong_current_password() {
        let repo = Arc::new(InMemoryAuthRepository::new());
        let identity = enroll(&repo, "alice", "original-password").await;

        let result = change_password(&repo, &identity, "guessed-password", "replacement-pw").await;
        assert!(matches!(result, Err(AuthError::InvalidCredentials)));
    }

    #[tokio::test]
    async fn test_change_password_hides_unknown_identities() {
        let repo = Arc::new(InMemoryAuthRepository::new());
        let ghost = Identity::new(Role::Viewer);

        // Not UserNotFound: the caller must not learn whether the identity exists
        let result = change_password(&repo, &ghost, "whatever-pw", "replacement-pw").await;
        assert!(matches!(result, Err(AuthError::InvalidCredentials)));
    }

    #[tokio::test]
    async fn test_change_password_reports_policy_violations_distinctly() {
        let repo = Arc::new(InMemoryAuthRepository::new());
        let identity = enroll(&repo, "alice", "original-password").await;

        let result = change_password(&repo, &identity, "original-password", "tiny").await;
        assert!(matches!(result, Err(AuthError::PasswordTooWeak)));
    }
}
