//! Identity Entity

use kernel::id::IdentityId;

use crate::domain::value_object::role::Role;

/// An account known to the system.
///
/// Identities are provisioned without any sign-in method; enrollment later
/// attaches a username together with a password credential. Enrollment is
/// one-way: once a username is set it is never cleared.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Identity {
    /// Unique identifier
    pub id: IdentityId,
    /// Role granted to this identity
    pub role: Role,
    /// Sign-in name; `None` until enrollment completes
    pub username: Option<String>,
}

impl Identity {
    /// Create a new identity with no sign-in method
    pub fn new(role: Role) -> Self {
        Self {
            id: IdentityId::new(),
            role,
            username: None,
        }
    }

    /// Whether this identity can sign in.
    ///
    /// True exactly when a non-empty username is present; a password
    /// credential row exists under the same condition.
    pub fn has_sign_in_method(&self) -> bool {
        self.username.as_deref().is_some_and(|name| !name.is_empty())
    }

    /// Attach the sign-in username
    pub fn set_username(&mut self, username: impl Into<String>) {
        self.username = Some(username.into());
    }
}
