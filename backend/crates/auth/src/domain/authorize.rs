//! Authorization Rules
//!
//! Role and ownership gates applied to verified access token claims. These
//! run after signature and expiry checks, so the claims they receive are
//! trusted as issued.

use kernel::id::IdentityId;

use crate::domain::repository::SessionRepository;
use crate::error::{AuthError, AuthResult};
use crate::token::AccessClaims;

/// Require the caller to hold the admin role
pub fn require_admin(claims: &AccessClaims) -> AuthResult<()> {
    if claims.role.is_admin() {
        Ok(())
    } else {
        Err(AuthError::NoRights)
    }
}

/// Require at least viewer access.
///
/// Every role satisfies this today; call sites keep the gate so the
/// required access level stays visible where reads are granted.
pub fn require_viewer_or_above(_claims: &AccessClaims) -> AuthResult<()> {
    Ok(())
}

/// Require the caller to be the target user with a live session, or an admin.
///
/// Admins pass on their role alone, without touching the session store.
/// Self access additionally requires that the session named in the token
/// still exists for this identity, so a revoked refresh grant cuts off
/// self-service operations even while the access token itself is unexpired.
pub async fn require_self_or_admin<S>(
    target: Option<&IdentityId>,
    claims: &AccessClaims,
    sessions: &S,
) -> AuthResult<()>
where
    S: SessionRepository,
{
    let target = target.ok_or(AuthError::NoUserIdParameter)?;

    if claims.role.is_admin() {
        return Ok(());
    }

    if claims.sub != *target {
        return Err(AuthError::UserMismatch);
    }

    match sessions.find(&claims.sub, &claims.sid).await? {
        Some(_) => Ok(()),
        None => Err(AuthError::UserOrRefreshTokenNotFound),
    }
}
