//! Auth Error Types

use kernel::error::kind::ErrorKind;
use thiserror::Error;

/// Errors produced by the auth module.
///
/// Variants that guard sign-in and revocation are deliberately coarse:
/// a caller probing for accounts must not be able to tell a missing user
/// from a wrong password, or a forged token from someone else's token.
#[derive(Debug, Error)]
pub enum AuthError {
    /// Password rejected by the strength policy (too short)
    #[error("Password is too weak")]
    PasswordTooWeak,

    /// Password exceeds the maximum accepted length
    #[error("Password is too long")]
    PasswordTooLong,

    /// Access token failed verification for any reason other than expiry
    #[error("Invalid auth token")]
    InvalidAuthToken,

    /// Access token carried a valid signature but its expiry has passed
    #[error("Auth token expired")]
    AuthTokenExpired,

    /// Refresh token failed verification or belongs to another identity
    #[error("Invalid credentials token")]
    InvalidCredentialsToken,

    /// Sign-in or password change failed; covers unknown username,
    /// missing credential and wrong password alike
    #[error("Invalid credentials")]
    InvalidCredentials,

    /// Identity does not exist
    #[error("User not found")]
    UserNotFound,

    /// Identity already completed enrollment
    #[error("User already has a sign-in method")]
    UserAlreadyHasSignInMethod,

    /// Authorization check invoked without a target user id
    #[error("No user id parameter")]
    NoUserIdParameter,

    /// Caller is authenticated but the target resource belongs to someone else
    #[error("User mismatch")]
    UserMismatch,

    /// Session referenced by the access token is no longer live
    #[error("User or refresh token not found")]
    UserOrRefreshTokenNotFound,

    /// Caller's role does not grant the requested operation
    #[error("No rights")]
    NoRights,

    /// Unexpected internal failure
    #[error("Internal error: {0}")]
    Internal(String),
}

/// Result type for auth operations
pub type AuthResult<T> = Result<T, AuthError>;

impl AuthError {
    /// Map the error to its transport-agnostic kind.
    pub fn kind(&self) -> ErrorKind {
        match self {
            AuthError::PasswordTooWeak => ErrorKind::BadRequest,
            AuthError::PasswordTooLong => ErrorKind::BadRequest,
            AuthError::InvalidAuthToken => ErrorKind::Unauthorized,
            AuthError::AuthTokenExpired => ErrorKind::Unauthorized,
            AuthError::InvalidCredentialsToken => ErrorKind::Unauthorized,
            AuthError::InvalidCredentials => ErrorKind::Unauthorized,
            AuthError::UserNotFound => ErrorKind::NotFound,
            AuthError::UserAlreadyHasSignInMethod => ErrorKind::Conflict,
            AuthError::NoUserIdParameter => ErrorKind::BadRequest,
            AuthError::UserMismatch => ErrorKind::Forbidden,
            AuthError::UserOrRefreshTokenNotFound => ErrorKind::NotFound,
            AuthError::NoRights => ErrorKind::Forbidden,
            AuthError::Internal(_) => ErrorKind::InternalServerError,
        }
    }

    /// Stable machine-readable code, safe to expose to clients.
    pub fn code(&self) -> &'static str {
        match self {
            AuthError::PasswordTooWeak => "PASSWORD_TOO_WEAK",
            AuthError::PasswordTooLong => "PASSWORD_TOO_LONG",
            AuthError::InvalidAuthToken => "INVALID_AUTH_TOKEN",
            AuthError::AuthTokenExpired => "AUTH_TOKEN_EXPIRED",
            AuthError::InvalidCredentialsToken => "INVALID_CREDENTIALS_TOKEN",
            AuthError::InvalidCredentials => "INVALID_CREDENTIALS",
            AuthError::UserNotFound => "USER_NOT_FOUND",
            AuthError::UserAlreadyHasSignInMethod => "USER_ALREADY_HAS_SIGN_IN_METHOD",
            AuthError::NoUserIdParameter => "NO_USER_ID_PARAMETER",
            AuthError::UserMismatch => "USER_MISMATCH",
            AuthError::UserOrRefreshTokenNotFound => "USER_OR_REFRESH_TOKEN_NOT_FOUND",
            AuthError::NoRights => "NO_RIGHTS",
            AuthError::Internal(_) => "INTERNAL",
        }
    }
}

impl From<platform::password::PasswordHashError> for AuthError {
    fn from(err: platform::password::PasswordHashError) -> Self {
        use platform::password::{PasswordHashError, PasswordPolicyError};

        match err {
            PasswordHashError::Policy(PasswordPolicyError::TooShort { .. }) => {
                AuthError::PasswordTooWeak
            }
            PasswordHashError::Policy(PasswordPolicyError::TooLong { .. }) => {
                AuthError::PasswordTooLong
            }
            PasswordHashError::Derivation(message) => AuthError::Internal(message),
        }
    }
}
