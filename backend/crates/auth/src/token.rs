//! Token Codec
//!
//! Signs and verifies the two token kinds issued at sign-in. Both are
//! HS256-signed JWTs sharing one symmetric secret, but their claim shapes
//! differ: access tokens carry the role and an `exp`, refresh tokens carry
//! a `kind` discriminator and no expiry at all. A refresh token therefore
//! stays verifiable until its server-side session is deleted.
//!
//! Claims are signed, not encrypted; anyone holding a token can read its
//! payload, so nothing secret may be placed in the claims.

use std::collections::HashSet;

use chrono::{Duration, Utc};
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use kernel::id::{IdentityId, SessionId};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::domain::value_object::role::Role;

/// Token verification and signing errors
#[derive(Debug, Error)]
pub enum TokenError {
    /// Signature checked out but the expiry has passed
    #[error("Token expired")]
    Expired,

    /// Bad signature, malformed payload, wrong shape, or any other defect
    #[error("Invalid token")]
    Invalid,

    /// Signing failed
    #[error("Token encoding failed: {0}")]
    Encoding(String),
}

impl From<jsonwebtoken::errors::Error> for TokenError {
    fn from(err: jsonwebtoken::errors::Error) -> Self {
        use jsonwebtoken::errors::ErrorKind;

        match err.kind() {
            ErrorKind::ExpiredSignature => TokenError::Expired,
            // Everything short of a clean expiry collapses into one bucket;
            // callers must not learn why a token was rejected.
            _ => TokenError::Invalid,
        }
    }
}

/// Discriminator distinguishing the two token shapes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TokenKind {
    Access,
    Refresh,
}

/// Claims carried by an access token
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AccessClaims {
    /// Identity the token authenticates
    pub sub: IdentityId,
    /// Role as granted at issuance; not re-read from storage on use
    pub role: Role,
    /// Session the token was issued against
    pub sid: SessionId,
    /// Expiration time (Unix timestamp)
    pub exp: i64,
}

/// Claims carried by a refresh token.
///
/// There is deliberately no `exp` field; revocation happens by deleting
/// the session record, not by letting the token age out.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RefreshClaims {
    /// Identity the token belongs to
    pub sub: IdentityId,
    /// Session backing this refresh grant
    pub sid: SessionId,
    /// Always [`TokenKind::Refresh`]
    pub kind: TokenKind,
}

/// Signed access token in compact serialized form
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccessToken(String);

impl AccessToken {
    /// Borrow the serialized token
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consume into the serialized token
    pub fn into_string(self) -> String {
        self.0
    }
}

/// Signed refresh token in compact serialized form
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RefreshToken(String);

impl RefreshToken {
    /// Borrow the serialized token
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consume into the serialized token
    pub fn into_string(self) -> String {
        self.0
    }
}

/// Access and refresh token issued together at sign-in
#[derive(Debug, Clone)]
pub struct TokenPair {
    /// Short-lived access token
    pub access: AccessToken,
    /// Refresh token, valid until its session is revoked
    pub refresh: RefreshToken,
}

/// Signs and verifies both token kinds with a shared symmetric secret
#[derive(Clone)]
pub struct TokenCodec {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    access_token_ttl_minutes: i64,
}

impl TokenCodec {
    /// Create a codec from the signing secret and access token lifetime
    pub fn new(secret: &str, access_token_ttl_minutes: i64) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
            access_token_ttl_minutes,
        }
    }

    /// Sign an access token for an identity and session
    pub fn sign_access(
        &self,
        identity_id: &IdentityId,
        role: Role,
        session_id: &SessionId,
    ) -> Result<AccessToken, TokenError> {
        let exp = Utc::now() + Duration::minutes(self.access_token_ttl_minutes);

        let claims = AccessClaims {
            sub: *identity_id,
            role,
            sid: *session_id,
            exp: exp.timestamp(),
        };

        let token = encode(&Header::default(), &claims, &self.encoding_key)
            .map_err(|e| TokenError::Encoding(e.to_string()))?;

        Ok(AccessToken(token))
    }

    /// Sign a refresh token for an identity and session
    pub fn sign_refresh(
        &self,
        identity_id: &IdentityId,
        session_id: &SessionId,
    ) -> Result<RefreshToken, TokenError> {
        let claims = RefreshClaims {
            sub: *identity_id,
            sid: *session_id,
            kind: TokenKind::Refresh,
        };

        let token = encode(&Header::default(), &claims, &self.encoding_key)
            .map_err(|e| TokenError::Encoding(e.to_string()))?;

        Ok(RefreshToken(token))
    }

    /// Verify an access token and return its claims.
    ///
    /// Expiry is the only failure reported distinctly; every other defect
    /// comes back as [`TokenError::Invalid`].
    pub fn verify_access(&self, token: &str) -> Result<AccessClaims, TokenError> {
        let mut validation = Validation::new(Algorithm::HS256);
        // No clock leeway; the expiry instant is exact
        validation.leeway = 0;

        let token_data = decode::<AccessClaims>(token, &self.decoding_key, &validation)?;

        Ok(token_data.claims)
    }

    /// Verify a refresh token and return its claims.
    ///
    /// Never fails with [`TokenError::Expired`]; refresh tokens have no
    /// expiry claim to check.
    pub fn verify_refresh(&self, token: &str) -> Result<RefreshClaims, TokenError> {
        let mut validation = Validation::new(Algorithm::HS256);
        // Refresh tokens carry no exp claim, so expiry checks must be off
        // and exp must not be a required claim
        validation.validate_exp = false;
        validation.required_spec_claims = HashSet::new();

        let token_data = decode::<RefreshClaims>(token, &self.decoding_key, &validation)?;

        if token_data.claims.kind != TokenKind::Refresh {
            return Err(TokenError::Invalid);
        }

        Ok(token_data.claims)
    }
}
