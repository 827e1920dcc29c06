//! Session Entity

use chrono::{DateTime, Utc};
use kernel::id::{IdentityId, SessionId};

/// Server-side record of a refresh grant.
///
/// A session is live exactly while this record exists; deleting it revokes
/// the matching refresh token. Access tokens already issued against the
/// session stay valid until their own expiry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionRecord {
    /// Session identifier, embedded in both tokens of the issued pair
    pub id: SessionId,
    /// Identity the session belongs to
    pub identity_id: IdentityId,
    /// Creation timestamp
    pub created_at: DateTime<Utc>,
}

impl SessionRecord {
    /// Create a new session for an identity
    pub fn new(identity_id: IdentityId) -> Self {
        Self {
            id: SessionId::new(),
            identity_id,
            created_at: Utc::now(),
        }
    }
}
