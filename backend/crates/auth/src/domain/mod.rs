//! Domain Layer
//!
//! Contains entities, value objects, repository traits, and the
//! authorization rules evaluated against verified claims.

pub mod authorize;
pub mod entity;
pub mod repository;
pub mod value_object;

// Re-exports
pub use entity::{credential::PasswordCredential, identity::Identity, session::SessionRecord};
pub use repository::{CredentialRepository, IdentityRepository, SessionRepository};
pub use value_object::{password_hash::PasswordHash, role::Role};
