//! Auth (Credential & Session Management) Module
//!
//! Clean Architecture structure:
//! - `domain/` - Entities, value objects, repository traits, authorization rules
//! - `application/` - Use cases and application services
//! - `infra/` - Storage implementations
//! - `token` - Signing and verification of the access/refresh token pair
//!
//! ## Features
//! - One-way enrollment: identities are provisioned without a sign-in
//!   method and later receive a username + password
//! - Sign-in issuing a session-backed access/refresh token pair
//! - Password change with current-password check
//! - Role-based and ownership-based authorization gates
//!
//! ## Security Model
//! - Passwords hashed with salted scrypt
//! - HS256 token pair sharing one symmetric secret
//! - Refresh tokens never expire; revocation deletes the server-side session
//! - Sign-in failures are indistinguishable to the caller

pub mod application;
pub mod domain;
pub mod error;
pub mod infra;
pub mod token;

// Re-exports for convenience
pub use application::config::AuthConfig;
pub use error::{AuthError, AuthResult};
pub use infra::memory::InMemoryAuthRepository;
pub use token::{AccessClaims, AccessToken, RefreshClaims, RefreshToken, TokenPair};

// Re-export kernel error types for unified error handling
pub use kernel::error::kind::ErrorKind;

#[cfg(test)]
mod tests;
