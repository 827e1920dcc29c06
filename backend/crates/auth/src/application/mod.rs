//! Application Layer
//!
//! Use cases and application services.

pub mod change_password;
pub mod config;
pub mod enroll;
pub mod sign_in;
pub mod tokens;

// Re-exports
pub use change_password::{ChangePasswordInput, ChangePasswordUseCase};
pub use config::AuthConfig;
pub use enroll::{EnrollInput, EnrollUseCase};
pub use sign_in::{SignInInput, SignInOutput, SignInUseCase};
pub use tokens::TokenService;
