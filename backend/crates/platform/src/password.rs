//! Password Hashing and Verification
//!
//! Memory-hard password handling with:
//! - scrypt key derivation (N=16384, r=8, p=1, 64-byte output)
//! - Per-password random salts
//! - Constant-time comparison
//! - Zeroization of derived key material
//!
//! Stored form is `hex(salt) + ":" + hex(digest)`. Length policy applies
//! only when a new hash is created; verification accepts whatever is
//! stored, so hashes written under older policies keep working.

use thiserror::Error;
use zeroize::Zeroize;

use crate::crypto;

// ============================================================================
// Constants
// ============================================================================

/// Minimum password length (Unicode characters)
pub const MIN_PASSWORD_LENGTH: usize = 8;

/// Maximum password length, caps KDF work per attempt
pub const MAX_PASSWORD_LENGTH: usize = 255;

/// Salt length in bytes
pub const SALT_LENGTH: usize = 16;

/// Derived key length in bytes
pub const DERIVED_KEY_LENGTH: usize = 64;

/// scrypt CPU/memory cost, log2 form (N = 16384)
const SCRYPT_LOG_N: u8 = 14;

/// scrypt block size
const SCRYPT_R: u32 = 8;

/// scrypt parallelism
const SCRYPT_P: u32 = 1;

// ============================================================================
// Error Types
// ============================================================================

/// Password policy violation errors
///
/// The policy is length-only: bounds exist to reject trivially guessable
/// secrets and to cap KDF work, not to enforce composition rules.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PasswordPolicyError {
    /// Password is too short
    #[error("Password must be at least {min} characters (got {actual})")]
    TooShort { min: usize, actual: usize },

    /// Password is too long
    #[error("Password must be at most {max} characters (got {actual})")]
    TooLong { max: usize, actual: usize },
}

/// Password hashing errors
#[derive(Debug, Error)]
pub enum PasswordHashError {
    /// Length policy violation
    #[error(transparent)]
    Policy(#[from] PasswordPolicyError),

    /// Key derivation failed (unreachable with the fixed parameters)
    #[error("Password key derivation failed: {0}")]
    Derivation(String),
}

// ============================================================================
// Hashing / Verification
// ============================================================================

/// Hash a password for storage.
///
/// Generates a fresh random salt per call, so hashing the same password
/// twice yields different strings.
///
/// ## Returns
/// `hex(salt):hex(digest)` on success
///
/// ## Errors
/// [`PasswordPolicyError::TooShort`] / [`PasswordPolicyError::TooLong`]
/// (wrapped in [`PasswordHashError::Policy`]) when the length policy is
/// violated.
pub fn hash_password(secret: &str) -> Result<String, PasswordHashError> {
    // Length is counted in Unicode characters, never bytes
    let char_count = secret.chars().count();
    if char_count < MIN_PASSWORD_LENGTH {
        return Err(PasswordPolicyError::TooShort {
            min: MIN_PASSWORD_LENGTH,
            actual: char_count,
        }
        .into());
    }
    if char_count > MAX_PASSWORD_LENGTH {
        return Err(PasswordPolicyError::TooLong {
            max: MAX_PASSWORD_LENGTH,
            actual: char_count,
        }
        .into());
    }

    let salt = crypto::random_bytes(SALT_LENGTH);
    let mut digest = derive(secret.as_bytes(), &salt)?;
    let stored = format!("{}:{}", hex::encode(&salt), hex::encode(&digest));
    digest.zeroize();
    Ok(stored)
}

/// Verify a password against a stored `hex(salt):hex(digest)` string.
///
/// Re-derives with the stored salt and compares digests in constant
/// time. No length policy here. Malformed stored strings are simply a
/// non-match; this function never panics and never reports policy errors.
pub fn verify_password(secret: &str, stored: &str) -> bool {
    let Some((salt_hex, digest_hex)) = stored.split_once(':') else {
        return false;
    };
    let Ok(salt) = hex::decode(salt_hex) else {
        return false;
    };
    let Ok(expected) = hex::decode(digest_hex) else {
        return false;
    };
    if salt.is_empty() || expected.is_empty() {
        return false;
    }

    let Ok(mut derived) = derive(secret.as_bytes(), &salt) else {
        return false;
    };
    let matched = crypto::constant_time_eq(&derived, &expected);
    derived.zeroize();
    matched
}

/// Run scrypt with the fixed cost parameters.
fn derive(secret: &[u8], salt: &[u8]) -> Result<Vec<u8>, PasswordHashError> {
    let params = scrypt::Params::new(SCRYPT_LOG_N, SCRYPT_R, SCRYPT_P, DERIVED_KEY_LENGTH)
        .map_err(|e| PasswordHashError::Derivation(e.to_string()))?;

    let mut output = vec![0u8; DERIVED_KEY_LENGTH];
    scrypt::scrypt(secret, salt, &params, &mut output)
        .map_err(|e| PasswordHashError::Derivation(e.to_string()))?;

    Ok(output)
}

// ============================================================================
// Tests
// ============================================================================
