//! Platform Crate - Technical Infrastructure
//!
//! This crate provides shared technical foundations:
//! - Cryptographic utilities (secure randomness, constant-time comparison)
//! - Password hashing (scrypt, memory-hard KDF)

pub mod crypto;
pub mod password;
