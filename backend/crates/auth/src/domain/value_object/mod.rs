//! Value Object Module

pub mod password_hash;
pub mod role;
