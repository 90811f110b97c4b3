//! Platform Crate - Technical Infrastructure
//!
//! Shared technical foundations with no domain knowledge:
//! - Password hashing (Argon2id) with off-runtime helpers
//! - Secure random token generation
//! - Cookie header helpers

pub mod cookie;
pub mod crypto;
pub mod password;
