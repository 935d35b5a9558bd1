//! Platform Crate - Technical Infrastructure
//!
//! This crate provides shared technical foundations with no domain
//! knowledge:
//! - Password hashing (Argon2id, internally salted)
//! - Signed access tokens (HMAC-SHA256 over a JSON claim set)

pub mod password;
pub mod token;
