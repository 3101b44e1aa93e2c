//! Platform Crate - Technical Infrastructure
//!
//! This crate provides shared technical foundations:
//! - Password hashing (Argon2id, NIST SP 800-63B compliant)
//! - Session cookie management
//! - Login attempt limits
//! - Store-call timeout and retry policy
//! - Request ID generation and request logging middleware

pub mod cookie;
pub mod crypto;
pub mod password;
pub mod rate_limit;
pub mod request_log;
pub mod retry;
