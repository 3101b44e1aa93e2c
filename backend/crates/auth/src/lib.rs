//! Auth (Authentication) Backend Module
//!
//! Clean Architecture structure:
//! - `domain/` - Entities, value objects, repository traits
//! - `application/` - Use cases and the Authenticator
//! - `infra/` - PostgreSQL, Redis and in-memory stores
//! - `presentation/` - HTTP handlers, DTOs, router, middleware
//!
//! ## Features
//! - Registration and login by email + password + role
//! - Server-side sessions in an expiring key-value store, cookie-based tokens
//! - Per-user failed login counter with a fixed window
//! - Auth middleware that attaches `(user_id, role)` to the request
//!
//! ## Security Model
//! - Passwords hashed with Argon2id (NIST SP 800-63B compliant)
//! - Session tokens are random UUIDv4 values, never logged
//! - Session expiry is re-checked on every read, independent of store TTL
//! - Credential failures are indistinguishable to the caller

pub mod application;
pub mod domain;
pub mod error;
pub mod infra;
pub mod presentation;


// Re-exports for convenience
pub use application::config::AuthConfig;
pub use application::{Authenticator, Identity};
pub use error::{AuthError, AuthResult};
pub use infra::{PgUserRepository, RedisAttemptRepository, RedisSessionRepository};
pub use presentation::router::auth_router;

// Re-export kernel error types for unified error handling
pub use kernel::error::{
    app_error::{AppError, AppResult},
    kind::ErrorKind,
};

// Convenience re-exports
pub mod config {
    pub use crate::application::config::*;
}

pub mod models {
    pub use crate::domain::entity::*;
    pub use crate::domain::value_object::*;
    pub use crate::presentation::dto::*;
}

pub mod store {
    pub use crate::infra::memory::{
        MemoryAttemptRepository as MemoryAttemptStore,
        MemorySessionRepository as MemorySessionStore, MemoryUserRepository as MemoryUserStore,
    };
    pub use crate::infra::postgres::PgUserRepository as CredentialStore;
    pub use crate::infra::redis::{
        RedisAttemptRepository as AttemptStore, RedisSessionRepository as SessionStore,
    };
}

pub mod middleware {
    pub use crate::presentation::middleware::*;
}
