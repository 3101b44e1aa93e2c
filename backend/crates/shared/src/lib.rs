//! Shared Kernel - Domain-crossing minimal core
//!
//! This crate contains the "smallest core" of vocabulary shared by every
//! service that sits behind the session authenticator:
//! - Common error types and result aliases
//! - Typed numeric identifiers
//!
//! **Design Principle**: Only include things that are "hard to change"
//! and have consistent meaning across all services.

pub mod error {
    pub mod app_error;
    pub mod conversions;
    pub mod kind;
}
pub mod id;
