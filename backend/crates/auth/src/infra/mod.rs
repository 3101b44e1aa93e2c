//! Infrastructure Layer
//!
//! Store implementations: PostgreSQL for credentials, Redis for sessions
//! and attempt counters, and in-memory doubles of all three.

pub mod memory;
pub mod postgres;
pub mod redis;

pub use self::memory::{MemoryAttemptRepository, MemorySessionRepository, MemoryUserRepository};
pub use self::postgres::PgUserRepository;
pub use self::redis::{RedisAttemptRepository, RedisSessionRepository};
