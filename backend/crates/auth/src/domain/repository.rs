//! Repository Traits
//!
//! Interfaces for the three stores. Implementations are in the
//! infrastructure layer; use cases only see these traits.

use std::time::Duration;

use crate::domain::entity::{
    auth_session::AuthSession,
    user::{NewUser, User},
};
use crate::domain::value_object::{
    email::Email, session_token::SessionToken, user_id::UserId, user_name::UserName,
    user_role::UserRole,
};
use crate::error::AuthResult;

/// Credential store
#[trait_variant::make(UserRepository: Send)]
pub trait LocalUserRepository {
    /// Persist a new user and return the assigned ID.
    ///
    /// Fails with `EmailTaken` / `UserNameTaken` when either is in use,
    /// including when a concurrent registration wins the race.
    async fn create(&self, user: &NewUser) -> AuthResult<UserId>;

    /// `UserNotFound` if absent
    async fn get_by_id(&self, user_id: UserId) -> AuthResult<User>;

    /// `UserNotFound` if absent
    async fn get_by_email(&self, email: &Email) -> AuthResult<User>;

    /// `UserNotFound` if absent
    async fn get_by_user_name(&self, user_name: &UserName) -> AuthResult<User>;

    async fn exists_by_email(&self, email: &Email) -> AuthResult<bool>;

    async fn exists_by_user_name(&self, user_name: &UserName) -> AuthResult<bool>;
}

/// Session store
#[trait_variant::make(AuthSessionRepository: Send)]
pub trait LocalAuthSessionRepository {
    /// Issue and persist a session with a fresh token
    async fn create(
        &self,
        user_id: UserId,
        user_role: UserRole,
        ttl: Duration,
    ) -> AuthResult<AuthSession>;

    /// `SessionNotFound` when absent or expired. An expired record is
    /// deleted before the error is returned.
    async fn get(&self, token: &SessionToken) -> AuthResult<AuthSession>;

    /// Idempotent
    async fn delete(&self, token: &SessionToken) -> AuthResult<()>;
}

/// Per-user failed-login counter with a fixed TTL window
#[trait_variant::make(AttemptRepository: Send)]
pub trait LocalAttemptRepository {
    /// 0 when no window is open
    async fn get(&self, user_id: UserId) -> AuthResult<i64>;

    /// Atomic. The first increment opens the window.
    async fn increment(&self, user_id: UserId) -> AuthResult<i64>;

    /// Atomic. The counter is removed once it drops to zero or below.
    async fn decrement(&self, user_id: UserId) -> AuthResult<i64>;

    async fn reset(&self, user_id: UserId) -> AuthResult<()>;
}
