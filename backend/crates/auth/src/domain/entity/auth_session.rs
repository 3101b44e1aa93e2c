//! Auth Session Entity
//!
//! Server-side session named by an opaque token. The role is captured at
//! issuance and is what request-time authorization sees.

use std::time::Duration;

use chrono::{DateTime, Utc};

use crate::domain::value_object::{
    session_token::SessionToken, user_id::UserId, user_role::UserRole,
};

/// Auth session entity
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthSession {
    pub token: SessionToken,
    pub user_id: UserId,
    pub user_role: UserRole,
    /// Absolute expiry (Unix timestamp ms). Authoritative over any store TTL.
    pub expires_at_ms: i64,
    /// Issuance time (Unix timestamp ms)
    pub created_at_ms: i64,
}

impl AuthSession {
    /// Issue a session with a fresh token
    ///
    /// TTL is provided by the application layer (config), not hard-coded here.
    pub fn new(user_id: UserId, user_role: UserRole, ttl: Duration) -> Self {
        let now_ms = Utc::now().timestamp_millis();
        let ttl_ms = i64::try_from(ttl.as_millis()).unwrap_or(i64::MAX);

        Self {
            token: SessionToken::generate(),
            user_id,
            user_role,
            expires_at_ms: now_ms.saturating_add(ttl_ms),
            created_at_ms: now_ms,
        }
    }

    /// Check if session has expired
    pub fn is_expired(&self) -> bool {
        Utc::now().timestamp_millis() >= self.expires_at_ms
    }

    /// Get remaining time until expiration
    pub fn remaining_ms(&self) -> i64 {
        let now_ms = Utc::now().timestamp_millis();
        (self.expires_at_ms - now_ms).max(0)
    }

    /// Absolute expiry, for the cookie `Expires` attribute
    pub fn expires_at(&self) -> DateTime<Utc> {
        DateTime::from_timestamp_millis(self.expires_at_ms).unwrap_or(DateTime::<Utc>::MAX_UTC)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_session_window() {
        let session = AuthSession::new(
            UserId::from_i64(1),
            UserRole::Standard,
            Duration::from_secs(60),
        );
        assert_eq!(session.expires_at_ms - session.created_at_ms, 60_000);
        assert!(!session.is_expired());
        assert!(session.remaining_ms() > 59_000);
    }

    #[test]
    fn test_zero_ttl_is_expired() {
        let session = AuthSession::new(UserId::from_i64(1), UserRole::Standard, Duration::ZERO);
        assert!(session.is_expired());
        assert_eq!(session.remaining_ms(), 0);
    }

    #[test]
    fn test_expires_at() {
        let session = AuthSession::new(
            UserId::from_i64(1),
            UserRole::Advertiser,
            Duration::from_secs(1),
        );
        assert_eq!(
            session.expires_at().timestamp_millis(),
            session.expires_at_ms
        );
    }

    #[test]
    fn test_tokens_are_unique() {
        let ttl = Duration::from_secs(1);
        let a = AuthSession::new(UserId::from_i64(1), UserRole::Standard, ttl);
        let b = AuthSession::new(UserId::from_i64(1), UserRole::Standard, ttl);
        assert_ne!(a.token, b.token);
    }
}
