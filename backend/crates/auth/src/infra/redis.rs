//! Redis Session Store and Attempt Counter
//!
//! Sessions: `session:{token}` holds a JSON record and carries a native
//! `PX` expiry. The record's own `expires_at_ms` is checked on every read,
//! so a key that outlives its expiry is still treated as gone.
//!
//! Attempts: `attempts:{user_id}` is a plain integer. Increment and
//! decrement run as Lua scripts so the read-modify-write happens inside
//! Redis.

use std::time::Duration;

use platform::rate_limit::AttemptLimit;
use platform::retry::RetryPolicy;
use redis::{Script, aio::ConnectionManager};
use serde::{Deserialize, Serialize};

use crate::domain::entity::auth_session::AuthSession;
use crate::domain::repository::{AttemptRepository, AuthSessionRepository};
use crate::domain::value_object::{
    session_token::SessionToken, user_id::UserId, user_role::UserRole,
};
use crate::error::{AuthError, AuthResult};

const SESSION_KEY_PREFIX: &str = "session:";
const ATTEMPT_KEY_PREFIX: &str = "attempts:";

/// INCR; open the window on the first hit. A counter that lost its TTL
/// gets one again instead of living forever.
const INCREMENT_SCRIPT: &str = r#"
local count = redis.call('INCR', KEYS[1])
if count == 1 or redis.call('PTTL', KEYS[1]) < 0 then
    redis.call('PEXPIRE', KEYS[1], ARGV[1])
end
return count
"#;

/// DECR; drop the key once it reaches zero
const DECREMENT_SCRIPT: &str = r#"
local count = redis.call('DECR', KEYS[1])
if count <= 0 then
    redis.call('DEL', KEYS[1])
end
return count
"#;

fn session_key(token: &SessionToken) -> String {
    format!("{SESSION_KEY_PREFIX}{token}")
}

fn attempt_key(user_id: UserId) -> String {
    format!("{ATTEMPT_KEY_PREFIX}{user_id}")
}

// ============================================================================
// Session Store
// ============================================================================

/// Stored form of a session. The token is the key, not part of the value.
#[derive(Debug, Serialize, Deserialize)]
struct SessionRecord {
    user_id: i64,
    role: i16,
    expires_at_ms: i64,
    created_at_ms: i64,
}

impl SessionRecord {
    fn from_session(session: &AuthSession) -> Self {
        Self {
            user_id: session.user_id.as_i64(),
            role: session.user_role.id(),
            expires_at_ms: session.expires_at_ms,
            created_at_ms: session.created_at_ms,
        }
    }

    fn into_session(self, token: SessionToken) -> Option<AuthSession> {
        Some(AuthSession {
            token,
            user_id: UserId::from_i64(self.user_id),
            user_role: UserRole::from_id(self.role)?,
            expires_at_ms: self.expires_at_ms,
            created_at_ms: self.created_at_ms,
        })
    }
}

/// Redis-backed session repository
#[derive(Clone)]
pub struct RedisSessionRepository {
    conn: ConnectionManager,
    policy: RetryPolicy,
}

impl RedisSessionRepository {
    pub fn new(conn: ConnectionManager, policy: RetryPolicy) -> Self {
        Self { conn, policy }
    }

    async fn remove(&self, operation: &'static str, key: &str) -> AuthResult<()> {
        self.policy
            .run(operation, || {
                let mut conn = self.conn.clone();
                async move {
                    let _: i64 = redis::cmd("DEL")
                        .arg(key)
                        .query_async(&mut conn)
                        .await
                        .map_err(AuthError::cache(operation))?;
                    Ok(())
                }
            })
            .await
    }
}

impl AuthSessionRepository for RedisSessionRepository {
    async fn create(
        &self,
        user_id: UserId,
        user_role: UserRole,
        ttl: Duration,
    ) -> AuthResult<AuthSession> {
        let session = AuthSession::new(user_id, user_role, ttl);
        let payload = serde_json::to_string(&SessionRecord::from_session(&session))
            .map_err(|e| AuthError::Internal(format!("Session encode failed: {e}")))?;
        // PX must be positive
        let ttl_ms = session.remaining_ms().max(1);

        let key = session_key(&session.token);
        let (key, payload) = (key.as_str(), payload.as_str());
        self.policy
            .run("session.create", || {
                let mut conn = self.conn.clone();
                async move {
                    let _: () = redis::cmd("SET")
                        .arg(key)
                        .arg(payload)
                        .arg("PX")
                        .arg(ttl_ms)
                        .query_async(&mut conn)
                        .await
                        .map_err(AuthError::cache("session.create"))?;
                    Ok::<(), AuthError>(())
                }
            })
            .await?;

        Ok(session)
    }

    async fn get(&self, token: &SessionToken) -> AuthResult<AuthSession> {
        let key = session_key(token);
        let key = key.as_str();

        let raw: Option<String> = self
            .policy
            .run("session.get", || {
                let mut conn = self.conn.clone();
                async move {
                    redis::cmd("GET")
                        .arg(key)
                        .query_async(&mut conn)
                        .await
                        .map_err(AuthError::cache("session.get"))
                }
            })
            .await?;

        let Some(raw) = raw else {
            return Err(AuthError::SessionNotFound);
        };

        let session = serde_json::from_str::<SessionRecord>(&raw)
            .ok()
            .and_then(|record| record.into_session(*token));

        match session {
            Some(session) if !session.is_expired() => Ok(session),
            Some(_) => {
                self.remove("session.expire", key).await?;
                Err(AuthError::SessionNotFound)
            }
            None => {
                tracing::warn!("Discarding unreadable session record");
                self.remove("session.expire", key).await?;
                Err(AuthError::SessionNotFound)
            }
        }
    }

    async fn delete(&self, token: &SessionToken) -> AuthResult<()> {
        self.remove("session.delete", &session_key(token)).await
    }
}

// ============================================================================
// Attempt Counter
// ============================================================================

/// Redis-backed attempt counter
#[derive(Clone)]
pub struct RedisAttemptRepository {
    conn: ConnectionManager,
    window_ms: i64,
    policy: RetryPolicy,
    increment: Script,
    decrement: Script,
}

impl RedisAttemptRepository {
    pub fn new(conn: ConnectionManager, limit: &AttemptLimit, policy: RetryPolicy) -> Self {
        Self {
            conn,
            window_ms: limit.window_ms(),
            policy,
            increment: Script::new(INCREMENT_SCRIPT),
            decrement: Script::new(DECREMENT_SCRIPT),
        }
    }
}

impl AttemptRepository for RedisAttemptRepository {
    async fn get(&self, user_id: UserId) -> AuthResult<i64> {
        let key = attempt_key(user_id);
        let key = key.as_str();

        let count: Option<i64> = self
            .policy
            .run("attempts.get", || {
                let mut conn = self.conn.clone();
                async move {
                    redis::cmd("GET")
                        .arg(key)
                        .query_async(&mut conn)
                        .await
                        .map_err(AuthError::cache("attempts.get"))
                }
            })
            .await?;

        Ok(count.unwrap_or(0).max(0))
    }

    async fn increment(&self, user_id: UserId) -> AuthResult<i64> {
        let key = attempt_key(user_id);
        let key = key.as_str();
        let window_ms = self.window_ms;
        let script = &self.increment;

        self.policy
            .run("attempts.increment", || {
                let mut conn = self.conn.clone();
                async move {
                    let count: i64 = script
                        .key(key)
                        .arg(window_ms)
                        .invoke_async(&mut conn)
                        .await
                        .map_err(AuthError::cache("attempts.increment"))?;
                    Ok(count)
                }
            })
            .await
    }

    async fn decrement(&self, user_id: UserId) -> AuthResult<i64> {
        let key = attempt_key(user_id);
        let key = key.as_str();
        let script = &self.decrement;

        let count: i64 = self
            .policy
            .run("attempts.decrement", || {
                let mut conn = self.conn.clone();
                async move {
                    let count: i64 = script
                        .key(key)
                        .invoke_async(&mut conn)
                        .await
                        .map_err(AuthError::cache("attempts.decrement"))?;
                    Ok::<i64, AuthError>(count)
                }
            })
            .await?;

        Ok(count.max(0))
    }

    async fn reset(&self, user_id: UserId) -> AuthResult<()> {
        let key = attempt_key(user_id);
        let key = key.as_str();

        self.policy
            .run("attempts.reset", || {
                let mut conn = self.conn.clone();
                async move {
                    let _: i64 = redis::cmd("DEL")
                        .arg(key)
                        .query_async(&mut conn)
                        .await
                        .map_err(AuthError::cache("attempts.reset"))?;
                    Ok(())
                }
            })
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key_layout() {
        let token = SessionToken::generate();
        assert_eq!(session_key(&token), format!("session:{token}"));
        assert_eq!(attempt_key(UserId::from_i64(7)), "attempts:7");
    }

    #[test]
    fn test_session_record_roundtrip() {
        let session = AuthSession::new(
            UserId::from_i64(3),
            UserRole::Advertiser,
            Duration::from_secs(60),
        );
        let json = serde_json::to_string(&SessionRecord::from_session(&session)).unwrap();
        let record: SessionRecord = serde_json::from_str(&json).unwrap();
        assert_eq!(record.into_session(session.token), Some(session));
    }

    #[test]
    fn test_session_record_json_shape() {
        let json = r#"{"user_id":1,"role":1,"expires_at_ms":10,"created_at_ms":5}"#;
        let record: SessionRecord = serde_json::from_str(json).unwrap();
        let session = record.into_session(SessionToken::generate()).unwrap();
        assert_eq!(session.user_role, UserRole::Standard);
        // expires_at_ms is in 1970
        assert!(session.is_expired());
    }

    #[test]
    fn test_unknown_role_is_unreadable() {
        let json = r#"{"user_id":1,"role":9,"expires_at_ms":10,"created_at_ms":5}"#;
        let record: SessionRecord = serde_json::from_str(json).unwrap();
        assert!(record.into_session(SessionToken::generate()).is_none());
    }
}
