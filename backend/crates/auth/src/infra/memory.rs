//! In-memory stores
//!
//! Same contracts as the PostgreSQL and Redis stores, without a server.
//! Used by tests and local runs. Native key expiry is emulated with an
//! `Instant` per entry, independent of the record's own `expires_at_ms`.

use std::collections::HashMap;
use std::time::{Duration, Instant};

use tokio::sync::Mutex;

use crate::domain::entity::{
    auth_session::AuthSession,
    user::{NewUser, User},
};
use crate::domain::repository::{AttemptRepository, AuthSessionRepository, UserRepository};
use crate::domain::value_object::{
    email::Email, session_token::SessionToken, user_id::UserId, user_name::UserName,
    user_role::UserRole,
};
use crate::error::{AuthError, AuthResult};

// ============================================================================
// Users
// ============================================================================

#[derive(Default)]
struct UserTable {
    last_id: i64,
    users: Vec<User>,
}

#[derive(Default)]
pub struct MemoryUserRepository {
    table: Mutex<UserTable>,
}

impl MemoryUserRepository {
    pub fn new() -> Self {
        Self::default()
    }

    async fn find(&self, pred: impl Fn(&User) -> bool) -> Option<User> {
        let table = self.table.lock().await;
        table.users.iter().find(|u| pred(u)).cloned()
    }
}

impl UserRepository for MemoryUserRepository {
    async fn create(&self, user: &NewUser) -> AuthResult<UserId> {
        let mut table = self.table.lock().await;

        if table.users.iter().any(|u| u.email == user.email) {
            return Err(AuthError::EmailTaken);
        }
        if table.users.iter().any(|u| u.user_name == user.user_name) {
            return Err(AuthError::UserNameTaken);
        }

        table.last_id += 1;
        let user_id = UserId::from_i64(table.last_id);
        table.users.push(user.clone().into_user(user_id));
        Ok(user_id)
    }

    async fn get_by_id(&self, user_id: UserId) -> AuthResult<User> {
        self.find(|u| u.user_id == user_id)
            .await
            .ok_or(AuthError::UserNotFound)
    }

    async fn get_by_email(&self, email: &Email) -> AuthResult<User> {
        self.find(|u| &u.email == email)
            .await
            .ok_or(AuthError::UserNotFound)
    }

    async fn get_by_user_name(&self, user_name: &UserName) -> AuthResult<User> {
        self.find(|u| &u.user_name == user_name)
            .await
            .ok_or(AuthError::UserNotFound)
    }

    async fn exists_by_email(&self, email: &Email) -> AuthResult<bool> {
        Ok(self.find(|u| &u.email == email).await.is_some())
    }

    async fn exists_by_user_name(&self, user_name: &UserName) -> AuthResult<bool> {
        Ok(self.find(|u| &u.user_name == user_name).await.is_some())
    }
}

// ============================================================================
// Sessions
// ============================================================================

struct SessionEntry {
    session: AuthSession,
    /// Emulated native key expiry
    evict_at: Instant,
}

#[derive(Default)]
pub struct MemorySessionRepository {
    entries: Mutex<HashMap<SessionToken, SessionEntry>>,
    native_ttl_slack: Duration,
}

impl MemorySessionRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Keep keys around `slack` longer than the session TTL, the way a
    /// cache's own expiry can lag behind the stored `expires_at_ms`.
    pub fn with_native_ttl_slack(slack: Duration) -> Self {
        Self {
            native_ttl_slack: slack,
            ..Self::default()
        }
    }

    /// Raw presence of the key, ignoring `expires_at_ms`
    pub async fn contains(&self, token: &SessionToken) -> bool {
        let now = Instant::now();
        self.entries
            .lock()
            .await
            .get(token)
            .is_some_and(|e| e.evict_at > now)
    }

    /// Raw key count, ignoring `expires_at_ms`
    pub async fn raw_len(&self) -> usize {
        let now = Instant::now();
        let mut entries = self.entries.lock().await;
        entries.retain(|_, e| e.evict_at > now);
        entries.len()
    }
}

impl AuthSessionRepository for MemorySessionRepository {
    async fn create(
        &self,
        user_id: UserId,
        user_role: UserRole,
        ttl: Duration,
    ) -> AuthResult<AuthSession> {
        let session = AuthSession::new(user_id, user_role, ttl);
        let entry = SessionEntry {
            session: session.clone(),
            evict_at: Instant::now() + ttl + self.native_ttl_slack,
        };
        self.entries.lock().await.insert(session.token, entry);
        Ok(session)
    }

    async fn get(&self, token: &SessionToken) -> AuthResult<AuthSession> {
        let mut entries = self.entries.lock().await;

        let Some(entry) = entries.get(token) else {
            return Err(AuthError::SessionNotFound);
        };
        if entry.evict_at <= Instant::now() || entry.session.is_expired() {
            entries.remove(token);
            return Err(AuthError::SessionNotFound);
        }
        Ok(entry.session.clone())
    }

    async fn delete(&self, token: &SessionToken) -> AuthResult<()> {
        self.entries.lock().await.remove(token);
        Ok(())
    }
}

// ============================================================================
// Attempts
// ============================================================================

pub struct MemoryAttemptRepository {
    window: Duration,
    counters: Mutex<HashMap<UserId, (i64, Instant)>>,
}

impl MemoryAttemptRepository {
    pub fn new(window: Duration) -> Self {
        Self {
            window,
            counters: Mutex::new(HashMap::new()),
        }
    }
}

fn live(
    counters: &mut HashMap<UserId, (i64, Instant)>,
    user_id: UserId,
) -> Option<&mut (i64, Instant)> {
    let now = Instant::now();
    if counters.get(&user_id).is_some_and(|(_, until)| *until <= now) {
        counters.remove(&user_id);
    }
    counters.get_mut(&user_id)
}

impl AttemptRepository for MemoryAttemptRepository {
    async fn get(&self, user_id: UserId) -> AuthResult<i64> {
        let mut counters = self.counters.lock().await;
        Ok(live(&mut counters, user_id).map_or(0, |(count, _)| *count))
    }

    async fn increment(&self, user_id: UserId) -> AuthResult<i64> {
        let mut counters = self.counters.lock().await;
        if let Some((count, _)) = live(&mut counters, user_id) {
            *count += 1;
            return Ok(*count);
        }
        counters.insert(user_id, (1, Instant::now() + self.window));
        Ok(1)
    }

    async fn decrement(&self, user_id: UserId) -> AuthResult<i64> {
        let mut counters = self.counters.lock().await;
        let Some((count, _)) = live(&mut counters, user_id) else {
            return Ok(0);
        };
        *count -= 1;
        let left = *count;
        if left <= 0 {
            counters.remove(&user_id);
        }
        Ok(left.max(0))
    }

    async fn reset(&self, user_id: UserId) -> AuthResult<()> {
        self.counters.lock().await.remove(&user_id);
        Ok(())
    }
}
