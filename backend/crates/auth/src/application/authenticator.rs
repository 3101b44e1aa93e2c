//! Authenticator
//!
//! Resolves a raw session token to the identity bound at issuance.
//! Read-only: nothing about the session changes on a successful check.

use std::sync::Arc;

use crate::domain::repository::AuthSessionRepository;
use crate::domain::value_object::{
    session_token::SessionToken, user_id::UserId, user_role::UserRole,
};
use crate::error::{AuthError, AuthResult};

/// Identity attached to an authenticated request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Identity {
    pub user_id: UserId,
    pub user_role: UserRole,
}

pub struct Authenticator<S>
where
    S: AuthSessionRepository,
{
    session_repo: Arc<S>,
}

impl<S> Clone for Authenticator<S>
where
    S: AuthSessionRepository,
{
    fn clone(&self) -> Self {
        Self {
            session_repo: self.session_repo.clone(),
        }
    }
}

impl<S> Authenticator<S>
where
    S: AuthSessionRepository,
{
    pub fn new(session_repo: Arc<S>) -> Self {
        Self { session_repo }
    }

    /// `Unauthorized` for an empty, malformed, unknown or expired token.
    /// Store failures pass through unchanged.
    pub async fn authenticate(&self, session_token: &str) -> AuthResult<Identity> {
        let token = SessionToken::parse(session_token)?;

        match self.session_repo.get(&token).await {
            Ok(session) => Ok(Identity {
                user_id: session.user_id,
                user_role: session.user_role,
            }),
            Err(AuthError::SessionNotFound) => Err(AuthError::Unauthorized),
            Err(e) => Err(e),
        }
    }

    /// `Ok(false)` where `authenticate` would say `Unauthorized`
    pub async fn is_valid(&self, session_token: &str) -> AuthResult<bool> {
        match self.authenticate(session_token).await {
            Ok(_) => Ok(true),
            Err(AuthError::Unauthorized) => Ok(false),
            Err(e) => Err(e),
        }
    }
}
