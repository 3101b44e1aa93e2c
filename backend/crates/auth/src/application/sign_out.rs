//! Sign Out Use Case
//!
//! Invalidates a user session.

use std::sync::Arc;

use crate::domain::repository::AuthSessionRepository;
use crate::domain::value_object::session_token::SessionToken;
use crate::error::{AuthError, AuthResult};

/// Sign out use case
pub struct SignOutUseCase<S>
where
    S: AuthSessionRepository,
{
    session_repo: Arc<S>,
}

impl<S> SignOutUseCase<S>
where
    S: AuthSessionRepository,
{
    pub fn new(session_repo: Arc<S>) -> Self {
        Self { session_repo }
    }

    /// Delete the session named by `session_token`.
    ///
    /// Idempotent: an unknown or unparsable token is already signed out.
    /// Only a store failure is an error.
    pub async fn execute(&self, session_token: &str) -> AuthResult<()> {
        let token = match SessionToken::parse(session_token) {
            Ok(token) => token,
            Err(AuthError::Unauthorized) => return Ok(()),
            Err(e) => return Err(e),
        };

        self.session_repo.delete(&token).await?;

        tracing::info!("User signed out");
        Ok(())
    }
}
