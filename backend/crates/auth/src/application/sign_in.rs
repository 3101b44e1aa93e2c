//! Sign In Use Case
//!
//! Authenticates a user and creates a session.
//!
//! Order matters: the attempt limit is checked before any credential
//! check, so a locked-out user learns nothing from further guesses. Every
//! credential failure (wrong password, wrong role) counts as an attempt
//! and surfaces as the same `InvalidCredentials`.

use std::sync::Arc;

use crate::application::config::AuthConfig;
use crate::application::hashing::verify_password;
use crate::domain::entity::auth_session::AuthSession;
use crate::domain::repository::{AttemptRepository, AuthSessionRepository, UserRepository};
use crate::domain::value_object::{
    email::Email, user_id::UserId, user_password::RawPassword, user_role::UserRole,
};
use crate::error::{AuthError, AuthResult};

/// Sign in input
pub struct SignInInput {
    pub email: String,
    pub password: String,
    /// Role the client claims to sign in as
    pub role: UserRole,
}

/// Sign in output
pub struct SignInOutput {
    pub user_id: UserId,
    pub session: AuthSession,
}

/// Sign in use case
pub struct SignInUseCase<U, S, A>
where
    U: UserRepository,
    S: AuthSessionRepository,
    A: AttemptRepository,
{
    user_repo: Arc<U>,
    session_repo: Arc<S>,
    attempt_repo: Arc<A>,
    config: Arc<AuthConfig>,
}

impl<U, S, A> SignInUseCase<U, S, A>
where
    U: UserRepository,
    S: AuthSessionRepository,
    A: AttemptRepository,
{
    pub fn new(
        user_repo: Arc<U>,
        session_repo: Arc<S>,
        attempt_repo: Arc<A>,
        config: Arc<AuthConfig>,
    ) -> Self {
        Self {
            user_repo,
            session_repo,
            attempt_repo,
            config,
        }
    }

    pub async fn execute(&self, input: SignInInput) -> AuthResult<SignInOutput> {
        // Resolve the user; an unknown email looks like any other failure
        let email = Email::new(input.email).map_err(|_| AuthError::InvalidCredentials)?;
        let user = match self.user_repo.get_by_email(&email).await {
            Ok(user) => user,
            Err(AuthError::UserNotFound) => {
                tracing::debug!("Sign in for unknown email");
                return Err(AuthError::InvalidCredentials);
            }
            Err(e) => return Err(e),
        };

        // Refuse before verifying once the window is used up
        let attempts = self.attempt_repo.get(user.user_id).await?;
        if self.config.attempt_limit.is_exceeded(attempts) {
            tracing::warn!(
                user_id = %user.user_id,
                attempts,
                "Sign in rejected: too many attempts"
            );
            return Err(AuthError::TooManyAttempts);
        }

        // Password and role are checked together
        let raw_password = RawPassword::for_verification(input.password);
        let password_ok =
            verify_password(user.password.clone(), raw_password, &self.config).await?;
        let role_ok = user.user_role == input.role;

        if !password_ok || !role_ok {
            let attempts = self.attempt_repo.increment(user.user_id).await?;
            tracing::warn!(
                user_id = %user.user_id,
                reason = if password_ok { "role_mismatch" } else { "bad_password" },
                attempts,
                "Sign in failed"
            );
            return Err(AuthError::InvalidCredentials);
        }

        // Success clears the counter
        self.attempt_repo.reset(user.user_id).await?;
        let session = self
            .session_repo
            .create(user.user_id, user.user_role, self.config.session_ttl)
            .await?;

        tracing::info!(user_id = %user.user_id, role = %user.user_role, "User signed in");

        Ok(SignInOutput {
            user_id: user.user_id,
            session,
        })
    }
}
