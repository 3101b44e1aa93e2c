//! Sign Up Use Case
//!
//! Creates a new user account and signs it in.

use std::sync::Arc;

use crate::application::config::AuthConfig;
use crate::application::hashing::hash_password;
use crate::domain::entity::{auth_session::AuthSession, user::NewUser};
use crate::domain::repository::{AuthSessionRepository, UserRepository};
use crate::domain::value_object::{
    email::Email, user_id::UserId, user_name::UserName, user_password::RawPassword,
    user_role::UserRole,
};
use crate::error::{AuthError, AuthResult};

/// Sign up input
pub struct SignUpInput {
    pub user_name: String,
    pub email: String,
    pub password: String,
    /// Role id: 1 standard, 2 advertiser
    pub role: i16,
}

/// Sign up output
pub struct SignUpOutput {
    pub user_id: UserId,
    pub session: AuthSession,
}

/// Sign up use case
pub struct SignUpUseCase<U, S>
where
    U: UserRepository,
    S: AuthSessionRepository,
{
    user_repo: Arc<U>,
    session_repo: Arc<S>,
    config: Arc<AuthConfig>,
}

impl<U, S> SignUpUseCase<U, S>
where
    U: UserRepository,
    S: AuthSessionRepository,
{
    pub fn new(user_repo: Arc<U>, session_repo: Arc<S>, config: Arc<AuthConfig>) -> Self {
        Self {
            user_repo,
            session_repo,
            config,
        }
    }

    pub async fn execute(&self, input: SignUpInput) -> AuthResult<SignUpOutput> {
        // Validate every field before touching a store
        let user_name = UserName::new(&input.user_name)?;
        let email = Email::new(input.email)?;
        let raw_password = RawPassword::new(input.password)?;
        let user_role = UserRole::parse(input.role)?;

        if self.user_repo.exists_by_email(&email).await? {
            return Err(AuthError::EmailTaken);
        }
        if self.user_repo.exists_by_user_name(&user_name).await? {
            return Err(AuthError::UserNameTaken);
        }

        let password = hash_password(raw_password, &self.config).await?;

        // The store re-checks uniqueness; a racing registration still fails
        // with EmailTaken / UserNameTaken here.
        let user_id = self
            .user_repo
            .create(&NewUser::new(user_name, email, password, user_role))
            .await?;

        let session = self
            .session_repo
            .create(user_id, user_role, self.config.session_ttl)
            .await?;

        tracing::info!(user_id = %user_id, role = %user_role, "User signed up");

        Ok(SignUpOutput { user_id, session })
    }
}
