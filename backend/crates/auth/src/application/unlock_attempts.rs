//! Unlock Attempts Use Case
//!
//! Out-of-band adjustment of a user's failed-login counter. Not part of the
//! sign-in flow.

use std::sync::Arc;

use crate::domain::repository::AttemptRepository;
use crate::domain::value_object::user_id::UserId;
use crate::error::AuthResult;

pub struct UnlockAttemptsUseCase<A>
where
    A: AttemptRepository,
{
    attempt_repo: Arc<A>,
}

impl<A> UnlockAttemptsUseCase<A>
where
    A: AttemptRepository,
{
    pub fn new(attempt_repo: Arc<A>) -> Self {
        Self { attempt_repo }
    }

    /// Forgive one failed attempt; returns what is left
    pub async fn forgive_one(&self, user_id: UserId) -> AuthResult<i64> {
        let left = self.attempt_repo.decrement(user_id).await?;
        tracing::info!(user_id = %user_id, attempts = left, "Login attempt forgiven");
        Ok(left)
    }

    /// Clear the counter entirely
    pub async fn unlock(&self, user_id: UserId) -> AuthResult<()> {
        self.attempt_repo.reset(user_id).await?;
        tracing::info!(user_id = %user_id, "Login attempts cleared");
        Ok(())
    }
}
