//! Argon2id runs on the blocking pool so a slow hash never stalls the
//! request executor.

use tokio::task;

use crate::application::config::AuthConfig;
use crate::domain::value_object::user_password::{RawPassword, UserPassword};
use crate::error::{AuthError, AuthResult};

pub(crate) async fn hash_password(
    raw: RawPassword,
    config: &AuthConfig,
) -> AuthResult<UserPassword> {
    let pepper = config.password_pepper.clone();
    let cost = config.password_hash;

    task::spawn_blocking(move || UserPassword::hash(&raw, pepper.as_deref(), &cost))
        .await
        .map_err(|e| AuthError::Internal(format!("Password hashing task failed: {e}")))?
}

pub(crate) async fn verify_password(
    stored: UserPassword,
    raw: RawPassword,
    config: &AuthConfig,
) -> AuthResult<bool> {
    let pepper = config.password_pepper.clone();

    task::spawn_blocking(move || stored.verify(&raw, pepper.as_deref()))
        .await
        .map_err(|e| AuthError::Internal(format!("Password verification task failed: {e}")))
}
