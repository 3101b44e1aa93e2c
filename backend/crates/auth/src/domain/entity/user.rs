//! User Entity
//!
//! Identity record held by the credential store. Users are never deleted.

use chrono::{DateTime, Utc};

use crate::domain::value_object::{
    balance::Balance, email::Email, user_id::UserId, user_name::UserName,
    user_password::UserPassword, user_role::UserRole,
};

/// Stored user
#[derive(Debug, Clone)]
pub struct User {
    /// Store-assigned identifier, immutable
    pub user_id: UserId,
    pub user_name: UserName,
    pub email: Email,
    /// Argon2id hash only
    pub password: UserPassword,
    pub description: String,
    pub balance: Balance,
    pub user_role: UserRole,
    pub created_at: DateTime<Utc>,
}

/// Validated registration data, before the store assigns an ID
#[derive(Debug, Clone)]
pub struct NewUser {
    pub user_name: UserName,
    pub email: Email,
    pub password: UserPassword,
    pub user_role: UserRole,
    pub description: String,
}

impl NewUser {
    pub fn new(
        user_name: UserName,
        email: Email,
        password: UserPassword,
        user_role: UserRole,
    ) -> Self {
        Self {
            user_name,
            email,
            password,
            user_role,
            description: String::new(),
        }
    }

    /// Materialize as a stored user with the assigned ID
    pub fn into_user(self, user_id: UserId) -> User {
        User {
            user_id,
            user_name: self.user_name,
            email: self.email,
            password: self.password,
            description: self.description,
            balance: Balance::ZERO,
            user_role: self.user_role,
            created_at: Utc::now(),
        }
    }
}
