//! API DTOs (Data Transfer Objects)

use serde::{Deserialize, Serialize};

use crate::domain::entity::user::User;
use crate::domain::value_object::{email::Email, user_role::UserRole};
use crate::error::{AuthError, AuthResult};

/// Shortest password a request may carry
const REQUEST_PASSWORD_MIN_LENGTH: usize = 8;

// ============================================================================
// Sign Up
// ============================================================================

/// Sign up request
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SignUpRequest {
    pub username: String,
    pub email: String,
    pub password: String,
    /// 1 standard, 2 advertiser
    pub role: i16,
}

/// Sign up response
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SignUpResponse {
    pub user_id: i64,
}

// ============================================================================
// Sign In
// ============================================================================

/// Sign in request
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SignInRequest {
    pub email: String,
    pub password: String,
    pub role: i16,
}

impl SignInRequest {
    /// Shape checks only. Whether the credentials are right is the use
    /// case's business.
    pub fn validate(&self) -> AuthResult<UserRole> {
        Email::new(self.email.as_str())?;
        if self.password.chars().count() < REQUEST_PASSWORD_MIN_LENGTH {
            return Err(AuthError::validation(
                "password",
                format!("Password must be at least {REQUEST_PASSWORD_MIN_LENGTH} characters"),
            ));
        }
        UserRole::parse(self.role)
    }
}

/// Sign in response
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SignInResponse {
    pub user_id: i64,
    pub role: i16,
}

// ============================================================================
// Sign Out
// ============================================================================

#[derive(Debug, Clone, Serialize)]
pub struct MessageResponse {
    pub message: &'static str,
}

// ============================================================================
// User Info (for authenticated users)
// ============================================================================

/// Current user info response
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CurrentUserResponse {
    pub user_id: i64,
    pub username: String,
    pub email: String,
    /// Decimal string, two places
    pub balance: String,
    pub role: i16,
    pub description: String,
}

impl From<User> for CurrentUserResponse {
    fn from(user: User) -> Self {
        Self {
            user_id: user.user_id.as_i64(),
            username: user.user_name.as_str().to_string(),
            email: user.email.as_str().to_string(),
            balance: user.balance.to_string(),
            role: user.user_role.id(),
            description: user.description,
        }
    }
}
