//! Auth Error Types
//!
//! This module provides auth-specific error variants that integrate
//! with the unified `kernel::error::AppError` system.
//!
//! Store failures keep their source and the operation they happened in;
//! neither ever reaches a response body.

use axum::response::{IntoResponse, Response};
use kernel::error::{
    app_error::AppError,
    conversions::{classify_redis, classify_sqlx},
    kind::ErrorKind,
};
use platform::retry::{Retryable, TimedOut};
use thiserror::Error;

/// Auth-specific result type alias
pub type AuthResult<T> = Result<T, AuthError>;

/// Auth-specific error variants
#[derive(Debug, Error)]
pub enum AuthError {
    /// Input failed a field constraint
    #[error("{message}")]
    Validation {
        field: &'static str,
        message: String,
    },

    /// Email already registered
    #[error("Email is already registered")]
    EmailTaken,

    /// User name already exists
    #[error("User name is already taken")]
    UserNameTaken,

    /// User not found
    #[error("User not found")]
    UserNotFound,

    /// Unknown email, wrong password or wrong role. Callers cannot tell which.
    #[error("Invalid credentials")]
    InvalidCredentials,

    /// Login attempt limit reached for the current window
    #[error("Too many login attempts, try again later")]
    TooManyAttempts,

    /// Session absent or expired
    #[error("Session not found or expired")]
    SessionNotFound,

    /// Missing, malformed or unknown session token
    #[error("Unauthorized")]
    Unauthorized,

    /// Credential store failure
    #[error("Database error in {context}: {source}")]
    Database {
        context: &'static str,
        #[source]
        source: sqlx::Error,
    },

    /// Session store / attempt counter failure
    #[error("Cache error in {context}: {source}")]
    Cache {
        context: &'static str,
        #[source]
        source: redis::RedisError,
    },

    /// A store call exceeded its timeout
    #[error(transparent)]
    Timeout(#[from] TimedOut),

    /// Internal error
    #[error("Internal error: {0}")]
    Internal(String),
}

impl AuthError {
    pub(crate) fn validation(field: &'static str, message: impl Into<String>) -> Self {
        AuthError::Validation {
            field,
            message: message.into(),
        }
    }

    /// Wrap a database error with the operation it happened in
    pub(crate) fn db(context: &'static str) -> impl FnOnce(sqlx::Error) -> Self {
        move |source| AuthError::Database { context, source }
    }

    /// Wrap a cache error with the operation it happened in
    pub(crate) fn cache(context: &'static str) -> impl FnOnce(redis::RedisError) -> Self {
        move |source| AuthError::Cache { context, source }
    }

    /// Get the ErrorKind for this error
    pub fn kind(&self) -> ErrorKind {
        match self {
            AuthError::Validation { .. } => ErrorKind::BadRequest,
            AuthError::EmailTaken | AuthError::UserNameTaken => ErrorKind::Conflict,
            AuthError::UserNotFound => ErrorKind::NotFound,
            AuthError::InvalidCredentials
            | AuthError::SessionNotFound
            | AuthError::Unauthorized => ErrorKind::Unauthorized,
            AuthError::TooManyAttempts => ErrorKind::TooManyRequests,
            AuthError::Database { source, .. } => store_kind(classify_sqlx(source).0),
            AuthError::Cache { source, .. } => store_kind(classify_redis(source).0),
            AuthError::Timeout(_) => ErrorKind::ServiceUnavailable,
            AuthError::Internal(_) => ErrorKind::InternalServerError,
        }
    }

    /// Get the HTTP status code for this error
    pub fn status_code(&self) -> u16 {
        self.kind().status_code()
    }

    /// Timeouts and dropped or refused store connections
    pub fn is_transient(&self) -> bool {
        match self {
            AuthError::Database { .. } | AuthError::Cache { .. } | AuthError::Timeout(_) => {
                self.kind() == ErrorKind::ServiceUnavailable
            }
            _ => false,
        }
    }

    /// Log the error with appropriate level
    fn log(&self) {
        match self {
            AuthError::Database { context, source } => {
                tracing::error!(operation = context, error = %source, "Auth database error");
            }
            AuthError::Cache { context, source } => {
                tracing::error!(operation = context, error = %source, "Auth cache error");
            }
            AuthError::Timeout(err) => {
                tracing::error!(operation = err.operation, "Auth store timeout");
            }
            AuthError::Internal(msg) => {
                tracing::error!(message = %msg, "Auth internal error");
            }
            AuthError::InvalidCredentials => {
                tracing::warn!("Invalid login attempt");
            }
            AuthError::TooManyAttempts => {
                tracing::warn!("Login attempt while rate limited");
            }
            _ => {
                tracing::debug!(error = %self, "Auth error");
            }
        }
    }
}

// A unique violation never reaches here as a store error; anything the
// store reports that is not an outage is an internal failure.
fn store_kind(kind: ErrorKind) -> ErrorKind {
    match kind {
        ErrorKind::ServiceUnavailable => ErrorKind::ServiceUnavailable,
        _ => ErrorKind::InternalServerError,
    }
}

impl Retryable for AuthError {
    fn is_transient(&self) -> bool {
        AuthError::is_transient(self)
    }
}

impl From<AuthError> for AppError {
    fn from(err: AuthError) -> Self {
        let kind = err.kind();
        match err {
            AuthError::Validation { field, message } => {
                AppError::bad_request(message).with_field(field)
            }
            AuthError::Database { source, .. } => {
                let message = match kind {
                    ErrorKind::ServiceUnavailable => classify_sqlx(&source).1,
                    _ => "Database error",
                };
                AppError::new(kind, message).with_source(source)
            }
            AuthError::Cache { source, .. } => {
                let message = classify_redis(&source).1;
                AppError::new(kind, message).with_source(source)
            }
            AuthError::Timeout(source) => {
                AppError::service_unavailable("Store temporarily unavailable").with_source(source)
            }
            AuthError::Internal(_) => AppError::internal("Internal server error"),
            other => AppError::new(kind, other.to_string()),
        }
    }
}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        self.log();
        AppError::from(self).into_response()
    }
}
