//! Auth Middleware
//!
//! Guards protected routes: session cookie in, [`Identity`] out.
//!
//! The identity is attached to the request extensions and written into the
//! enclosing `request` span (see `platform::request_log`) before the inner
//! handler runs, so request logging reads it only after attachment.

use std::sync::Arc;

use axum::extract::{FromRequestParts, Request, State};
use axum::http::request::Parts;
use axum::middleware::Next;
use axum::response::Response;

use crate::application::config::AuthConfig;
use crate::application::{Authenticator, Identity};
use crate::domain::repository::AuthSessionRepository;
use crate::error::AuthError;

/// Middleware state
pub struct AuthMiddlewareState<S>
where
    S: AuthSessionRepository,
{
    pub authenticator: Authenticator<S>,
    pub cookie_name: Arc<str>,
}

impl<S> AuthMiddlewareState<S>
where
    S: AuthSessionRepository,
{
    pub fn new(sessions: Arc<S>, config: &AuthConfig) -> Self {
        Self {
            authenticator: Authenticator::new(sessions),
            cookie_name: Arc::from(config.session_cookie_name.as_str()),
        }
    }
}

impl<S> Clone for AuthMiddlewareState<S>
where
    S: AuthSessionRepository,
{
    fn clone(&self) -> Self {
        Self {
            authenticator: self.authenticator.clone(),
            cookie_name: self.cookie_name.clone(),
        }
    }
}

/// Middleware that requires a valid auth session
///
/// Missing or empty cookie is rejected without a store lookup. Any failed
/// lookup is `401`; only an unavailable store yields `5xx`.
pub async fn require_auth<S>(
    State(state): State<AuthMiddlewareState<S>>,
    mut req: Request,
    next: Next,
) -> Result<Response, AuthError>
where
    S: AuthSessionRepository + Sync + 'static,
{
    let token = platform::cookie::extract_cookie(req.headers(), &state.cookie_name)
        .filter(|token| !token.is_empty())
        .ok_or(AuthError::Unauthorized)?;

    let identity = state.authenticator.authenticate(&token).await?;

    req.extensions_mut().insert(identity);
    let span = tracing::Span::current();
    span.record("user_id", identity.user_id.as_i64());
    span.record("role", identity.user_role.code());

    Ok(next.run(req).await)
}

/// Identity of the authenticated caller.
///
/// Only available behind [`require_auth`]; elsewhere it rejects with `401`.
#[derive(Debug, Clone, Copy)]
pub struct CurrentUser(pub Identity);

impl<St> FromRequestParts<St> for CurrentUser
where
    St: Send + Sync,
{
    type Rejection = AuthError;

    async fn from_request_parts(parts: &mut Parts, _state: &St) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<Identity>()
            .copied()
            .map(CurrentUser)
            .ok_or(AuthError::Unauthorized)
    }
}
