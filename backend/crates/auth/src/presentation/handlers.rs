//! HTTP Handlers

use axum::Json;
use axum::extract::State;
use axum::http::{HeaderMap, StatusCode, header};
use axum::response::IntoResponse;
use std::sync::Arc;

use crate::application::config::AuthConfig;
use crate::application::{
    GetCurrentUserUseCase, SignInInput, SignInUseCase, SignOutUseCase, SignUpInput, SignUpUseCase,
};
use crate::domain::entity::auth_session::AuthSession;
use crate::domain::repository::{AttemptRepository, AuthSessionRepository, UserRepository};
use crate::error::AuthResult;
use crate::presentation::dto::{
    CurrentUserResponse, MessageResponse, SignInRequest, SignInResponse, SignUpRequest,
    SignUpResponse,
};
use crate::presentation::middleware::CurrentUser;

/// Shared state for auth handlers
pub struct AuthAppState<U, S, A> {
    pub users: Arc<U>,
    pub sessions: Arc<S>,
    pub attempts: Arc<A>,
    pub config: Arc<AuthConfig>,
}

impl<U, S, A> Clone for AuthAppState<U, S, A> {
    fn clone(&self) -> Self {
        Self {
            users: self.users.clone(),
            sessions: self.sessions.clone(),
            attempts: self.attempts.clone(),
            config: self.config.clone(),
        }
    }
}

// ============================================================================
// Sign Up
// ============================================================================

/// POST /api/v1/auth/signup
pub async fn sign_up<U, S, A>(
    State(state): State<AuthAppState<U, S, A>>,
    Json(req): Json<SignUpRequest>,
) -> AuthResult<impl IntoResponse>
where
    U: UserRepository + Sync + 'static,
    S: AuthSessionRepository + Sync + 'static,
    A: AttemptRepository + Sync + 'static,
{
    let use_case = SignUpUseCase::new(
        state.users.clone(),
        state.sessions.clone(),
        state.config.clone(),
    );

    let output = use_case
        .execute(SignUpInput {
            user_name: req.username,
            email: req.email,
            password: req.password,
            role: req.role,
        })
        .await?;

    let cookie = build_session_cookie(&state.config, &output.session);

    Ok((
        StatusCode::CREATED,
        [(header::SET_COOKIE, cookie)],
        Json(SignUpResponse {
            user_id: output.user_id.as_i64(),
        }),
    ))
}

// ============================================================================
// Sign In
// ============================================================================

/// POST /api/v1/auth/login
pub async fn sign_in<U, S, A>(
    State(state): State<AuthAppState<U, S, A>>,
    Json(req): Json<SignInRequest>,
) -> AuthResult<impl IntoResponse>
where
    U: UserRepository + Sync + 'static,
    S: AuthSessionRepository + Sync + 'static,
    A: AttemptRepository + Sync + 'static,
{
    let role = req.validate()?;

    let use_case = SignInUseCase::new(
        state.users.clone(),
        state.sessions.clone(),
        state.attempts.clone(),
        state.config.clone(),
    );

    let output = use_case
        .execute(SignInInput {
            email: req.email,
            password: req.password,
            role,
        })
        .await?;

    let cookie = build_session_cookie(&state.config, &output.session);

    Ok((
        StatusCode::OK,
        [(header::SET_COOKIE, cookie)],
        Json(SignInResponse {
            user_id: output.user_id.as_i64(),
            role: output.session.user_role.id(),
        }),
    ))
}

// ============================================================================
// Sign Out (requires authentication)
// ============================================================================

/// POST /api/v1/auth/logout
pub async fn sign_out<U, S, A>(
    State(state): State<AuthAppState<U, S, A>>,
    headers: HeaderMap,
) -> AuthResult<impl IntoResponse>
where
    U: UserRepository + Sync + 'static,
    S: AuthSessionRepository + Sync + 'static,
    A: AttemptRepository + Sync + 'static,
{
    // The middleware already checked the cookie is present
    let cookie_name = &state.config.session_cookie_name;
    if let Some(token) = platform::cookie::extract_cookie(&headers, cookie_name) {
        SignOutUseCase::new(state.sessions.clone())
            .execute(&token)
            .await?;
    }

    let cookie = state.config.session_cookie().build_clear_cookie();

    Ok((
        StatusCode::OK,
        [(header::SET_COOKIE, cookie)],
        Json(MessageResponse {
            message: "Signed out",
        }),
    ))
}

// ============================================================================
// Current User (requires authentication)
// ============================================================================

/// GET /api/v1/auth/me
pub async fn me<U, S, A>(
    State(state): State<AuthAppState<U, S, A>>,
    CurrentUser(identity): CurrentUser,
) -> AuthResult<Json<CurrentUserResponse>>
where
    U: UserRepository + Sync + 'static,
    S: AuthSessionRepository + Sync + 'static,
    A: AttemptRepository + Sync + 'static,
{
    let user = GetCurrentUserUseCase::new(state.users.clone())
        .execute(identity.user_id)
        .await?;

    Ok(Json(CurrentUserResponse::from(user)))
}

// ============================================================================
// Helper Functions
// ============================================================================

fn build_session_cookie(config: &AuthConfig, session: &AuthSession) -> String {
    config
        .session_cookie()
        .build_set_cookie(&session.token.to_string(), session.expires_at())
}
