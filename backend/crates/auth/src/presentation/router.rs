//! Auth Router

use axum::{
    Router, middleware,
    routing::{get, post},
};
use std::sync::Arc;

use crate::application::config::AuthConfig;
use crate::domain::repository::{AttemptRepository, AuthSessionRepository, UserRepository};
use crate::presentation::handlers::{self, AuthAppState};
use crate::presentation::middleware::{AuthMiddlewareState, require_auth};

/// Create the Auth router over any store implementations.
///
/// `/logout` and `/me` sit behind [`require_auth`].
pub fn auth_router<U, S, A>(
    users: Arc<U>,
    sessions: Arc<S>,
    attempts: Arc<A>,
    config: AuthConfig,
) -> Router
where
    U: UserRepository + Sync + 'static,
    S: AuthSessionRepository + Sync + 'static,
    A: AttemptRepository + Sync + 'static,
{
    let guard = AuthMiddlewareState::new(sessions.clone(), &config);
    let state = AuthAppState {
        users,
        sessions,
        attempts,
        config: Arc::new(config),
    };

    let protected = Router::new()
        .route("/logout", post(handlers::sign_out::<U, S, A>))
        .route("/me", get(handlers::me::<U, S, A>))
        .route_layer(middleware::from_fn_with_state(guard, require_auth::<S>));

    Router::new()
        .route("/signup", post(handlers::sign_up::<U, S, A>))
        .route("/login", post(handlers::sign_in::<U, S, A>))
        .merge(protected)
        .with_state(state)
}
