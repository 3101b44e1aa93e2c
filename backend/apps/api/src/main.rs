//! API Server Entry Point
//!
//! Application entry point and server initialization.
//! Uses `anyhow` for startup errors, but application-level
//! errors should use `kernel::error::AppError`.

mod config;

use std::net::SocketAddr;
use std::sync::Arc;

use auth::{PgUserRepository, RedisAttemptRepository, RedisSessionRepository, auth_router};
use axum::{
    Router, http,
    http::{Method, header},
    middleware,
};
use sqlx::postgres::PgPoolOptions;
use tokio::net::TcpListener;
use tower_http::cors::{AllowHeaders, AllowMethods, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::config::ServerConfig;

// Re-export unified error types for use in handlers
pub use kernel::error::{
    app_error::{AppError, AppResult},
    kind::ErrorKind,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env file
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "api=info,auth=info,platform=info,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = ServerConfig::from_env()?;

    // Credential store
    let pool = PgPoolOptions::new()
        .max_connections(5)
        .connect(&config.database_url)
        .await?;

    tracing::info!("Connected to database");

    sqlx::migrate!("../../../database/migrations")
        .run(&pool)
        .await?;

    tracing::info!("Migrations completed");

    // Session store and attempt counter
    let redis = redis::Client::open(config.redis_url.as_str())?
        .get_connection_manager()
        .await?;

    tracing::info!("Connected to session store");

    let auth_config = config.auth;
    let policy = auth_config.store_policy;
    let users = Arc::new(PgUserRepository::new(pool, policy));
    let sessions = Arc::new(RedisSessionRepository::new(redis.clone(), policy));
    let attempts = Arc::new(RedisAttemptRepository::new(
        redis,
        &auth_config.attempt_limit,
        policy,
    ));

    tracing::info!(
        session_ttl_secs = auth_config.session_ttl.as_secs(),
        max_attempts = auth_config.attempt_limit.max_attempts,
        attempt_window_secs = auth_config.attempt_limit.window.as_secs(),
        cookie_secure = auth_config.cookie_secure,
        "Auth configured"
    );

    // CORS configuration
    let allowed_origins: Vec<http::HeaderValue> = config
        .frontend_origins
        .iter()
        .filter_map(|origin| origin.parse().ok())
        .collect();

    let cors = CorsLayer::new()
        .allow_origin(allowed_origins)
        .allow_methods(AllowMethods::list([
            Method::GET,
            Method::POST,
            Method::OPTIONS,
        ]))
        .allow_headers(AllowHeaders::list([header::CONTENT_TYPE, header::ACCEPT]))
        .allow_credentials(true);

    // Build router. `log_request` sits inside the trace layer so its span is
    // the one the auth middleware records the caller into.
    let app = Router::new()
        .nest(
            "/api/v1/auth",
            auth_router(users, sessions, attempts, auth_config),
        )
        .layer(middleware::from_fn(platform::request_log::log_request))
        .layer(TraceLayer::new_for_http())
        .layer(cors);

    // Start server
    tracing::info!("Listening on {}", config.bind_addr);

    let listener = TcpListener::bind(config.bind_addr).await?;
    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .await?;

    Ok(())
}
