//! Server configuration from the environment

use std::env;
use std::net::SocketAddr;
use std::str::FromStr;
use std::time::Duration;

use anyhow::Context;
use auth::AuthConfig;
use platform::rate_limit::AttemptLimit;

pub struct ServerConfig {
    pub database_url: String,
    pub redis_url: String,
    pub bind_addr: SocketAddr,
    pub frontend_origins: Vec<String>,
    pub auth: AuthConfig,
}

impl ServerConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        let database_url = env::var("DATABASE_URL").context("DATABASE_URL must be set")?;
        let redis_url =
            env::var("REDIS_URL").unwrap_or_else(|_| "redis://127.0.0.1:6379".to_string());

        let bind_addr = parse_or("BIND_ADDR", SocketAddr::from(([0, 0, 0, 0], 8020)))?;

        let frontend_origins = env::var("FRONTEND_ORIGINS")
            .unwrap_or_else(|_| "http://localhost:40922,http://127.0.0.1:40922".to_string())
            .split(',')
            .map(|origin| origin.trim().to_string())
            .filter(|origin| !origin.is_empty())
            .collect();

        // Debug builds default to plain-HTTP cookies
        let base = if cfg!(debug_assertions) {
            AuthConfig::development()
        } else {
            AuthConfig::default()
        };

        let session_ttl_secs = parse_or("SESSION_TTL_SECS", base.session_ttl.as_secs())?;
        let max_attempts = parse_or("MAX_LOGIN_ATTEMPTS", base.attempt_limit.max_attempts)?;
        let window_secs = parse_or("ATTEMPT_WINDOW_SECS", base.attempt_limit.window.as_secs())?;
        let cookie_secure = parse_or("COOKIE_SECURE", base.cookie_secure)?;
        let password_pepper = env::var("PASSWORD_PEPPER")
            .ok()
            .filter(|p| !p.is_empty())
            .map(String::into_bytes);

        anyhow::ensure!(session_ttl_secs > 0, "SESSION_TTL_SECS must be positive");
        anyhow::ensure!(max_attempts > 0, "MAX_LOGIN_ATTEMPTS must be positive");
        anyhow::ensure!(window_secs > 0, "ATTEMPT_WINDOW_SECS must be positive");

        Ok(Self {
            database_url,
            redis_url,
            bind_addr,
            frontend_origins,
            auth: AuthConfig {
                session_ttl: Duration::from_secs(session_ttl_secs),
                cookie_secure,
                attempt_limit: AttemptLimit::new(max_attempts, window_secs),
                password_pepper,
                ..base
            },
        })
    }
}

fn parse_or<T>(key: &str, default: T) -> anyhow::Result<T>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match env::var(key) {
        Ok(raw) => raw
            .trim()
            .parse()
            .with_context(|| format!("{key} has an invalid value: {raw}")),
        Err(_) => Ok(default),
    }
}
