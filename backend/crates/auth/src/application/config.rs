//! Application Configuration
//!
//! Configuration for the Auth application layer.

use std::time::Duration;

use platform::cookie::CookieConfig;
use platform::password::PasswordHashConfig;
use platform::rate_limit::AttemptLimit;
use platform::retry::RetryPolicy;

/// Re-export SameSite from platform
pub use platform::cookie::SameSite;

/// Auth application configuration
#[derive(Debug, Clone)]
pub struct AuthConfig {
    /// Session cookie name
    pub session_cookie_name: String,
    /// Session lifetime from login/registration
    pub session_ttl: Duration,
    /// Whether to require Secure cookie
    pub cookie_secure: bool,
    /// SameSite policy
    pub cookie_same_site: SameSite,
    /// Failed logins tolerated per window
    pub attempt_limit: AttemptLimit,
    /// Argon2id cost for new hashes
    pub password_hash: PasswordHashConfig,
    /// Password pepper (optional, application-wide secret)
    pub password_pepper: Option<Vec<u8>>,
    /// Timeout and retry settings for every store call
    pub store_policy: RetryPolicy,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            session_cookie_name: "session_id".to_string(),
            session_ttl: Duration::from_secs(30 * 60), // 30 minutes
            cookie_secure: true,
            cookie_same_site: SameSite::Lax,
            attempt_limit: AttemptLimit::default(),
            password_hash: PasswordHashConfig::default(),
            password_pepper: None,
            store_policy: RetryPolicy::default(),
        }
    }
}

impl AuthConfig {
    /// Create config for development (insecure cookie)
    pub fn development() -> Self {
        Self {
            cookie_secure: false,
            ..Default::default()
        }
    }

    /// Get password pepper as slice
    pub fn pepper(&self) -> Option<&[u8]> {
        self.password_pepper.as_deref()
    }

    /// Cookie attributes for the session cookie
    pub fn session_cookie(&self) -> CookieConfig {
        CookieConfig {
            name: self.session_cookie_name.clone(),
            secure: self.cookie_secure,
            same_site: self.cookie_same_site,
            path: "/".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = AuthConfig::default();
        assert_eq!(config.session_cookie_name, "session_id");
        assert_eq!(config.session_ttl, Duration::from_secs(30 * 60));
        assert_eq!(config.attempt_limit.max_attempts, 5);
        assert!(config.cookie_secure);
        assert!(config.pepper().is_none());
    }

    #[test]
    fn test_development_cookie() {
        let cookie = AuthConfig::development().session_cookie();
        assert_eq!(cookie.name, "session_id");
        assert!(!cookie.secure);
        assert_eq!(cookie.same_site, SameSite::Lax);
    }
}
