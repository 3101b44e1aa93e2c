//! Cookie Management Infrastructure
//!
//! Builds the session `Set-Cookie` values and reads cookies back out of
//! request headers.

use chrono::{DateTime, Utc};
use http::{HeaderMap, header};

/// IMF-fixdate as required for the `Expires` attribute (RFC 9110 §5.6.7)
const HTTP_DATE_FORMAT: &str = "%a, %d %b %Y %H:%M:%S GMT";

/// SameSite policy for cookies
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SameSite {
    Strict,
    #[default]
    Lax,
    None,
}

impl SameSite {
    pub fn as_str(&self) -> &'static str {
        match self {
            SameSite::Strict => "Strict",
            SameSite::Lax => "Lax",
            SameSite::None => "None",
        }
    }
}

/// Attributes shared by the set and clear variants of a cookie
#[derive(Debug, Clone)]
pub struct CookieConfig {
    pub name: String,
    pub secure: bool,
    pub same_site: SameSite,
    pub path: String,
}

impl Default for CookieConfig {
    fn default() -> Self {
        Self {
            name: "session_id".to_string(),
            secure: false,
            same_site: SameSite::Lax,
            path: "/".to_string(),
        }
    }
}

impl CookieConfig {
    /// `Set-Cookie` value carrying `value` until the absolute time `expires_at`
    pub fn build_set_cookie(&self, value: &str, expires_at: DateTime<Utc>) -> String {
        let mut cookie = format!(
            "{}={}; HttpOnly; SameSite={}; Path={}; Expires={}",
            self.name,
            value,
            self.same_site.as_str(),
            self.path,
            http_date(expires_at),
        );
        if self.secure {
            cookie.push_str("; Secure");
        }
        cookie
    }

    /// `Set-Cookie` value that makes the browser drop the cookie
    pub fn build_clear_cookie(&self) -> String {
        let mut cookie = format!(
            "{}=; HttpOnly; SameSite={}; Path={}; Max-Age=-1; Expires={}",
            self.name,
            self.same_site.as_str(),
            self.path,
            http_date(DateTime::<Utc>::UNIX_EPOCH),
        );
        if self.secure {
            cookie.push_str("; Secure");
        }
        cookie
    }
}

fn http_date(at: DateTime<Utc>) -> String {
    at.format(HTTP_DATE_FORMAT).to_string()
}

/// Extract a cookie value from headers
///
/// Every `Cookie` header is scanned; the first pair named `name` wins.
pub fn extract_cookie(headers: &HeaderMap, name: &str) -> Option<String> {
    headers
        .get_all(header::COOKIE)
        .iter()
        .filter_map(|v| v.to_str().ok())
        .flat_map(|v| v.split(';'))
        .find_map(|cookie| {
            let (key, value) = cookie.trim().split_once('=')?;
            (key == name).then(|| value.to_string())
        })
}
