//! User Name Value Object
//!
//! Public handle chosen at registration.
//!
//! ## Invariants
//! - 3 to 20 characters after NFKC normalization and trimming
//! - No control characters
//! - Case is preserved; uniqueness is exact-match

use std::fmt;

use unicode_normalization::UnicodeNormalization;

use crate::error::{AuthError, AuthResult};

/// Minimum length for user name (in characters)
pub const USER_NAME_MIN_LENGTH: usize = 3;

/// Maximum length for user name (in characters)
pub const USER_NAME_MAX_LENGTH: usize = 20;

/// Validated user name
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct UserName(String);

impl UserName {
    pub fn new(raw: impl AsRef<str>) -> AuthResult<Self> {
        let normalized: String = raw.as_ref().nfkc().collect();
        let name = normalized.trim();

        let len = name.chars().count();
        if !(USER_NAME_MIN_LENGTH..=USER_NAME_MAX_LENGTH).contains(&len) {
            return Err(AuthError::validation(
                "username",
                format!(
                    "User name must be {}-{} characters (got {len})",
                    USER_NAME_MIN_LENGTH, USER_NAME_MAX_LENGTH
                ),
            ));
        }

        if name.chars().any(char::is_control) {
            return Err(AuthError::validation("username", "User name contains control characters"));
        }

        Ok(Self(name.to_string()))
    }

    /// Create from database value (assumed already validated)
    pub fn from_db(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for UserName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_user_names() {
        for ok in [
            "alice123",
            "bob",
            "a_b.c-d",
            "ABCDEFGHIJKLMNOPQRST",
            "bob smith",
            "алиса123",
            "ålice",
        ] {
            assert!(UserName::new(ok).is_ok(), "{ok} should be accepted");
        }
    }

    #[test]
    fn test_length_bounds() {
        assert!(UserName::new("ab").is_err());
        assert!(UserName::new("a".repeat(21)).is_err());
        assert!(UserName::new("a".repeat(20)).is_ok());
        // Counted in characters, not bytes
        assert!(UserName::new("я".repeat(20)).is_ok());
        assert!(UserName::new("я".repeat(21)).is_err());
    }

    #[test]
    fn test_control_characters() {
        for bad in ["ali\u{0}ce", "al\nice", "alice\u{7f}"] {
            let err = UserName::new(bad).unwrap_err();
            assert!(
                matches!(err, AuthError::Validation { field: "username", .. }),
                "{bad} should be rejected"
            );
        }
    }

    #[test]
    fn test_trim_and_nfkc() {
        // Fullwidth digits normalize to ASCII
        let name = UserName::new("  alice１２３ ").unwrap();
        assert_eq!(name.as_str(), "alice123");
    }
}
