//! User Password Value Object
//!
//! Domain wrappers around `platform::password`.
//! [`RawPassword`] is user input (zeroized on drop); [`UserPassword`] is the
//! Argon2id PHC string that goes into the credential store.

use platform::password::{
    ClearTextPassword, HashedPassword, PasswordHashConfig, PasswordPolicyError,
};
use std::fmt;

use crate::error::{AuthError, AuthResult};

// ============================================================================
// Raw Password (User Input)
// ============================================================================

/// Raw password from user input
pub struct RawPassword(ClearTextPassword);

impl RawPassword {
    /// Password being chosen at registration; the full policy applies
    pub fn new(raw: String) -> AuthResult<Self> {
        let clear_text = ClearTextPassword::new(raw).map_err(|e| {
            let message = match e {
                PasswordPolicyError::TooShort { min, .. } => {
                    format!("Password must be at least {min} characters")
                }
                PasswordPolicyError::TooLong { max, .. } => {
                    format!("Password must be at most {max} characters")
                }
                other => other.to_string(),
            };
            AuthError::validation("password", message)
        })?;

        Ok(Self(clear_text))
    }

    /// Password offered at login. Never rejected here so every wrong guess
    /// reaches verification and is counted.
    pub fn for_verification(raw: String) -> Self {
        Self(ClearTextPassword::for_verification(raw))
    }
}

impl fmt::Debug for RawPassword {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("RawPassword").field(&"[REDACTED]").finish()
    }
}

// ============================================================================
// User Password (Hashed, for storage)
// ============================================================================

/// Hashed user password for database storage
#[derive(Clone, PartialEq, Eq)]
pub struct UserPassword(HashedPassword);

impl UserPassword {
    /// Hash with a fresh salt
    pub fn hash(
        raw: &RawPassword,
        pepper: Option<&[u8]>,
        config: &PasswordHashConfig,
    ) -> AuthResult<Self> {
        raw.0
            .hash(pepper, config)
            .map(Self)
            .map_err(|e| AuthError::Internal(e.to_string()))
    }

    /// Load a stored PHC string
    pub fn from_db(phc: impl Into<String>) -> AuthResult<Self> {
        HashedPassword::from_phc_string(phc)
            .map(Self)
            .map_err(|_| AuthError::Internal("Stored password hash is malformed".to_string()))
    }

    pub fn as_phc_string(&self) -> &str {
        self.0.as_phc_string()
    }

    pub fn verify(&self, raw: &RawPassword, pepper: Option<&[u8]>) -> bool {
        self.0.verify(&raw.0, pepper)
    }
}

impl fmt::Debug for UserPassword {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("UserPassword").field(&"[HASH]").finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_policy_maps_to_validation() {
        let err = RawPassword::new("short".to_string()).unwrap_err();
        match err {
            AuthError::Validation { field, message } => {
                assert_eq!(field, "password");
                assert_eq!(message, "Password must be at least 8 characters");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_hash_and_verify() {
        let config = PasswordHashConfig::insecure_fast();
        let raw = RawPassword::new("longenough".to_string()).unwrap();
        let hashed = UserPassword::hash(&raw, None, &config).unwrap();

        assert!(hashed.verify(&RawPassword::for_verification("longenough".into()), None));
        assert!(!hashed.verify(&RawPassword::for_verification("wrong".into()), None));
    }

    #[test]
    fn test_from_db() {
        let config = PasswordHashConfig::insecure_fast();
        let raw = RawPassword::new("longenough".to_string()).unwrap();
        let hashed = UserPassword::hash(&raw, None, &config).unwrap();

        let loaded = UserPassword::from_db(hashed.as_phc_string()).unwrap();
        assert!(loaded.verify(&raw, None));
        assert!(matches!(
            UserPassword::from_db("plaintext"),
            Err(AuthError::Internal(_))
        ));
    }

    #[test]
    fn test_debug_redaction() {
        let raw = RawPassword::for_verification("hunter22".into());
        assert!(!format!("{raw:?}").contains("hunter22"));
    }
}
