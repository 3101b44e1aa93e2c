//! Session Token Value Object
//!
//! Opaque bearer token naming a session. A UUIDv4 from the OS RNG carries
//! 122 random bits.

use std::fmt;

use uuid::Uuid;

use crate::error::{AuthError, AuthResult};

#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct SessionToken(Uuid);

impl SessionToken {
    pub fn generate() -> Self {
        Self(Uuid::new_v4())
    }

    /// Parse a client-supplied token.
    ///
    /// Empty or malformed input is `Unauthorized`; the store is never asked
    /// about a value that could not have been issued.
    pub fn parse(raw: &str) -> AuthResult<Self> {
        let raw = raw.trim();
        if raw.is_empty() {
            return Err(AuthError::Unauthorized);
        }
        Uuid::try_parse(raw)
            .map(Self)
            .map_err(|_| AuthError::Unauthorized)
    }

    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

/// Hyphenated form, as sent in the cookie
impl fmt::Display for SessionToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0.hyphenated(), f)
    }
}

impl fmt::Debug for SessionToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("SessionToken").field(&"[REDACTED]").finish()
    }
}
