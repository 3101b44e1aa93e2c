use std::fmt;

use crate::error::{AuthError, AuthResult};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(i16)]
pub enum UserRole {
    Standard = 1,
    Advertiser = 2,
}

impl UserRole {
    #[inline]
    pub const fn id(&self) -> i16 {
        *self as i16
    }

    #[inline]
    pub const fn code(&self) -> &'static str {
        match self {
            UserRole::Standard => "standard",
            UserRole::Advertiser => "advertiser",
        }
    }

    #[inline]
    pub const fn from_id(id: i16) -> Option<Self> {
        match id {
            1 => Some(UserRole::Standard),
            2 => Some(UserRole::Advertiser),
            _ => None,
        }
    }

    /// Parse a role id supplied by a client
    pub fn parse(id: i16) -> AuthResult<Self> {
        Self::from_id(id).ok_or_else(|| {
            AuthError::validation("role", format!("Unknown role {id}, expected 1 or 2"))
        })
    }
}

impl fmt::Display for UserRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_role_from_id() {
        assert_eq!(UserRole::from_id(1), Some(UserRole::Standard));
        assert_eq!(UserRole::from_id(2), Some(UserRole::Advertiser));
        assert_eq!(UserRole::from_id(0), None);
        assert_eq!(UserRole::from_id(3), None);
    }

    #[test]
    fn test_user_role_id_roundtrip() {
        for role in [UserRole::Standard, UserRole::Advertiser] {
            assert_eq!(UserRole::from_id(role.id()), Some(role));
        }
    }

    #[test]
    fn test_parse_rejects_unknown() {
        assert!(UserRole::parse(7).is_err());
        assert_eq!(UserRole::parse(2).unwrap(), UserRole::Advertiser);
    }

    #[test]
    fn test_user_role_display() {
        assert_eq!(UserRole::Standard.to_string(), "standard");
        assert_eq!(UserRole::Advertiser.to_string(), "advertiser");
    }
}
