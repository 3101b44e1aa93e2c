use kernel::id::Id;

pub struct UserMarker;

/// Database-assigned user identifier
pub type UserId = Id<UserMarker>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_id_roundtrip() {
        let user_id = UserId::from_i64(42);
        assert_eq!(user_id.as_i64(), 42);
        assert!(user_id.is_assigned());
        assert_eq!(user_id.to_string(), "42");
    }

    #[test]
    fn test_unassigned_user_id() {
        assert!(!UserId::from_i64(0).is_assigned());
    }
}
