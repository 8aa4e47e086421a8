use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
pub struct User {
    pub id: String,
    pub username: String,
    pub email: String,
    pub password_hash: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
}

impl User {
    pub fn new(username: &str, email: &str, password_hash: &str) -> Self {
        User {
            id: Uuid::new_v4().to_string(),
            username: username.to_string(),
            email: email.to_string(),
            password_hash: password_hash.to_string(),
            created_at: Some(Utc::now()),
        }
    }
}

#[cfg(test)]
impl User {
    pub fn test_user(username: &str) -> Self {
        User::new(
            username,
            &format!("{}@example.com", username),
            "$argon2id$test-hash",
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_creation() {
        let user = User::new("johndoe", "john@example.com", "hash");

        assert_eq!(user.username, "johndoe");
        assert_eq!(user.email, "john@example.com");
        assert!(!user.id.is_empty());
        assert!(user.created_at.is_some());
    }

    #[test]
    fn test_users_get_distinct_ids() {
        let a = User::test_user("a");
        let b = User::test_user("b");

        assert_ne!(a.id, b.id);
    }
}
