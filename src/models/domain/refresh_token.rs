use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

/// Server-side record of an issued refresh token. Only the SHA-256 digest of
/// the token is stored; the raw token lives exclusively with the client.
#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct RefreshToken {
    pub user_id: String,
    pub token_hash: String,
    pub expires_at: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
    pub revoked: bool,
}

impl RefreshToken {
    /// Record an issued raw token for `user_id`, valid for `ttl_hours`.
    pub fn issue(user_id: &str, raw_token: &str, ttl_hours: i64) -> Self {
        Self {
            user_id: user_id.to_string(),
            token_hash: hash_token(raw_token),
            expires_at: Utc::now() + Duration::hours(ttl_hours),
            created_at: Utc::now(),
            revoked: false,
        }
    }

    pub fn is_valid(&self) -> bool {
        !self.revoked && self.expires_at > Utc::now()
    }
}

pub fn hash_token(token: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(token.as_bytes());
    format!("{:x}", hasher.finalize())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn issued_token_is_valid_until_expiry() {
        let token = RefreshToken::issue("user-1", "raw-token", 168);

        assert_eq!(token.user_id, "user-1");
        assert!(!token.revoked);
        assert!(token.is_valid());
        assert_eq!(token.token_hash, hash_token("raw-token"));
    }

    #[test]
    fn expired_token_is_invalid() {
        let token = RefreshToken::issue("user-1", "raw-token", -1);
        assert!(!token.is_valid());
    }

    #[test]
    fn revoked_token_is_invalid() {
        let mut token = RefreshToken::issue("user-1", "raw-token", 168);
        token.revoked = true;
        assert!(!token.is_valid());
    }

    #[test]
    fn hashes_are_stable_and_distinct() {
        assert_eq!(hash_token("a"), hash_token("a"));
        assert_ne!(hash_token("a"), hash_token("b"));
        assert_eq!(hash_token("a").len(), 64);
    }
}
