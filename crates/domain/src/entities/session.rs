//! Session and credential entities for the auth boundary

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::value_objects::UserId;

/// Authenticated context passed explicitly to workflows that act for a user
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Session {
    pub token: String,
    pub user_id: UserId,
    pub email: String,
    pub issued_at: DateTime<Utc>,
}

/// Stored login secret. The password itself is never kept.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Credential {
    pub user_id: UserId,
    pub email: String,
    pub salt: String,
    /// Hex PBKDF2-HMAC-SHA256 output
    pub password_hash: String,
    /// PBKDF2 rounds the hash was derived with
    pub iterations: u32,
    /// Consecutive failed sign-ins since the last success or lock
    pub failed_attempts: u32,
    pub locked_until: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}

impl Credential {
    pub fn is_locked_at(&self, now: DateTime<Utc>) -> bool {
        self.locked_until.is_some_and(|until| now < until)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    #[test]
    fn test_lock_window() {
        let now = Utc::now();
        let mut credential = Credential {
            user_id: UserId::generate(),
            email: "awa@example.ci".to_string(),
            salt: "salt".to_string(),
            password_hash: String::new(),
            iterations: 1,
            failed_attempts: 0,
            locked_until: None,
            created_at: now,
        };
        assert!(!credential.is_locked_at(now));

        credential.locked_until = Some(now + Duration::minutes(15));
        assert!(credential.is_locked_at(now));
        assert!(!credential.is_locked_at(now + Duration::minutes(15)));
    }
}
