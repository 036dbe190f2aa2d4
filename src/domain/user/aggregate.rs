//! User aggregate.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::{Timestamp, UserId};

use super::SubscriptionStatus;

/// A registered user account.
///
/// Owned exclusively by the user repository. Mutated only on signup
/// (creation), by payment reconciliation (subscription flip) and by the
/// setup endpoint (`setup_completed`).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub id: UserId,
    /// Canonical key, matched case-sensitively.
    pub email: String,
    /// Argon2 hash, never the plaintext password.
    #[serde(skip_serializing)]
    pub password_hash: String,
    pub subscription_status: SubscriptionStatus,
    pub setup_completed: bool,
    pub created_at: Timestamp,
}

impl User {
    /// Creates a new account with a pending subscription.
    pub fn new(email: impl Into<String>, password_hash: impl Into<String>) -> Self {
        Self {
            id: UserId::new(),
            email: email.into(),
            password_hash: password_hash.into(),
            subscription_status: SubscriptionStatus::Pending,
            setup_completed: false,
            created_at: Timestamp::now(),
        }
    }

    /// Whether subscription-gated features are unlocked.
    pub fn has_active_subscription(&self) -> bool {
        self.subscription_status.is_active()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_user_starts_pending_without_setup() {
        let user = User::new("a@x.com", "hash");
        assert_eq!(user.subscription_status, SubscriptionStatus::Pending);
        assert!(!user.setup_completed);
        assert!(!user.has_active_subscription());
    }

    #[test]
    fn password_hash_is_not_serialized() {
        let user = User::new("a@x.com", "secret-hash");
        let json = serde_json::to_string(&user).unwrap();
        assert!(!json.contains("secret-hash"));
    }
}
