//! Subscription status for a user account.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Subscription lifecycle state of a user.
///
/// Starts at `Pending` on signup and transitions to `Active` exactly once
/// when a payment is first confirmed. There is no transition back: the
/// reconciler's activation is monotonic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SubscriptionStatus {
    /// No confirmed payment yet.
    Pending,
    /// A payment was confirmed; finance features are unlocked.
    Active,
}

impl SubscriptionStatus {
    /// Whether this status unlocks subscription-gated features.
    pub fn is_active(&self) -> bool {
        matches!(self, SubscriptionStatus::Active)
    }

    /// Storage representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            SubscriptionStatus::Pending => "pending",
            SubscriptionStatus::Active => "active",
        }
    }

    /// Parses the storage representation.
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "pending" => Some(SubscriptionStatus::Pending),
            "active" => Some(SubscriptionStatus::Active),
            _ => None,
        }
    }
}

impl fmt::Display for SubscriptionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
