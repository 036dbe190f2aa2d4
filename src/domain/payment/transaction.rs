//! Payment transaction aggregate.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::domain::foundation::{Timestamp, TransactionId, UserId};

/// Provider-reported payment state of a checkout session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PaymentStatus {
    /// Payment not yet collected.
    Pending,
    /// Payment confirmed by the provider. Terminal for the invariant:
    /// no downstream write may set a paid transaction back to pending.
    Paid,
    /// Payment failed.
    Failed,
}

impl PaymentStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            PaymentStatus::Pending => "pending",
            PaymentStatus::Paid => "paid",
            PaymentStatus::Failed => "failed",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "pending" => Some(PaymentStatus::Pending),
            "paid" => Some(PaymentStatus::Paid),
            "failed" => Some(PaymentStatus::Failed),
            _ => None,
        }
    }
}

impl fmt::Display for PaymentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Lifecycle of the checkout session itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CheckoutStatus {
    /// Session created, customer not yet seen by the provider.
    Initiated,
    /// Session open at the provider.
    Pending,
    /// Session finished.
    Completed,
}

impl CheckoutStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            CheckoutStatus::Initiated => "initiated",
            CheckoutStatus::Pending => "pending",
            CheckoutStatus::Completed => "completed",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "initiated" => Some(CheckoutStatus::Initiated),
            "pending" => Some(CheckoutStatus::Pending),
            "completed" => Some(CheckoutStatus::Completed),
            _ => None,
        }
    }
}

impl fmt::Display for CheckoutStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Snapshot of the checkout context, frozen at session creation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransactionMetadata {
    pub user_id: UserId,
    pub package_id: String,
    pub email: String,
}

/// A payment transaction tied to one provider checkout session.
///
/// Created only by checkout-session creation, mutated only by the
/// reconciler, never deleted. At most one transaction per `session_id`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PaymentTransaction {
    pub id: TransactionId,
    pub user_id: UserId,
    /// Provider-issued session id - the reconciliation join key.
    pub session_id: String,
    /// Amount in minor units (cents), always from the price table.
    pub amount_cents: i64,
    pub currency: String,
    pub package_id: String,
    pub payment_status: PaymentStatus,
    pub status: CheckoutStatus,
    pub metadata: TransactionMetadata,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl PaymentTransaction {
    /// Records a freshly created checkout session as pending.
    pub fn initiated(
        user_id: UserId,
        email: impl Into<String>,
        session_id: impl Into<String>,
        package_id: impl Into<String>,
        amount_cents: i64,
        currency: impl Into<String>,
    ) -> Self {
        let package_id = package_id.into();
        let now = Timestamp::now();
        Self {
            id: TransactionId::new(),
            user_id,
            session_id: session_id.into(),
            amount_cents,
            currency: currency.into(),
            package_id: package_id.clone(),
            payment_status: PaymentStatus::Pending,
            status: CheckoutStatus::Initiated,
            metadata: TransactionMetadata {
                user_id,
                package_id,
                email: email.into(),
            },
            created_at: now,
            updated_at: now,
        }
    }
}
