//! ReconcilePaymentHandler - the single state-transition path behind
//! both reconciliation triggers.
//!
//! The webhook route (push) and the status poll (pull) both end up
//! here. The transaction repository serializes the read-reconcile-write
//! per session; this handler applies the resulting side effect: on any
//! paid observation it ensures the owning user's subscription is
//! active. Activating an already-active user is a no-op, so repeated
//! and out-of-order observations are harmless, and a crash that
//! previously left "transaction paid, user pending" is repaired by the
//! next observation of either kind.

use std::sync::Arc;

use crate::domain::payment::{Observation, PaymentError, PaymentTransaction};
use crate::ports::{TransactionRepository, UserRepository};

#[derive(Debug, Clone)]
pub struct ReconcileOutcome {
    pub transaction: PaymentTransaction,
    /// True only for the observation that first confirmed the payment.
    pub first_confirmation: bool,
}

pub struct ReconcilePaymentHandler {
    transactions: Arc<dyn TransactionRepository>,
    users: Arc<dyn UserRepository>,
}

impl ReconcilePaymentHandler {
    pub fn new(
        transactions: Arc<dyn TransactionRepository>,
        users: Arc<dyn UserRepository>,
    ) -> Self {
        Self {
            transactions,
            users,
        }
    }

    pub async fn handle(
        &self,
        session_id: &str,
        observed: &Observation,
    ) -> Result<ReconcileOutcome, PaymentError> {
        let reconciled = self
            .transactions
            .record_observation(session_id, observed)
            .await?
            .ok_or_else(|| PaymentError::SessionNotFound(session_id.to_string()))?;

        if reconciled.transition.ensure_user_active {
            self.users
                .activate_subscription(reconciled.transaction.user_id)
                .await
                .map_err(|e| {
                    PaymentError::storage(format!("failed to activate subscription: {}", e))
                })?;
        }

        if reconciled.transition.first_confirmation {
            tracing::info!(
                session_id,
                user_id = %reconciled.transaction.user_id,
                amount_cents = reconciled.transaction.amount_cents,
                "payment confirmed, subscription activated"
            );
        } else {
            tracing::debug!(
                session_id,
                payment_status = reconciled.transition.payment_status.as_str(),
                "payment observation applied"
            );
        }

        Ok(ReconcileOutcome {
            transaction: reconciled.transaction,
            first_confirmation: reconciled.transition.first_confirmation,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::handlers::test_support::{
        MockTransactionRepository, MockUserRepository,
    };
    use crate::domain::payment::{CheckoutStatus, PaymentStatus, PaymentTransaction};
    use crate::domain::user::{SubscriptionStatus, User};

    fn pending_fixture() -> (Arc<MockTransactionRepository>, Arc<MockUserRepository>, String) {
        let user = User::new("a@x.com", "hash");
        let user_id = user.id;
        let users = Arc::new(MockUserRepository::with_user(user));
        let transaction =
            PaymentTransaction::initiated(user_id, "a@x.com", "cs_1", "monthly", 2900, "usd");
        let transactions = Arc::new(MockTransactionRepository::with_transaction(transaction));
        (transactions, users, "cs_1".to_string())
    }

    fn unpaid_observation() -> Observation {
        Observation {
            payment_status: PaymentStatus::Pending,
            status: CheckoutStatus::Pending,
            amount_total: Some(2900),
            currency: Some("usd".to_string()),
        }
    }

    #[tokio::test]
    async fn paid_observation_activates_user_once() {
        let (transactions, users, session_id) = pending_fixture();
        let handler = ReconcilePaymentHandler::new(transactions.clone(), users.clone());

        let first = handler
            .handle(&session_id, &Observation::paid())
            .await
            .unwrap();
        let second = handler
            .handle(&session_id, &Observation::paid())
            .await
            .unwrap();

        assert!(first.first_confirmation);
        assert!(!second.first_confirmation);
        assert_eq!(
            users.all()[0].subscription_status,
            SubscriptionStatus::Active
        );
        assert_eq!(users.activation_count(), 2); // idempotent store call
        assert_eq!(
            transactions.all()[0].payment_status,
            PaymentStatus::Paid
        );
    }

    #[tokio::test]
    async fn unpaid_observation_leaves_user_pending() {
        let (transactions, users, session_id) = pending_fixture();
        let handler = ReconcilePaymentHandler::new(transactions, users.clone());

        let outcome = handler.handle(&session_id, &unpaid_observation()).await.unwrap();

        assert!(!outcome.first_confirmation);
        assert_eq!(
            users.all()[0].subscription_status,
            SubscriptionStatus::Pending
        );
    }

    #[tokio::test]
    async fn late_unpaid_poll_never_regresses_a_paid_session() {
        let (transactions, users, session_id) = pending_fixture();
        let handler = ReconcilePaymentHandler::new(transactions.clone(), users.clone());

        handler
            .handle(&session_id, &Observation::paid())
            .await
            .unwrap();
        // A poll of the still-open provider session arriving after the
        // completed webhook.
        let outcome = handler.handle(&session_id, &unpaid_observation()).await.unwrap();

        assert_eq!(outcome.transaction.payment_status, PaymentStatus::Paid);
        assert_eq!(outcome.transaction.status, CheckoutStatus::Completed);
        assert_eq!(
            users.all()[0].subscription_status,
            SubscriptionStatus::Active
        );
    }

    #[tokio::test]
    async fn unknown_session_is_not_found() {
        let (transactions, users, _) = pending_fixture();
        let handler = ReconcilePaymentHandler::new(transactions, users);

        let err = handler
            .handle("cs_unknown", &Observation::paid())
            .await
            .unwrap_err();

        assert!(matches!(err, PaymentError::SessionNotFound(_)));
    }

    #[tokio::test]
    async fn paid_observation_repairs_a_pending_user() {
        // Transaction already recorded paid, user still pending: the
        // state a crash between the two writes leaves behind.
        let user = User::new("a@x.com", "hash");
        let user_id = user.id;
        let users = Arc::new(MockUserRepository::with_user(user));
        let mut transaction =
            PaymentTransaction::initiated(user_id, "a@x.com", "cs_1", "monthly", 2900, "usd");
        transaction.payment_status = PaymentStatus::Paid;
        transaction.status = CheckoutStatus::Completed;
        let transactions = Arc::new(MockTransactionRepository::with_transaction(transaction));
        let handler = ReconcilePaymentHandler::new(transactions, users.clone());

        handler.handle("cs_1", &Observation::paid()).await.unwrap();

        assert_eq!(
            users.all()[0].subscription_status,
            SubscriptionStatus::Active
        );
    }
}
