//! PollStatusHandler - the pull trigger of payment reconciliation.

use std::sync::Arc;

use crate::domain::payment::{CheckoutStatus, PaymentError, PaymentStatus};
use crate::ports::CheckoutProvider;

use super::reconcile_payment::ReconcilePaymentHandler;

/// Current transaction view returned to the polling client.
#[derive(Debug, Clone)]
pub struct SessionStatus {
    pub session_id: String,
    pub status: CheckoutStatus,
    pub payment_status: PaymentStatus,
    pub amount_cents: i64,
    pub currency: String,
}

/// Queries the provider for a session's current state and feeds it
/// through the same reconciler as webhook delivery, so polling alone is
/// enough to activate a subscription when webhooks are lost.
pub struct PollStatusHandler {
    provider: Option<Arc<dyn CheckoutProvider>>,
    reconciler: Arc<ReconcilePaymentHandler>,
}

impl PollStatusHandler {
    pub fn new(
        provider: Option<Arc<dyn CheckoutProvider>>,
        reconciler: Arc<ReconcilePaymentHandler>,
    ) -> Self {
        Self {
            provider,
            reconciler,
        }
    }

    pub async fn handle(&self, session_id: &str) -> Result<SessionStatus, PaymentError> {
        let provider = self
            .provider
            .as_ref()
            .ok_or(PaymentError::ProviderUnconfigured)?;

        let observed = provider.fetch_status(session_id).await?;
        let outcome = self.reconciler.handle(session_id, &observed).await?;

        let transaction = outcome.transaction;
        Ok(SessionStatus {
            session_id: transaction.session_id,
            status: transaction.status,
            payment_status: transaction.payment_status,
            amount_cents: transaction.amount_cents,
            currency: transaction.currency,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::handlers::test_support::{
        MockCheckoutProvider, MockTransactionRepository, MockUserRepository,
    };
    use crate::domain::payment::{Observation, PaymentTransaction};
    use crate::domain::user::{SubscriptionStatus, User};

    fn fixture(
        observed: Observation,
    ) -> (PollStatusHandler, Arc<MockUserRepository>) {
        let user = User::new("a@x.com", "hash");
        let user_id = user.id;
        let users = Arc::new(MockUserRepository::with_user(user));
        let transaction =
            PaymentTransaction::initiated(user_id, "a@x.com", "cs_1", "monthly", 2900, "usd");
        let transactions = Arc::new(MockTransactionRepository::with_transaction(transaction));
        let reconciler = Arc::new(ReconcilePaymentHandler::new(transactions, users.clone()));
        let provider = Arc::new(
            MockCheckoutProvider::new("cs_1", "https://pay/cs_1").with_status(observed),
        );
        (PollStatusHandler::new(Some(provider), reconciler), users)
    }

    #[tokio::test]
    async fn paid_poll_activates_subscription() {
        let (handler, users) = fixture(Observation::paid());

        let status = handler.handle("cs_1").await.unwrap();

        assert_eq!(status.payment_status, PaymentStatus::Paid);
        assert_eq!(status.status, CheckoutStatus::Completed);
        assert_eq!(status.amount_cents, 2900);
        assert_eq!(
            users.all()[0].subscription_status,
            SubscriptionStatus::Active
        );
    }

    #[tokio::test]
    async fn pending_poll_reports_pending() {
        let (handler, users) = fixture(Observation {
            payment_status: PaymentStatus::Pending,
            status: CheckoutStatus::Pending,
            amount_total: Some(2900),
            currency: Some("usd".to_string()),
        });

        let status = handler.handle("cs_1").await.unwrap();

        assert_eq!(status.payment_status, PaymentStatus::Pending);
        assert_eq!(
            users.all()[0].subscription_status,
            SubscriptionStatus::Pending
        );
    }

    #[tokio::test]
    async fn missing_provider_is_surfaced_per_call() {
        let user = User::new("a@x.com", "hash");
        let users = Arc::new(MockUserRepository::with_user(user));
        let transactions = Arc::new(MockTransactionRepository::new());
        let reconciler = Arc::new(ReconcilePaymentHandler::new(transactions, users));
        let handler = PollStatusHandler::new(None, reconciler);

        let err = handler.handle("cs_1").await.unwrap_err();

        assert!(matches!(err, PaymentError::ProviderUnconfigured));
    }
}
