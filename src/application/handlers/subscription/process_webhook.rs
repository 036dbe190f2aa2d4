//! ProcessWebhookHandler - the push trigger of payment reconciliation.

use std::sync::Arc;

use crate::domain::payment::{PaymentError, WebhookError, WebhookVerifier};

use super::reconcile_payment::ReconcilePaymentHandler;

#[derive(Debug, Clone)]
pub struct ProcessWebhookCommand {
    /// Raw request body, exactly as received; the signature covers these
    /// bytes.
    pub payload: Vec<u8>,
    /// The provider's signature header value.
    pub signature: String,
}

#[derive(Debug, Clone)]
pub enum ProcessWebhookResult {
    /// A checkout-session event was reconciled.
    Processed { session_id: String },
    /// Valid signature, but an event family we do not track.
    Ignored { event_type: String },
}

#[derive(Debug, thiserror::Error)]
pub enum ProcessWebhookError {
    #[error(transparent)]
    Webhook(#[from] WebhookError),

    #[error(transparent)]
    Payment(#[from] PaymentError),
}

pub struct ProcessWebhookHandler {
    verifier: WebhookVerifier,
    reconciler: Arc<ReconcilePaymentHandler>,
}

impl ProcessWebhookHandler {
    pub fn new(verifier: WebhookVerifier, reconciler: Arc<ReconcilePaymentHandler>) -> Self {
        Self {
            verifier,
            reconciler,
        }
    }

    pub async fn handle(
        &self,
        cmd: ProcessWebhookCommand,
    ) -> Result<ProcessWebhookResult, ProcessWebhookError> {
        // Verification happens before any lookup or write; a bad
        // signature must leave no trace beyond this log line.
        let event = self
            .verifier
            .verify_and_parse(&cmd.payload, &cmd.signature)
            .map_err(|e| {
                tracing::warn!(error = %e, "webhook rejected");
                e
            })?;

        if !event.is_checkout_event() {
            tracing::debug!(event_type = %event.event_type, "webhook event ignored");
            return Ok(ProcessWebhookResult::Ignored {
                event_type: event.event_type,
            });
        }

        let session_id = event.session_id().to_string();
        self.reconciler
            .handle(&session_id, &event.observation())
            .await?;

        Ok(ProcessWebhookResult::Processed { session_id })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::handlers::test_support::{
        MockTransactionRepository, MockUserRepository,
    };
    use crate::domain::foundation::Timestamp;
    use crate::domain::payment::{sign_payload, PaymentTransaction};
    use crate::domain::user::{SubscriptionStatus, User};

    const SECRET: &str = "whsec_test";

    fn signed(payload: &[u8]) -> String {
        sign_payload(SECRET, Timestamp::now().as_unix_secs(), payload)
    }

    fn completed_event(session_id: &str) -> Vec<u8> {
        serde_json::json!({
            "id": "evt_1",
            "type": "checkout.session.completed",
            "livemode": false,
            "data": {
                "object": {
                    "id": session_id,
                    "payment_status": "paid",
                    "status": "complete",
                    "amount_total": 2900,
                    "currency": "usd"
                }
            }
        })
        .to_string()
        .into_bytes()
    }

    fn handler_with_session(
        session_id: &str,
    ) -> (ProcessWebhookHandler, Arc<MockUserRepository>) {
        let user = User::new("a@x.com", "hash");
        let user_id = user.id;
        let users = Arc::new(MockUserRepository::with_user(user));
        let transaction = PaymentTransaction::initiated(
            user_id, "a@x.com", session_id, "monthly", 2900, "usd",
        );
        let transactions = Arc::new(MockTransactionRepository::with_transaction(transaction));
        let reconciler = Arc::new(ReconcilePaymentHandler::new(transactions, users.clone()));
        (
            ProcessWebhookHandler::new(WebhookVerifier::new(SECRET), reconciler),
            users,
        )
    }

    #[tokio::test]
    async fn signed_completed_event_activates_subscription() {
        let (handler, users) = handler_with_session("cs_1");
        let payload = completed_event("cs_1");

        let result = handler
            .handle(ProcessWebhookCommand {
                signature: signed(&payload),
                payload,
            })
            .await
            .unwrap();

        assert!(matches!(
            result,
            ProcessWebhookResult::Processed { ref session_id } if session_id == "cs_1"
        ));
        assert_eq!(
            users.all()[0].subscription_status,
            SubscriptionStatus::Active
        );
    }

    #[tokio::test]
    async fn bad_signature_mutates_nothing() {
        let (handler, users) = handler_with_session("cs_1");
        let payload = completed_event("cs_1");
        let ts = Timestamp::now().as_unix_secs();

        let err = handler
            .handle(ProcessWebhookCommand {
                signature: format!("t={},v1={}", ts, "00".repeat(32)),
                payload,
            })
            .await
            .unwrap_err();

        assert!(matches!(
            err,
            ProcessWebhookError::Webhook(WebhookError::InvalidSignature)
        ));
        assert_eq!(
            users.all()[0].subscription_status,
            SubscriptionStatus::Pending
        );
    }

    #[tokio::test]
    async fn tampered_payload_fails_verification() {
        let (handler, users) = handler_with_session("cs_1");
        let payload = completed_event("cs_1");
        let signature = signed(&payload);
        let tampered = completed_event("cs_other");

        let err = handler
            .handle(ProcessWebhookCommand {
                signature,
                payload: tampered,
            })
            .await
            .unwrap_err();

        assert!(matches!(
            err,
            ProcessWebhookError::Webhook(WebhookError::InvalidSignature)
        ));
        assert_eq!(
            users.all()[0].subscription_status,
            SubscriptionStatus::Pending
        );
    }

    #[tokio::test]
    async fn non_checkout_event_is_acknowledged_without_effect() {
        let (handler, users) = handler_with_session("cs_1");
        let payload = serde_json::json!({
            "id": "evt_2",
            "type": "invoice.paid",
            "livemode": false,
            "data": { "object": { "id": "in_1" } }
        })
        .to_string()
        .into_bytes();

        let result = handler
            .handle(ProcessWebhookCommand {
                signature: signed(&payload),
                payload,
            })
            .await
            .unwrap();

        assert!(matches!(result, ProcessWebhookResult::Ignored { .. }));
        assert_eq!(
            users.all()[0].subscription_status,
            SubscriptionStatus::Pending
        );
    }

    #[tokio::test]
    async fn duplicate_delivery_is_a_success() {
        let (handler, users) = handler_with_session("cs_1");
        let payload = completed_event("cs_1");

        for _ in 0..3 {
            handler
                .handle(ProcessWebhookCommand {
                    signature: signed(&payload),
                    payload: payload.clone(),
                })
                .await
                .unwrap();
        }

        assert_eq!(
            users.all()[0].subscription_status,
            SubscriptionStatus::Active
        );
        // Every delivery re-asserts activation; none of them fail.
        assert_eq!(users.activation_count(), 3);
    }

    #[tokio::test]
    async fn paid_event_for_unknown_session_is_not_found() {
        let (handler, _) = handler_with_session("cs_1");
        let payload = completed_event("cs_missing");

        let err = handler
            .handle(ProcessWebhookCommand {
                signature: signed(&payload),
                payload,
            })
            .await
            .unwrap_err();

        assert!(matches!(
            err,
            ProcessWebhookError::Payment(PaymentError::SessionNotFound(_))
        ));
    }
}
