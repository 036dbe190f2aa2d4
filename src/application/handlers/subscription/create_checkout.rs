//! CreateCheckoutHandler - starts a hosted checkout and records the
//! pending transaction.

use std::sync::Arc;

use crate::domain::foundation::UserId;
use crate::domain::payment::{PaymentError, PaymentTransaction, PriceTable, TransactionMetadata};
use crate::ports::{CheckoutProvider, CreateSessionRequest, TransactionRepository};

#[derive(Debug, Clone)]
pub struct CreateCheckoutCommand {
    pub user_id: UserId,
    pub email: String,
    pub package_id: String,
    /// Frontend origin; success and cancel redirects are built from it.
    pub origin_url: String,
}

#[derive(Debug, Clone)]
pub struct CreateCheckoutResult {
    pub session_id: String,
    pub url: String,
}

/// Creates a provider session for a priced package and persists the
/// matching pending transaction.
///
/// Known gap, kept intentionally: two concurrent calls by the same user
/// create two sessions and two pending transactions. Only the session
/// the customer completes ever confirms; the other stays pending.
pub struct CreateCheckoutHandler {
    provider: Option<Arc<dyn CheckoutProvider>>,
    transactions: Arc<dyn TransactionRepository>,
    prices: PriceTable,
    /// Public URL of this backend, used for the provider's webhook.
    public_url: String,
}

impl CreateCheckoutHandler {
    pub fn new(
        provider: Option<Arc<dyn CheckoutProvider>>,
        transactions: Arc<dyn TransactionRepository>,
        prices: PriceTable,
        public_url: String,
    ) -> Self {
        Self {
            provider,
            transactions,
            prices,
            public_url,
        }
    }

    pub async fn handle(
        &self,
        cmd: CreateCheckoutCommand,
    ) -> Result<CreateCheckoutResult, PaymentError> {
        // Absence of a provider credential is a per-call failure, not a
        // startup crash: the rest of the API stays usable without one.
        let provider = self
            .provider
            .as_ref()
            .ok_or(PaymentError::ProviderUnconfigured)?;

        // Amount always comes from the server-side price table, never
        // from the client.
        let price = self.prices.price_for(&cmd.package_id)?;

        let origin = cmd.origin_url.trim_end_matches('/');
        let session = provider
            .create_session(CreateSessionRequest {
                amount_cents: price.amount_cents,
                currency: price.currency.to_string(),
                success_url: format!(
                    "{}/subscription/success?session_id={{CHECKOUT_SESSION_ID}}",
                    origin
                ),
                cancel_url: format!("{}/subscription/cancel", origin),
                webhook_url: format!(
                    "{}/api/webhook/stripe",
                    self.public_url.trim_end_matches('/')
                ),
                metadata: TransactionMetadata {
                    user_id: cmd.user_id,
                    package_id: cmd.package_id.clone(),
                    email: cmd.email.clone(),
                },
            })
            .await?;

        let transaction = PaymentTransaction::initiated(
            cmd.user_id,
            cmd.email,
            session.session_id.clone(),
            cmd.package_id,
            price.amount_cents,
            price.currency,
        );
        self.transactions.insert(&transaction).await?;

        tracing::info!(
            user_id = %cmd.user_id,
            session_id = %session.session_id,
            amount_cents = price.amount_cents,
            "checkout session created"
        );

        Ok(CreateCheckoutResult {
            session_id: session.session_id,
            url: session.url,
        })
    }
}
