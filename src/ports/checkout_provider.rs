//! Payment provider port for hosted checkout.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::domain::payment::{Observation, PaymentError, TransactionMetadata};

/// Request to allocate a hosted checkout session.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateSessionRequest {
    /// Amount in minor units, taken from the price table.
    pub amount_cents: i64,
    pub currency: String,
    /// Redirect after successful payment.
    pub success_url: String,
    /// Redirect after abandoning checkout.
    pub cancel_url: String,
    /// Endpoint the provider calls back with events. Stripe registers
    /// webhook endpoints at the account, not per session, so its adapter
    /// ignores this; providers with per-session callbacks use it.
    pub webhook_url: String,
    /// Frozen checkout context, echoed back by the provider.
    pub metadata: TransactionMetadata,
}

/// A provider-hosted checkout session.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HostedSession {
    /// Provider session id - the reconciliation join key.
    pub session_id: String,
    /// URL the customer completes payment at.
    pub url: String,
}

/// External payment provider.
#[async_trait]
pub trait CheckoutProvider: Send + Sync {
    /// Allocates a hosted session. Failures surface immediately; there is
    /// no retry policy on this call.
    async fn create_session(
        &self,
        request: CreateSessionRequest,
    ) -> Result<HostedSession, PaymentError>;

    /// Queries the provider for the current state of a session (the pull
    /// path of reconciliation).
    async fn fetch_status(&self, session_id: &str) -> Result<Observation, PaymentError>;
}
