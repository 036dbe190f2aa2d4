//! JSON request/response types for the subscription endpoints.

use serde::{Deserialize, Serialize};

use crate::application::handlers::subscription::{CreateCheckoutResult, SessionStatus};

#[derive(Debug, Clone, Deserialize)]
pub struct CheckoutRequest {
    pub package_id: String,
    /// Frontend origin the success/cancel redirects point back to.
    pub origin_url: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct CheckoutResponse {
    pub url: String,
    pub session_id: String,
}

impl From<CreateCheckoutResult> for CheckoutResponse {
    fn from(result: CreateCheckoutResult) -> Self {
        Self {
            url: result.url,
            session_id: result.session_id,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct SessionStatusResponse {
    pub status: String,
    pub payment_status: String,
    pub amount_total: i64,
    pub currency: String,
}

impl From<SessionStatus> for SessionStatusResponse {
    fn from(status: SessionStatus) -> Self {
        Self {
            status: status.status.as_str().to_string(),
            payment_status: status.payment_status.as_str().to_string(),
            amount_total: status.amount_cents,
            currency: status.currency,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct WebhookAck {
    pub received: bool,
}
