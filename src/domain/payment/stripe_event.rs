//! Provider webhook event payloads.

use serde::{Deserialize, Serialize};

use super::{CheckoutStatus, Observation, PaymentStatus};

/// A deserialized Stripe webhook event.
///
/// Only checkout-session events matter to reconciliation; everything else
/// is acknowledged and ignored by the handler.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StripeEvent {
    /// Event id (evt_...).
    pub id: String,
    /// Event type, e.g. `checkout.session.completed`.
    #[serde(rename = "type")]
    pub event_type: String,
    pub data: StripeEventData,
    /// Whether the event originated in live mode.
    #[serde(default)]
    pub livemode: bool,
}

impl StripeEvent {
    /// True for the checkout-session event family.
    pub fn is_checkout_event(&self) -> bool {
        self.event_type.starts_with("checkout.session.")
    }

    /// The session this event describes.
    pub fn session_id(&self) -> &str {
        &self.data.object.id
    }

    /// Maps the provider's view onto the domain observation.
    pub fn observation(&self) -> Observation {
        self.data.object.observation()
    }
}

/// Event envelope body.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StripeEventData {
    pub object: CheckoutSessionObject,
}

/// The `checkout.session` object carried by checkout events and returned
/// by the session-status endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CheckoutSessionObject {
    /// Session id (cs_...).
    pub id: String,
    /// Provider payment state: `paid`, `unpaid`, `failed`, ...
    #[serde(default)]
    pub payment_status: Option<String>,
    /// Provider session state: `open`, `complete`, `expired`, ...
    #[serde(default)]
    pub status: Option<String>,
    /// Total in minor units.
    #[serde(default)]
    pub amount_total: Option<i64>,
    #[serde(default)]
    pub currency: Option<String>,
}

impl CheckoutSessionObject {
    /// Maps provider strings to the domain's observation.
    ///
    /// Unknown payment states are treated as still-pending rather than
    /// failed, so a new provider vocabulary never fabricates a failure.
    pub fn observation(&self) -> Observation {
        let payment_status = match self.payment_status.as_deref() {
            Some("paid") => PaymentStatus::Paid,
            Some("failed") => PaymentStatus::Failed,
            _ => PaymentStatus::Pending,
        };
        let status = match self.status.as_deref() {
            Some("complete") | Some("completed") => CheckoutStatus::Completed,
            Some("initiated") => CheckoutStatus::Initiated,
            _ => CheckoutStatus::Pending,
        };
        Observation {
            payment_status,
            status,
            amount_total: self.amount_total,
            currency: self.currency.clone(),
        }
    }
}
