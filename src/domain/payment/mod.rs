//! Payment domain - checkout transactions and reconciliation.
//!
//! The reconciliation core: `reconcile` is the single pure transition fed
//! by both the webhook push path and the status-poll pull path.

mod errors;
mod price_table;
mod reconcile;
mod stripe_event;
mod transaction;
mod webhook_verifier;

pub use errors::{PaymentError, WebhookError};
pub use price_table::{Price, PriceTable};
pub use reconcile::{reconcile, Observation, Transition};
pub use stripe_event::{CheckoutSessionObject, StripeEvent, StripeEventData};
pub use transaction::{CheckoutStatus, PaymentStatus, PaymentTransaction, TransactionMetadata};
pub use webhook_verifier::{sign_payload, SignatureHeader, WebhookVerifier};
