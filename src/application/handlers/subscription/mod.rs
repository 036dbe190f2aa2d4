pub mod create_checkout;
pub mod poll_status;
pub mod process_webhook;
pub mod reconcile_payment;

pub use create_checkout::{CreateCheckoutCommand, CreateCheckoutHandler, CreateCheckoutResult};
pub use poll_status::{PollStatusHandler, SessionStatus};
pub use process_webhook::{
    ProcessWebhookCommand, ProcessWebhookError, ProcessWebhookHandler, ProcessWebhookResult,
};
pub use reconcile_payment::{ReconcileOutcome, ReconcilePaymentHandler};
