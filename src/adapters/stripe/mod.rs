//! Stripe payment provider adapter.

pub mod checkout_client;

pub use checkout_client::{StripeCheckoutClient, StripeConfig};
