//! Payment configuration

use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;

use super::error::ValidationError;

/// Payment configuration (Stripe)
///
/// Both keys are optional: a deployment without them still serves every
/// non-payment endpoint, and checkout calls fail individually with a
/// provider-unconfigured error.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PaymentConfig {
    /// Stripe API key (sk_...)
    pub stripe_api_key: Option<SecretString>,

    /// Stripe webhook signing secret (whsec_...)
    pub stripe_webhook_secret: Option<SecretString>,
}

impl PaymentConfig {
    pub fn is_configured(&self) -> bool {
        self.stripe_api_key.is_some()
    }

    /// Validate payment configuration. Absent keys are valid; present
    /// keys must carry the expected prefixes.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if let Some(key) = &self.stripe_api_key {
            if !key.expose_secret().starts_with("sk_") {
                return Err(ValidationError::InvalidStripeKey);
            }
        }
        if let Some(secret) = &self.stripe_webhook_secret {
            if !secret.expose_secret().starts_with("whsec_") {
                return Err(ValidationError::InvalidStripeWebhookSecret);
            }
        }
        Ok(())
    }
}
