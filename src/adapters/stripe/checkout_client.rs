//! Stripe checkout adapter.
//!
//! Implements `CheckoutProvider` over the Stripe REST API using ad-hoc
//! `price_data` line items, so no catalog objects need to exist on the
//! Stripe side. Webhook signature verification lives in the domain
//! (`WebhookVerifier`); this adapter only creates and reads sessions.

use async_trait::async_trait;
use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;

use crate::domain::payment::{CheckoutSessionObject, Observation, PaymentError};
use crate::ports::{CheckoutProvider, CreateSessionRequest, HostedSession};

const STRIPE_API_BASE: &str = "https://api.stripe.com";

/// Stripe API configuration.
#[derive(Clone)]
pub struct StripeConfig {
    /// Secret API key (sk_live_... or sk_test_...).
    api_key: SecretString,
    /// Base URL for the Stripe API, overridable for tests.
    api_base_url: String,
}

impl StripeConfig {
    pub fn new(api_key: SecretString) -> Self {
        Self {
            api_key,
            api_base_url: STRIPE_API_BASE.to_string(),
        }
    }

    /// Set a custom API base URL (for testing).
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.api_base_url = url.into();
        self
    }
}

/// Session fields we read back from session creation.
#[derive(Debug, Deserialize)]
struct CreatedSession {
    id: String,
    url: Option<String>,
}

pub struct StripeCheckoutClient {
    config: StripeConfig,
    http_client: reqwest::Client,
}

impl StripeCheckoutClient {
    pub fn new(config: StripeConfig) -> Self {
        Self {
            config,
            http_client: reqwest::Client::new(),
        }
    }
}

#[async_trait]
impl CheckoutProvider for StripeCheckoutClient {
    async fn create_session(
        &self,
        request: CreateSessionRequest,
    ) -> Result<HostedSession, PaymentError> {
        let url = format!("{}/v1/checkout/sessions", self.config.api_base_url);

        let amount = request.amount_cents.to_string();
        let params = vec![
            ("mode", "payment".to_string()),
            ("line_items[0][quantity]", "1".to_string()),
            (
                "line_items[0][price_data][currency]",
                request.currency.clone(),
            ),
            (
                "line_items[0][price_data][product_data][name]",
                format!("Finsight {} subscription", request.metadata.package_id),
            ),
            ("line_items[0][price_data][unit_amount]", amount),
            ("success_url", request.success_url.clone()),
            ("cancel_url", request.cancel_url.clone()),
            ("customer_email", request.metadata.email.clone()),
            (
                "metadata[user_id]",
                request.metadata.user_id.to_string(),
            ),
            (
                "metadata[package_id]",
                request.metadata.package_id.clone(),
            ),
        ];

        let response = self
            .http_client
            .post(&url)
            .basic_auth(self.config.api_key.expose_secret(), Option::<&str>::None)
            .form(&params)
            .send()
            .await
            .map_err(|e| PaymentError::provider(e.to_string()))?;

        if !response.status().is_success() {
            let error_text = response.text().await.unwrap_or_default();
            tracing::error!(error = %error_text, "Stripe session creation failed");
            return Err(PaymentError::provider(format!(
                "Stripe API error: {}",
                error_text
            )));
        }

        let session: CreatedSession = response
            .json()
            .await
            .map_err(|e| PaymentError::provider(format!("Failed to parse Stripe response: {}", e)))?;

        let checkout_url = session.url.ok_or_else(|| {
            PaymentError::provider("Stripe session has no checkout URL".to_string())
        })?;

        Ok(HostedSession {
            session_id: session.id,
            url: checkout_url,
        })
    }

    async fn fetch_status(&self, session_id: &str) -> Result<Observation, PaymentError> {
        let url = format!(
            "{}/v1/checkout/sessions/{}",
            self.config.api_base_url, session_id
        );

        let response = self
            .http_client
            .get(&url)
            .basic_auth(self.config.api_key.expose_secret(), Option::<&str>::None)
            .send()
            .await
            .map_err(|e| PaymentError::provider(e.to_string()))?;

        if response.status() == reqwest::StatusCode::NOT_FOUND {
            return Err(PaymentError::SessionNotFound(session_id.to_string()));
        }

        if !response.status().is_success() {
            let error_text = response.text().await.unwrap_or_default();
            tracing::error!(error = %error_text, "Stripe session fetch failed");
            return Err(PaymentError::provider(format!(
                "Stripe API error: {}",
                error_text
            )));
        }

        let session: CheckoutSessionObject = response
            .json()
            .await
            .map_err(|e| PaymentError::provider(format!("Failed to parse Stripe response: {}", e)))?;

        Ok(session.observation())
    }
}
