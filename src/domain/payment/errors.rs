//! Payment domain errors.

use thiserror::Error;

/// Errors from checkout and reconciliation operations.
#[derive(Debug, Clone, Error)]
pub enum PaymentError {
    /// Package id not present in the price table.
    #[error("Unknown package: {0}")]
    UnknownPackage(String),

    /// No provider credential available in this deployment. Reported
    /// per-call, never a startup crash.
    #[error("Payment provider not configured")]
    ProviderUnconfigured,

    /// No transaction recorded for the session id.
    #[error("No transaction for session {0}")]
    SessionNotFound(String),

    /// The provider call failed.
    #[error("Provider error: {0}")]
    Provider(String),

    /// Store-level failure.
    #[error("Storage error: {0}")]
    Storage(String),
}

impl PaymentError {
    pub fn provider(message: impl Into<String>) -> Self {
        PaymentError::Provider(message.into())
    }

    pub fn storage(message: impl Into<String>) -> Self {
        PaymentError::Storage(message.into())
    }
}

/// Errors from webhook verification and parsing.
#[derive(Debug, Clone, Error)]
pub enum WebhookError {
    /// Signature comparison failed. No state may be mutated after this.
    #[error("Invalid webhook signature")]
    InvalidSignature,

    /// Event timestamp outside the accepted window.
    #[error("Webhook timestamp out of range")]
    TimestampOutOfRange,

    /// Signature header was not `t=...,v1=...`.
    #[error("Malformed signature header: {0}")]
    MalformedHeader(String),

    /// Body was not a parseable event.
    #[error("Failed to parse webhook payload: {0}")]
    ParseError(String),
}

impl WebhookError {
    pub fn malformed_header(reason: impl Into<String>) -> Self {
        WebhookError::MalformedHeader(reason.into())
    }
}
