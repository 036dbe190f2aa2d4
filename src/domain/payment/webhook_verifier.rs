//! Webhook signature verification.
//!
//! HMAC-SHA256 over `"{timestamp}.{payload}"` with the webhook signing
//! secret, constant-time comparison, and a timestamp window against
//! replays. Verification failures abort before any state mutation.

use hmac::{Hmac, Mac};
use sha2::Sha256;
use subtle::ConstantTimeEq;

use super::stripe_event::StripeEvent;
use super::WebhookError;

/// Maximum accepted event age (5 minutes).
const MAX_EVENT_AGE_SECS: i64 = 300;

/// Tolerated clock skew for future timestamps (1 minute).
const MAX_CLOCK_SKEW_SECS: i64 = 60;

/// Parsed `Stripe-Signature` header: `t=<unix>,v1=<hex hmac>`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignatureHeader {
    pub timestamp: i64,
    pub v1_signature: Vec<u8>,
}

impl SignatureHeader {
    /// Parses the header, ignoring unknown `k=v` pairs for forward
    /// compatibility.
    pub fn parse(header: &str) -> Result<Self, WebhookError> {
        let mut timestamp: Option<i64> = None;
        let mut v1_signature: Option<Vec<u8>> = None;

        for part in header.split(',') {
            let (key, value) = part
                .split_once('=')
                .ok_or_else(|| WebhookError::malformed_header("expected k=v pairs"))?;
            match key {
                "t" => {
                    timestamp = Some(
                        value
                            .parse()
                            .map_err(|_| WebhookError::malformed_header("bad timestamp"))?,
                    );
                }
                "v1" => {
                    v1_signature = Some(
                        hex::decode(value)
                            .map_err(|_| WebhookError::malformed_header("bad v1 hex"))?,
                    );
                }
                _ => {}
            }
        }

        Ok(SignatureHeader {
            timestamp: timestamp
                .ok_or_else(|| WebhookError::malformed_header("missing timestamp"))?,
            v1_signature: v1_signature
                .ok_or_else(|| WebhookError::malformed_header("missing v1 signature"))?,
        })
    }
}

/// Verifies webhook signatures against the signing secret.
#[derive(Clone)]
pub struct WebhookVerifier {
    secret: String,
}

impl WebhookVerifier {
    pub fn new(secret: impl Into<String>) -> Self {
        Self {
            secret: secret.into(),
        }
    }

    /// Verifies the signature and parses the event.
    ///
    /// Order matters: header parse, timestamp window, signature compare,
    /// then JSON parse. Nothing is trusted before the compare passes.
    pub fn verify_and_parse(
        &self,
        payload: &[u8],
        signature_header: &str,
    ) -> Result<StripeEvent, WebhookError> {
        let header = SignatureHeader::parse(signature_header)?;
        self.check_timestamp(header.timestamp)?;

        let expected = self.compute_signature(header.timestamp, payload);
        if !constant_time_eq(&expected, &header.v1_signature) {
            return Err(WebhookError::InvalidSignature);
        }

        serde_json::from_slice(payload).map_err(|e| WebhookError::ParseError(e.to_string()))
    }

    fn check_timestamp(&self, timestamp: i64) -> Result<(), WebhookError> {
        let age = chrono::Utc::now().timestamp() - timestamp;
        if age > MAX_EVENT_AGE_SECS || age < -MAX_CLOCK_SKEW_SECS {
            return Err(WebhookError::TimestampOutOfRange);
        }
        Ok(())
    }

    fn compute_signature(&self, timestamp: i64, payload: &[u8]) -> Vec<u8> {
        let mut mac = Hmac::<Sha256>::new_from_slice(self.secret.as_bytes())
            .expect("HMAC accepts any key length");
        mac.update(timestamp.to_string().as_bytes());
        mac.update(b".");
        mac.update(payload);
        mac.finalize().into_bytes().to_vec()
    }
}

fn constant_time_eq(a: &[u8], b: &[u8]) -> bool {
    if a.len() != b.len() {
        return false;
    }
    a.ct_eq(b).into()
}

/// Builds a valid signature header for a payload, for tests and tooling.
pub fn sign_payload(secret: &str, timestamp: i64, payload: &[u8]) -> String {
    let mut mac =
        Hmac::<Sha256>::new_from_slice(secret.as_bytes()).expect("HMAC accepts any key length");
    mac.update(timestamp.to_string().as_bytes());
    mac.update(b".");
    mac.update(payload);
    format!("t={},v1={}", timestamp, hex::encode(mac.finalize().into_bytes()))
}
