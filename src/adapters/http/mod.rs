//! HTTP adapters - the REST API surface.
//!
//! One feature module per route family, each with `dto`, `handlers` and
//! `routes`. `AppState` carries the ports; application handlers are
//! constructed per request from it.

pub mod advisor;
pub mod auth;
pub mod error;
pub mod finance;
pub mod health;
pub mod middleware;
pub mod subscription;

use std::sync::Arc;

use axum::http::StatusCode;
use axum::{middleware::from_fn_with_state, routing::get, Router};

use crate::application::handlers::auth::{LoginHandler, SignupHandler};
use crate::application::handlers::subscription::{
    CreateCheckoutHandler, PollStatusHandler, ProcessWebhookHandler, ReconcilePaymentHandler,
};
use crate::domain::auth::TokenService;
use crate::domain::payment::{PriceTable, WebhookVerifier};
use crate::ports::{
    AdvisorRepository, AiProvider, CheckoutProvider, ExpenseRepository, SetupRepository,
    TransactionRepository, UserRepository,
};

use error::ApiError;
use middleware::{auth_middleware, AuthGate};

/// Shared application state, cloned per request.
#[derive(Clone)]
pub struct AppState {
    pub users: Arc<dyn UserRepository>,
    pub transactions: Arc<dyn TransactionRepository>,
    pub setups: Arc<dyn SetupRepository>,
    pub expenses: Arc<dyn ExpenseRepository>,
    pub advisor: Arc<dyn AdvisorRepository>,
    pub tokens: Arc<TokenService>,
    /// Absent when no Stripe key is configured.
    pub checkout_provider: Option<Arc<dyn CheckoutProvider>>,
    /// Absent when no webhook signing secret is configured.
    pub webhook_verifier: Option<WebhookVerifier>,
    /// Absent when no AI key is configured.
    pub ai: Option<Arc<dyn AiProvider>>,
    pub prices: PriceTable,
    /// Public base URL of this backend.
    pub public_url: String,
}

impl AppState {
    pub fn signup_handler(&self) -> SignupHandler {
        SignupHandler::new(self.users.clone(), self.tokens.clone())
    }

    pub fn login_handler(&self) -> LoginHandler {
        LoginHandler::new(self.users.clone(), self.tokens.clone())
    }

    pub fn create_checkout_handler(&self) -> CreateCheckoutHandler {
        CreateCheckoutHandler::new(
            self.checkout_provider.clone(),
            self.transactions.clone(),
            self.prices.clone(),
            self.public_url.clone(),
        )
    }

    fn reconcile_handler(&self) -> Arc<ReconcilePaymentHandler> {
        Arc::new(ReconcilePaymentHandler::new(
            self.transactions.clone(),
            self.users.clone(),
        ))
    }

    pub fn poll_status_handler(&self) -> PollStatusHandler {
        PollStatusHandler::new(self.checkout_provider.clone(), self.reconcile_handler())
    }

    /// Fails when no webhook signing secret is configured; the endpoint
    /// surfaces that per call like the other provider-backed routes.
    pub fn webhook_handler(&self) -> Result<ProcessWebhookHandler, ApiError> {
        let verifier = self.webhook_verifier.clone().ok_or_else(|| {
            ApiError::new(
                StatusCode::INTERNAL_SERVER_ERROR,
                "PROVIDER_UNCONFIGURED",
                "Webhook signing secret not configured",
            )
        })?;
        Ok(ProcessWebhookHandler::new(
            verifier,
            self.reconcile_handler(),
        ))
    }

    pub fn ai_provider(&self) -> Result<Arc<dyn AiProvider>, ApiError> {
        self.ai.clone().ok_or_else(|| {
            ApiError::new(
                StatusCode::INTERNAL_SERVER_ERROR,
                "AI_UNCONFIGURED",
                "AI provider not configured",
            )
        })
    }
}

/// Builds the full `/api` router.
///
/// The auth middleware wraps every route; it injects the caller when a
/// valid bearer token is present and leaves anonymous requests alone,
/// so public routes (signup, login, webhook, health) and protected
/// routes share one stack.
pub fn api_router(state: AppState) -> Router {
    let gate = AuthGate::new(state.tokens.clone(), state.users.clone());

    let api = Router::new()
        .nest("/auth", auth::auth_routes())
        .nest("/subscription", subscription::subscription_routes())
        .nest("/webhook", subscription::webhook_routes())
        .nest("/user", finance::setup_routes())
        .nest("/expenses", finance::expense_routes())
        .nest("/dashboard", finance::dashboard_routes())
        .nest("/chat", advisor::chat_routes())
        .nest("/recommendations", advisor::recommendation_routes())
        .route("/health", get(health::health))
        .layer(from_fn_with_state(gate, auth_middleware))
        .with_state(state);

    Router::new().nest("/api", api)
}

#[cfg(test)]
mod tests {
    use super::*;

    use axum::body::{to_bytes, Body};
    use axum::http::{header, Method, Request, StatusCode};
    use secrecy::SecretString;
    use serde_json::{json, Value};
    use tower::ServiceExt;

    use crate::application::handlers::test_support::{
        MockCheckoutProvider, MockFinanceStores, MockTransactionRepository, MockUserRepository,
    };
    use crate::domain::foundation::Timestamp;
    use crate::domain::payment::sign_payload;

    const JWT_SECRET: &str = "router-test-secret-0123456789abcdef";
    const WEBHOOK_SECRET: &str = "whsec_router_test";

    fn state() -> AppState {
        let finance = Arc::new(MockFinanceStores::new());
        AppState {
            users: Arc::new(MockUserRepository::new()),
            transactions: Arc::new(MockTransactionRepository::new()),
            setups: finance.clone(),
            expenses: finance.clone(),
            advisor: finance,
            tokens: Arc::new(TokenService::new(&SecretString::new(
                JWT_SECRET.to_string(),
            ))),
            checkout_provider: Some(Arc::new(MockCheckoutProvider::new(
                "cs_router_1",
                "https://pay.test/cs_router_1",
            ))),
            webhook_verifier: Some(WebhookVerifier::new(WEBHOOK_SECRET)),
            ai: None,
            prices: PriceTable::standard(),
            public_url: "https://api.test".to_string(),
        }
    }

    fn json_request(
        method: Method,
        uri: &str,
        token: Option<&str>,
        body: Option<Value>,
    ) -> Request<Body> {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(token) = token {
            builder = builder.header(header::AUTHORIZATION, format!("Bearer {}", token));
        }
        match body {
            Some(body) => builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        }
    }

    async fn json_body(response: axum::response::Response) -> Value {
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    async fn signup(app: &Router, email: &str) -> String {
        let response = app
            .clone()
            .oneshot(json_request(
                Method::POST,
                "/api/auth/signup",
                None,
                Some(json!({"email": email, "password": "longenough"})),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::CREATED);
        json_body(response).await["token"].as_str().unwrap().to_string()
    }

    fn paid_webhook(session_id: &str) -> Request<Body> {
        let payload = json!({
            "id": "evt_router_1",
            "type": "checkout.session.completed",
            "livemode": false,
            "data": {
                "object": {
                    "id": session_id,
                    "payment_status": "paid",
                    "status": "complete",
                    "amount_total": 2900,
                    "currency": "usd"
                }
            }
        })
        .to_string();
        let signature = sign_payload(
            WEBHOOK_SECRET,
            Timestamp::now().as_unix_secs(),
            payload.as_bytes(),
        );
        Request::builder()
            .method(Method::POST)
            .uri("/api/webhook/stripe")
            .header("Stripe-Signature", signature)
            .body(Body::from(payload))
            .unwrap()
    }

    #[tokio::test]
    async fn duplicate_signup_is_a_bad_request() {
        let app = api_router(state());
        signup(&app, "a@x.com").await;

        let response = app
            .oneshot(json_request(
                Method::POST,
                "/api/auth/signup",
                None,
                Some(json!({"email": "a@x.com", "password": "longenough"})),
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(json_body(response).await["code"], "EMAIL_TAKEN");
    }

    #[tokio::test]
    async fn login_rejects_wrong_password_and_reports_pending_status() {
        let app = api_router(state());
        signup(&app, "a@x.com").await;

        let wrong = app
            .clone()
            .oneshot(json_request(
                Method::POST,
                "/api/auth/login",
                None,
                Some(json!({"email": "a@x.com", "password": "not-the-password"})),
            ))
            .await
            .unwrap();
        assert_eq!(wrong.status(), StatusCode::UNAUTHORIZED);

        let ok = app
            .oneshot(json_request(
                Method::POST,
                "/api/auth/login",
                None,
                Some(json!({"email": "a@x.com", "password": "longenough"})),
            ))
            .await
            .unwrap();
        assert_eq!(ok.status(), StatusCode::OK);
        let body = json_body(ok).await;
        assert_eq!(body["subscription_status"], "pending");
        assert_eq!(body["setup_completed"], false);
    }

    #[tokio::test]
    async fn protected_routes_reject_missing_and_garbage_tokens() {
        let app = api_router(state());

        let missing = app
            .clone()
            .oneshot(json_request(
                Method::POST,
                "/api/subscription/checkout",
                None,
                Some(json!({"package_id": "monthly", "origin_url": "https://app.test"})),
            ))
            .await
            .unwrap();
        assert_eq!(missing.status(), StatusCode::UNAUTHORIZED);

        let garbage = app
            .oneshot(json_request(
                Method::GET,
                "/api/expenses",
                Some("not-a-jwt"),
                None,
            ))
            .await
            .unwrap();
        assert_eq!(garbage.status(), StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn checkout_rejects_unknown_package() {
        let app = api_router(state());
        let token = signup(&app, "a@x.com").await;

        let response = app
            .oneshot(json_request(
                Method::POST,
                "/api/subscription/checkout",
                Some(&token),
                Some(json!({"package_id": "yearly", "origin_url": "https://app.test"})),
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(json_body(response).await["code"], "UNKNOWN_PACKAGE");
    }

    #[tokio::test]
    async fn setup_unlocks_only_after_the_webhook_confirms_payment() {
        let app = api_router(state());
        let token = signup(&app, "buyer@x.com").await;

        let checkout = app
            .clone()
            .oneshot(json_request(
                Method::POST,
                "/api/subscription/checkout",
                Some(&token),
                Some(json!({"package_id": "monthly", "origin_url": "https://app.test"})),
            ))
            .await
            .unwrap();
        assert_eq!(checkout.status(), StatusCode::OK);
        let session_id = json_body(checkout).await["session_id"]
            .as_str()
            .unwrap()
            .to_string();

        // Gated before payment.
        let forbidden = app
            .clone()
            .oneshot(json_request(
                Method::POST,
                "/api/user/setup",
                Some(&token),
                Some(json!({"cash_balance": 1000.0})),
            ))
            .await
            .unwrap();
        assert_eq!(forbidden.status(), StatusCode::FORBIDDEN);
        assert_eq!(json_body(forbidden).await["code"], "SUBSCRIPTION_REQUIRED");

        let webhook = app.clone().oneshot(paid_webhook(&session_id)).await.unwrap();
        assert_eq!(webhook.status(), StatusCode::OK);

        // The same token unlocks the gate: authorization reads live
        // store state, not the claims.
        let allowed = app
            .clone()
            .oneshot(json_request(
                Method::POST,
                "/api/user/setup",
                Some(&token),
                Some(json!({"cash_balance": 1000.0})),
            ))
            .await
            .unwrap();
        assert_eq!(allowed.status(), StatusCode::OK);

        let status = app
            .oneshot(json_request(
                Method::GET,
                &format!("/api/subscription/status/{}", session_id),
                Some(&token),
                None,
            ))
            .await
            .unwrap();
        assert_eq!(status.status(), StatusCode::OK);
        let body = json_body(status).await;
        assert_eq!(body["payment_status"], "paid");
        assert_eq!(body["amount_total"], 2900);
    }

    #[tokio::test]
    async fn webhook_with_bad_signature_is_rejected() {
        let app = api_router(state());

        let response = app
            .oneshot(
                Request::builder()
                    .method(Method::POST)
                    .uri("/api/webhook/stripe")
                    .header(
                        "Stripe-Signature",
                        format!("t={},v1={}", Timestamp::now().as_unix_secs(), "00".repeat(32)),
                    )
                    .body(Body::from("{}"))
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn ai_routes_report_missing_configuration_per_call() {
        let app = api_router(state());
        let token = signup(&app, "a@x.com").await;

        let response = app
            .oneshot(json_request(
                Method::POST,
                "/api/chat",
                Some(&token),
                Some(json!({"message": "how am I doing?"})),
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(json_body(response).await["code"], "AI_UNCONFIGURED");
    }
}
