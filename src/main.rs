//! Finsight server binary.
//!
//! Loads configuration, wires adapters to ports, runs migrations and
//! serves the API. The Stripe and OpenAI integrations are optional: a
//! deployment without their keys boots normally and reports a
//! configuration error on the affected calls only.

use std::sync::Arc;

use secrecy::ExposeSecret;
use sqlx::postgres::PgPoolOptions;
use axum::http::HeaderValue;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use finsight::adapters::ai::{OpenAiConfig, OpenAiProvider};
use finsight::adapters::http::{api_router, AppState};
use finsight::adapters::postgres::{
    PostgresAdvisorRepository, PostgresExpenseRepository, PostgresSetupRepository,
    PostgresTransactionRepository, PostgresUserRepository,
};
use finsight::adapters::stripe::{StripeCheckoutClient, StripeConfig};
use finsight::config::AppConfig;
use finsight::domain::auth::TokenService;
use finsight::domain::payment::{PriceTable, WebhookVerifier};
use finsight::ports::{AiProvider, CheckoutProvider};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = AppConfig::load()?;
    config.validate()?;

    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(&config.server.log_level)
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let pool = PgPoolOptions::new()
        .min_connections(config.database.min_connections)
        .max_connections(config.database.max_connections)
        .acquire_timeout(config.database.acquire_timeout())
        .connect(&config.database.url)
        .await?;

    if config.database.run_migrations {
        tracing::info!("running database migrations");
        sqlx::migrate!("./migrations").run(&pool).await?;
    }

    let tokens = Arc::new(TokenService::new(&config.auth.jwt_secret));

    let checkout_provider: Option<Arc<dyn CheckoutProvider>> = config
        .payment
        .stripe_api_key
        .clone()
        .map(|key| {
            Arc::new(StripeCheckoutClient::new(StripeConfig::new(key)))
                as Arc<dyn CheckoutProvider>
        });
    if checkout_provider.is_none() {
        tracing::warn!("no Stripe API key configured; checkout is disabled");
    }

    let webhook_verifier = config
        .payment
        .stripe_webhook_secret
        .as_ref()
        .map(|secret| WebhookVerifier::new(secret.expose_secret()));

    let ai: Option<Arc<dyn AiProvider>> = match config.ai.openai_api_key.clone() {
        Some(key) => {
            let provider = OpenAiProvider::new(
                OpenAiConfig::new(key).with_model(config.ai.model.clone()),
            )
            .map_err(|e| anyhow::anyhow!("{}", e))?;
            Some(Arc::new(provider))
        }
        None => {
            tracing::warn!("no OpenAI API key configured; advisor features are disabled");
            None
        }
    };

    let state = AppState {
        users: Arc::new(PostgresUserRepository::new(pool.clone())),
        transactions: Arc::new(PostgresTransactionRepository::new(pool.clone())),
        setups: Arc::new(PostgresSetupRepository::new(pool.clone())),
        expenses: Arc::new(PostgresExpenseRepository::new(pool.clone())),
        advisor: Arc::new(PostgresAdvisorRepository::new(pool)),
        tokens,
        checkout_provider,
        webhook_verifier,
        ai,
        prices: PriceTable::standard(),
        public_url: config.server.public_url.clone(),
    };

    let cors = {
        let origins = config.server.cors_origins_list();
        if origins.is_empty() {
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any)
        } else {
            let parsed: Vec<HeaderValue> = origins
                .iter()
                .filter_map(|o| o.parse().ok())
                .collect();
            CorsLayer::new()
                .allow_origin(AllowOrigin::list(parsed))
                .allow_methods(Any)
                .allow_headers(Any)
        }
    };

    let app = api_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(cors);

    let addr = config.server.socket_addr()?;
    tracing::info!(%addr, "listening");
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
