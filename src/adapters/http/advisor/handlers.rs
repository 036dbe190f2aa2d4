//! HTTP handlers for the LLM advisor endpoints.
//!
//! Conversation memory lives in our store; the provider sees one system
//! prompt (built from the user's financial context) plus the current
//! message.

use axum::extract::{Json, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;

use crate::adapters::http::error::ApiError;
use crate::adapters::http::middleware::RequireAuth;
use crate::adapters::http::AppState;
use crate::domain::finance::{ChatExchange, Expense, Recommendation, UserSetup};
use crate::domain::foundation::Timestamp;

use super::dto::{ChatHistoryResponse, ChatRequest, ChatResponse, RecommendationsResponse};

/// Exchanges returned by the history endpoint.
const HISTORY_CAP: i64 = 20;

/// Expenses summarized into the model's context.
const CONTEXT_EXPENSES: i64 = 50;

fn financial_context(setup: &UserSetup, expenses: &[Expense]) -> String {
    let total: f64 = expenses.iter().map(|e| e.amount).sum();
    let recent: Vec<String> = expenses
        .iter()
        .take(10)
        .map(|e| format!("{} {} ${:.2} ({})", e.date, e.category, e.amount, e.payment_method))
        .collect();

    format!(
        "Cash balance: ${:.2}. Savings balance: ${:.2}. Bank accounts: {}. \
         Credit cards: {}. Recent expense total: ${:.2}. Recent expenses:\n{}",
        setup.cash_balance,
        setup.savings_balance,
        setup.bank_accounts.len(),
        setup.credit_cards.len(),
        total,
        recent.join("\n"),
    )
}

/// POST /api/chat
pub async fn chat(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
    Json(request): Json<ChatRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let provider = state.ai_provider()?;

    let setup = state.setups.find(user.id).await?.unwrap_or_default();
    let expenses = state
        .expenses
        .list_for_user(user.id, CONTEXT_EXPENSES)
        .await?;

    let system_prompt = format!(
        "You are a personal finance advisor. Be concise and practical. \
         The user's financial situation: {}",
        financial_context(&setup, &expenses)
    );
    let response = provider.complete(&system_prompt, &request.message).await?;

    state
        .advisor
        .save_exchange(&ChatExchange {
            user_id: user.id,
            message: request.message,
            response: response.clone(),
            created_at: Timestamp::now(),
        })
        .await?;

    Ok(Json(ChatResponse { response }))
}

/// GET /api/chat/history
pub async fn chat_history(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
) -> Result<impl IntoResponse, ApiError> {
    let exchanges = state.advisor.recent_exchanges(user.id, HISTORY_CAP).await?;

    Ok(Json(ChatHistoryResponse {
        messages: exchanges.into_iter().map(Into::into).collect(),
    }))
}

/// POST /api/recommendations
pub async fn generate_recommendations(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
) -> Result<impl IntoResponse, ApiError> {
    let provider = state.ai_provider()?;

    let setup = state.setups.find(user.id).await?.ok_or_else(|| {
        ApiError::new(
            StatusCode::BAD_REQUEST,
            "SETUP_REQUIRED",
            "Complete financial setup before requesting recommendations",
        )
    })?;
    let expenses = state
        .expenses
        .list_for_user(user.id, CONTEXT_EXPENSES)
        .await?;

    let system_prompt =
        "You are a personal finance advisor. Produce three specific, actionable \
         recommendations for the user's situation.";
    let recommendations = provider
        .complete(system_prompt, &financial_context(&setup, &expenses))
        .await?;

    state
        .advisor
        .save_recommendation(&Recommendation {
            user_id: user.id,
            recommendations: recommendations.clone(),
            created_at: Timestamp::now(),
        })
        .await?;

    Ok(Json(RecommendationsResponse { recommendations }))
}
