//! JSON request/response types for the advisor endpoints.

use serde::{Deserialize, Serialize};

use crate::domain::finance::ChatExchange;

#[derive(Debug, Clone, Deserialize)]
pub struct ChatRequest {
    pub message: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct ChatResponse {
    pub response: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct ChatHistoryResponse {
    pub messages: Vec<ChatExchangeResponse>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ChatExchangeResponse {
    pub message: String,
    pub response: String,
    pub created_at: String,
}

impl From<ChatExchange> for ChatExchangeResponse {
    fn from(exchange: ChatExchange) -> Self {
        Self {
            message: exchange.message,
            response: exchange.response,
            created_at: exchange.created_at.to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct RecommendationsResponse {
    pub recommendations: String,
}
