//! Language-model provider port for the advisor features.

use async_trait::async_trait;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AiError {
    #[error("ai provider error: {0}")]
    Provider(String),

    #[error("ai provider returned an empty completion")]
    EmptyCompletion,
}

/// Chat-completion backend. One system prompt, one user message, one
/// text reply; conversation memory lives in our store, not the provider.
#[async_trait]
pub trait AiProvider: Send + Sync {
    async fn complete(&self, system_prompt: &str, user_message: &str) -> Result<String, AiError>;
}
