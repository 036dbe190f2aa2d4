//! AI provider configuration

use secrecy::SecretString;
use serde::Deserialize;

/// AI provider configuration (OpenAI)
///
/// Optional like the payment keys: without a key the advisor endpoints
/// report a configuration error per call.
#[derive(Debug, Clone, Deserialize)]
pub struct AiConfig {
    /// OpenAI API key
    pub openai_api_key: Option<SecretString>,

    /// Model override
    #[serde(default = "default_model")]
    pub model: String,
}

impl AiConfig {
    pub fn is_configured(&self) -> bool {
        self.openai_api_key.is_some()
    }
}

impl Default for AiConfig {
    fn default() -> Self {
        Self {
            openai_api_key: None,
            model: default_model(),
        }
    }
}

fn default_model() -> String {
    "gpt-4o-mini".to_string()
}
