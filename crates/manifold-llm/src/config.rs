use crate::retry::RetryPolicy;
use serde::{Deserialize, Serialize};

/// Model id used when a config leaves `model_id` unset.
pub const DEFAULT_MODEL: &str = "gemini-2.5-flash";

/// Hosted text-generation providers.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Provider {
    /// Google Gemini `generateContent` API.
    Gemini,
    OpenAi,
    /// OpenRouter — OpenAI-compatible API fronting many upstream models.
    OpenRouter,
}

/// Configuration for one text-generation endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelConfig {
    pub provider: Provider,
    #[serde(default = "default_model_id")]
    pub model_id: String,
    pub api_key: String,
    pub api_base_url: Option<String>,
    /// Per-request timeout in seconds.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
    /// Opt-in bounded retry for transient provider errors.
    #[serde(default)]
    pub retry_policy: Option<RetryPolicy>,
}

fn default_model_id() -> String {
    DEFAULT_MODEL.to_string()
}

fn default_timeout_secs() -> u64 {
    120
}

impl ModelConfig {
    pub fn base_url(&self) -> &str {
        if let Some(url) = &self.api_base_url {
            url
        } else {
            match self.provider {
                Provider::Gemini => "https://generativelanguage.googleapis.com",
                Provider::OpenAi => "https://api.openai.com",
                Provider::OpenRouter => "https://openrouter.ai/api",
            }
        }
    }
}
