use super::GeneratorBackend;
use crate::config::{ModelConfig, Provider};
use async_trait::async_trait;
use manifold_core::{ManifoldError, ManifoldResult};
use std::time::Duration;

/// OpenAI-compatible chat completions backend.
///
/// Works with OpenAI, OpenRouter, and any other provider that implements the
/// OpenAI chat completions API.
pub struct OpenAiBackend {
    config: ModelConfig,
    http: reqwest::Client,
}

impl OpenAiBackend {
    pub fn new(config: ModelConfig) -> Self {
        Self {
            config,
            http: reqwest::Client::new(),
        }
    }

    fn add_provider_headers(&self, request: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        let request = request
            .header("Authorization", format!("Bearer {}", self.config.api_key))
            .header("Content-Type", "application/json");

        // OpenRouter requires extra headers
        if matches!(self.config.provider, Provider::OpenRouter) {
            request
                .header("HTTP-Referer", "https://github.com/manifold-rs/manifold")
                .header("X-Title", "Manifold")
        } else {
            request
        }
    }
}

#[async_trait]
impl GeneratorBackend for OpenAiBackend {
    async fn generate(&self, prompt: &str, model: &str) -> ManifoldResult<String> {
        let url = format!("{}/v1/chat/completions", self.config.base_url());

        let body = serde_json::json!({
            "model": model,
            "messages": [{ "role": "user", "content": prompt }],
        });

        let request = self.add_provider_headers(self.http.post(&url));

        let resp = request
            .timeout(Duration::from_secs(self.config.timeout_secs))
            .json(&body)
            .send()
            .await
            .map_err(|e| ManifoldError::Generation(e.to_string()))?;

        let status = resp.status();
        if !status.is_success() {
            let error_body = resp
                .text()
                .await
                .unwrap_or_else(|_| "unknown error".to_string());
            return Err(ManifoldError::Generation(format!(
                "OpenAI API error {}: {}",
                status, error_body
            )));
        }

        let resp_body: serde_json::Value = resp
            .json()
            .await
            .map_err(|e| ManifoldError::Generation(e.to_string()))?;

        resp_body["choices"][0]["message"]["content"]
            .as_str()
            .map(ToString::to_string)
            .ok_or_else(|| {
                ManifoldError::Generation(format!(
                    "OpenAI response has no message content: {}",
                    resp_body
                ))
            })
    }
}
