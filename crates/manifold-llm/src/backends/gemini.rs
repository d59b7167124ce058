use super::GeneratorBackend;
use crate::config::ModelConfig;
use async_trait::async_trait;
use manifold_core::{ManifoldError, ManifoldResult};
use std::time::Duration;

/// Google Gemini `generateContent` backend.
pub struct GeminiBackend {
    config: ModelConfig,
    http: reqwest::Client,
}

impl GeminiBackend {
    pub fn new(config: ModelConfig) -> Self {
        Self {
            config,
            http: reqwest::Client::new(),
        }
    }
}

#[async_trait]
impl GeneratorBackend for GeminiBackend {
    async fn generate(&self, prompt: &str, model: &str) -> ManifoldResult<String> {
        let url = format!(
            "{}/v1beta/models/{}:generateContent",
            self.config.base_url(),
            model
        );

        let body = serde_json::json!({
            "contents": [{
                "parts": [{ "text": prompt }]
            }]
        });

        let resp = self
            .http
            .post(&url)
            .header("x-goog-api-key", &self.config.api_key)
            .header("content-type", "application/json")
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
                "Gemini API error {}: {}",
                status, error_body
            )));
        }

        let resp_body: serde_json::Value = resp
            .json()
            .await
            .map_err(|e| ManifoldError::Generation(e.to_string()))?;

        parse_gemini_response(&resp_body)
    }
}

/// Extracts the first candidate's concatenated text parts from a
/// `generateContent` response body.
pub fn parse_gemini_response(body: &serde_json::Value) -> ManifoldResult<String> {
    let parts = body["candidates"][0]["content"]["parts"]
        .as_array()
        .ok_or_else(|| {
            ManifoldError::Generation(format!("Gemini response has no candidate parts: {}", body))
        })?;

    let text: String = parts
        .iter()
        .filter_map(|p| p["text"].as_str())
        .collect();

    if text.is_empty() {
        return Err(ManifoldError::Generation(
            "Gemini response contained no text".to_string(),
        ));
    }

    Ok(text)
}
