//! Regression tests for manifold-llm: ModelConfig, Provider, and the HTTP
//! backends against a mock server.

use manifold_llm::backends::gemini::GeminiBackend;
use manifold_llm::backends::openai::OpenAiBackend;
use manifold_llm::{GeneratorBackend, ModelConfig, Provider, RetryPolicy, TextGenerator};
use wiremock::matchers::{body_partial_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn test_config(provider: Provider, base: &str) -> ModelConfig {
    ModelConfig {
        provider,
        model_id: "test-model".to_string(),
        api_key: "test-key".to_string(),
        api_base_url: Some(base.to_string()),
        timeout_secs: 5,
        retry_policy: None,
    }
}

// --- ModelConfig & Provider ---

#[test]
fn test_provider_serialization() {
    let json = serde_json::to_string(&Provider::Gemini).unwrap();
    assert_eq!(json, "\"gemini\"");

    let deserialized: Provider = serde_json::from_str("\"openrouter\"").unwrap();
    assert!(matches!(deserialized, Provider::OpenRouter));
}

#[test]
fn test_model_config_deserialization_with_defaults() {
    let toml_str = r#"
        provider = "gemini"
        api_key = "test-key"
    "#;

    let config: ModelConfig = toml::from_str(toml_str).unwrap();
    assert!(matches!(config.provider, Provider::Gemini));
    assert_eq!(config.model_id, "gemini-2.5-flash"); // default
    assert_eq!(config.timeout_secs, 120); // default
    assert!(config.api_base_url.is_none());
    assert!(config.retry_policy.is_none());
}

#[test]
fn test_model_config_base_url_defaults() {
    let gemini = ModelConfig {
        api_base_url: None,
        ..test_config(Provider::Gemini, "unused")
    };
    assert_eq!(gemini.base_url(), "https://generativelanguage.googleapis.com");

    let openai = ModelConfig {
        api_base_url: None,
        ..test_config(Provider::OpenAi, "unused")
    };
    assert_eq!(openai.base_url(), "https://api.openai.com");

    let openrouter = ModelConfig {
        api_base_url: None,
        ..test_config(Provider::OpenRouter, "unused")
    };
    assert_eq!(openrouter.base_url(), "https://openrouter.ai/api");
}

#[test]
fn test_model_config_base_url_custom_override() {
    let config = test_config(Provider::Gemini, "http://localhost:8080");
    assert_eq!(config.base_url(), "http://localhost:8080");
}

// --- GeminiBackend ---

#[tokio::test]
async fn test_gemini_generate_returns_candidate_text() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v1beta/models/test-model:generateContent"))
        .and(header("x-goog-api-key", "test-key"))
        .and(body_partial_json(serde_json::json!({
            "contents": [{ "parts": [{ "text": "say hello" }] }]
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "candidates": [{
                "content": { "parts": [{ "text": "hello from gemini" }] }
            }]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let backend = GeminiBackend::new(test_config(Provider::Gemini, &server.uri()));
    let text = backend.generate("say hello", "test-model").await.unwrap();
    assert_eq!(text, "hello from gemini");
}

#[tokio::test]
async fn test_gemini_generate_surfaces_api_error() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(400).set_body_json(serde_json::json!({
            "error": { "code": 400, "message": "API key not valid" }
        })))
        .mount(&server)
        .await;

    let backend = GeminiBackend::new(test_config(Provider::Gemini, &server.uri()));
    let err = backend.generate("p", "test-model").await.unwrap_err();
    let msg = err.to_string();
    assert!(msg.contains("400"), "unexpected error: {msg}");
    assert!(msg.contains("API key not valid"), "unexpected error: {msg}");
}

#[tokio::test]
async fn test_gemini_generate_honors_model_override() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v1beta/models/other-model:generateContent"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "candidates": [{ "content": { "parts": [{ "text": "overridden" }] } }]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let generator = TextGenerator::new(test_config(Provider::Gemini, &server.uri()));
    let text = generator.generate_with("p", "other-model").await.unwrap();
    assert_eq!(text, "overridden");
}

// --- OpenAiBackend ---

#[tokio::test]
async fn test_openai_generate_returns_message_content() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v1/chat/completions"))
        .and(header("Authorization", "Bearer test-key"))
        .and(body_partial_json(serde_json::json!({
            "model": "test-model",
            "messages": [{ "role": "user", "content": "say hello" }]
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "choices": [{ "message": { "role": "assistant", "content": "hello from openai" } }]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let backend = OpenAiBackend::new(test_config(Provider::OpenAi, &server.uri()));
    let text = backend.generate("say hello", "test-model").await.unwrap();
    assert_eq!(text, "hello from openai");
}

#[tokio::test]
async fn test_openai_generate_rejects_malformed_response() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "choices": []
        })))
        .mount(&server)
        .await;

    let backend = OpenAiBackend::new(test_config(Provider::OpenAi, &server.uri()));
    let err = backend.generate("p", "test-model").await.unwrap_err();
    assert!(err.to_string().contains("no message content"));
}

// --- Retry through TextGenerator ---

#[tokio::test]
async fn test_retry_policy_recovers_from_transient_errors() {
    let server = MockServer::start().await;

    // Two transient failures, then success.
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(503).set_body_json(serde_json::json!({
            "error": { "code": 503, "message": "model overloaded" }
        })))
        .up_to_n_times(2)
        .mount(&server)
        .await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "candidates": [{ "content": { "parts": [{ "text": "recovered" }] } }]
        })))
        .mount(&server)
        .await;

    let mut config = test_config(Provider::Gemini, &server.uri());
    config.retry_policy = Some(RetryPolicy {
        max_retries: 3,
        backoff_base_ms: 1,
        backoff_max_ms: 5,
    });

    let generator = TextGenerator::new(config);
    let text = generator.generate("p").await.unwrap();
    assert_eq!(text, "recovered");
}

#[tokio::test]
async fn test_retry_policy_does_not_retry_client_errors() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(400).set_body_json(serde_json::json!({
            "error": { "code": 400, "message": "bad request" }
        })))
        .expect(1)
        .mount(&server)
        .await;

    let mut config = test_config(Provider::Gemini, &server.uri());
    config.retry_policy = Some(RetryPolicy {
        max_retries: 3,
        backoff_base_ms: 1,
        backoff_max_ms: 5,
    });

    let generator = TextGenerator::new(config);
    assert!(generator.generate("p").await.is_err());
}
