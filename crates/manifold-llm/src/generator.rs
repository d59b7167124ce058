use crate::backends::gemini::GeminiBackend;
use crate::backends::openai::OpenAiBackend;
use crate::backends::GeneratorBackend;
use crate::config::{ModelConfig, Provider};
use crate::retry::RetryingBackend;
use manifold_core::ManifoldResult;

/// Text-generation client that dispatches to the correct provider backend.
///
/// Uses the `GeneratorBackend` trait to abstract away provider-specific API
/// differences. A single `TextGenerator` is safe to share (behind `Arc`)
/// across concurrent worker tasks. To add a new provider: implement
/// `GeneratorBackend` in `backends/` and wire it here.
pub struct TextGenerator {
    backend: Box<dyn GeneratorBackend>,
    default_model: String,
}

impl TextGenerator {
    pub fn new(config: ModelConfig) -> Self {
        let default_model = config.model_id.clone();
        let retry_policy = config.retry_policy.clone();

        let backend: Box<dyn GeneratorBackend> = match config.provider {
            Provider::Gemini => Box::new(GeminiBackend::new(config)),
            Provider::OpenAi | Provider::OpenRouter => Box::new(OpenAiBackend::new(config)),
        };

        // Retry is opt-in: without a policy the backend is used as-is.
        let backend: Box<dyn GeneratorBackend> = match retry_policy {
            Some(policy) => Box::new(RetryingBackend::new(backend, policy)),
            None => backend,
        };

        Self {
            backend,
            default_model,
        }
    }

    /// Create from a pre-built backend (for custom/external providers).
    pub fn from_backend(
        backend: Box<dyn GeneratorBackend>,
        default_model: impl Into<String>,
    ) -> Self {
        Self {
            backend,
            default_model: default_model.into(),
        }
    }

    /// Generate text for a prompt using the configured default model.
    pub async fn generate(&self, prompt: &str) -> ManifoldResult<String> {
        self.backend.generate(prompt, &self.default_model).await
    }

    /// Generate text with a per-call model override.
    pub async fn generate_with(&self, prompt: &str, model: &str) -> ManifoldResult<String> {
        self.backend.generate(prompt, model).await
    }

    /// The model id used when no per-call override is given.
    pub fn default_model(&self) -> &str {
        &self.default_model
    }
}
