pub mod gemini;
pub mod openai;

use async_trait::async_trait;
use manifold_core::ManifoldResult;

/// Trait for text-generation provider backends.
///
/// Each provider (Gemini, OpenAI, OpenRouter, etc.) implements this trait to
/// handle API communication. Implementations must be safe for concurrent use:
/// the worker pool shares one backend across all in-flight tasks.
///
/// To add a new provider:
/// 1. Create a new module in `backends/`
/// 2. Implement `GeneratorBackend` for your struct
/// 3. Add the variant to the `Provider` enum in `config.rs`
/// 4. Wire it up in `TextGenerator::new()` in `generator.rs`
#[async_trait]
pub trait GeneratorBackend: Send + Sync {
    /// Generate text for a single prompt with the given model identifier.
    async fn generate(&self, prompt: &str, model: &str) -> ManifoldResult<String>;
}
