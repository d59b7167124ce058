//! Text-generation provider bindings for Manifold.

/// Provider backend implementations.
pub mod backends;
/// Provider and model configuration.
pub mod config;
/// Provider-agnostic generation facade.
pub mod generator;
/// Bounded retry with exponential backoff.
pub mod retry;

pub use backends::GeneratorBackend;
pub use config::{ModelConfig, Provider, DEFAULT_MODEL};
pub use generator::TextGenerator;
pub use retry::{is_retryable, RetryPolicy, RetryingBackend};
