use crate::backends::GeneratorBackend;
use async_trait::async_trait;
use manifold_core::{ManifoldError, ManifoldResult};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

/// Type alias for the injectable sleep function used in tests.
#[cfg(test)]
type SleepFn = Box<
    dyn Fn(u64) -> std::pin::Pin<Box<dyn std::future::Future<Output = ()> + Send>> + Send + Sync,
>;

/// Configures retry behaviour for transient generation errors.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RetryPolicy {
    /// Maximum number of retries after the initial attempt.
    pub max_retries: u32,
    /// Base delay in milliseconds for exponential backoff.
    pub backoff_base_ms: u64,
    /// Maximum delay in milliseconds (cap for exponential backoff).
    pub backoff_max_ms: u64,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_retries: 3,
            backoff_base_ms: 500,
            backoff_max_ms: 30_000,
        }
    }
}

/// Determines whether an error is transient and worth retrying.
///
/// Returns `true` for rate-limit (429), timeout, and server errors
/// (500, 502, 503, 504). Returns `false` for client errors such as 400
/// (bad request) and 401/403 (auth), which are not expected to succeed
/// on retry.
pub fn is_retryable(err: &ManifoldError) -> bool {
    let lower = err.to_string().to_lowercase();

    // Non-retryable patterns checked first
    if lower.contains("400") || lower.contains("401") || lower.contains("403") {
        return false;
    }

    lower.contains("429")
        || lower.contains("timeout")
        || lower.contains("500")
        || lower.contains("502")
        || lower.contains("503")
        || lower.contains("504")
}

/// Computes the backoff delay for a given attempt using exponential backoff
/// capped at `backoff_max_ms`.
fn compute_backoff(policy: &RetryPolicy, attempt: u32) -> u64 {
    let delay = policy
        .backoff_base_ms
        .saturating_mul(2u64.saturating_pow(attempt));
    delay.min(policy.backoff_max_ms)
}

/// A `GeneratorBackend` that wraps another backend and retries transient
/// failures with exponential backoff.
///
/// Non-retryable errors are returned immediately. When the retry budget is
/// exhausted, the last error is returned.
pub struct RetryingBackend {
    inner: Box<dyn GeneratorBackend>,
    policy: RetryPolicy,
    /// Injectable sleep function for testing (allows skipping real delays).
    #[cfg(test)]
    sleep_fn: Option<SleepFn>,
}

impl RetryingBackend {
    /// Wrap a backend with the given retry policy.
    pub fn new(inner: Box<dyn GeneratorBackend>, policy: RetryPolicy) -> Self {
        Self {
            inner,
            policy,
            #[cfg(test)]
            sleep_fn: None,
        }
    }

    async fn do_sleep(&self, ms: u64) {
        #[cfg(test)]
        if let Some(ref f) = self.sleep_fn {
            f(ms).await;
            return;
        }
        tokio::time::sleep(std::time::Duration::from_millis(ms)).await;
    }
}

#[async_trait]
impl GeneratorBackend for RetryingBackend {
    async fn generate(&self, prompt: &str, model: &str) -> ManifoldResult<String> {
        let mut last_err: Option<ManifoldError> = None;

        for attempt in 0..=self.policy.max_retries {
            match self.inner.generate(prompt, model).await {
                Ok(text) => return Ok(text),
                Err(e) => {
                    if !is_retryable(&e) {
                        warn!(attempt, error = %e, "Non-retryable generation error");
                        return Err(e);
                    }

                    if attempt < self.policy.max_retries {
                        let delay = compute_backoff(&self.policy, attempt);
                        info!(
                            attempt,
                            delay_ms = delay,
                            error = %e,
                            "Retryable generation error, backing off"
                        );
                        self.do_sleep(delay).await;
                    }
                    last_err = Some(e);
                }
            }
        }

        Err(last_err
            .unwrap_or_else(|| ManifoldError::Generation("retry budget exhausted".into())))
    }
}

// ─── Tests ───────────────────────────────────────────────────────────────────
