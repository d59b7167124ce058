use manifold_core::{ManifoldError, ManifoldResult, WorkerResult};

/// How the default merge handles failed worker results.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MergePolicy {
    /// Any failed section fails the whole merge. No partial answers.
    #[default]
    Strict,
    /// Failed sections are replaced by a placeholder and merging continues.
    Lenient,
}

/// Strategy seam for turning worker results into a final answer.
///
/// The default is [`Concatenate`]; richer strategies (summarization,
/// deduplication) plug in here without touching the engine.
pub trait MergeStrategy: Send + Sync {
    /// Merge the results of one dispatch into a single answer.
    fn merge(&self, results: &[WorkerResult]) -> ManifoldResult<String>;
}

/// Default strategy: section texts in plan order, joined by a single newline
/// with no trailing separator.
pub struct Concatenate {
    policy: MergePolicy,
}

impl Concatenate {
    pub fn new(policy: MergePolicy) -> Self {
        Self { policy }
    }
}

impl Default for Concatenate {
    fn default() -> Self {
        Self::new(MergePolicy::Strict)
    }
}

impl MergeStrategy for Concatenate {
    fn merge(&self, results: &[WorkerResult]) -> ManifoldResult<String> {
        let mut ordered: Vec<&WorkerResult> = results.iter().collect();
        ordered.sort_by_key(|r| r.section_index);

        let failed: Vec<&str> = ordered
            .iter()
            .filter(|r| r.is_error)
            .map(|r| r.title.as_str())
            .collect();

        if !failed.is_empty() && self.policy == MergePolicy::Strict {
            return Err(ManifoldError::Aggregation(format!(
                "{} of {} sections failed: {}",
                failed.len(),
                ordered.len(),
                failed.join(", ")
            )));
        }

        let merged = ordered
            .iter()
            .map(|r| {
                if r.is_error {
                    format!("[section '{}' failed: {}]", r.title, r.content)
                } else {
                    r.content.clone()
                }
            })
            .collect::<Vec<_>>()
            .join("\n");

        Ok(merged)
    }
}
