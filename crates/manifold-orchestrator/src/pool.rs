use crate::prompts;
use manifold_core::{Section, WorkerResult};
use manifold_llm::TextGenerator;
use std::sync::Arc;
use tokio::sync::Semaphore;
use tokio::task::JoinSet;
use tracing::{error, info, warn};

/// Default cap on simultaneous in-flight generation calls.
pub const DEFAULT_MAX_CONCURRENT: usize = 8;

/// Dispatches one generation call per section across concurrent tasks.
///
/// Tasks are independent: each reads its assigned section and writes its own
/// result slot. The pool waits for every task to reach a terminal state
/// before returning, and result order follows section order, never
/// completion order. Dropping the dispatch future aborts all in-flight
/// tasks, so cancelling the caller cancels outstanding generation calls.
pub struct WorkerPool {
    generator: Arc<TextGenerator>,
    max_concurrent: usize,
}

impl WorkerPool {
    /// Create a pool over a shared generator with the default concurrency cap.
    pub fn new(generator: Arc<TextGenerator>) -> Self {
        Self {
            generator,
            max_concurrent: DEFAULT_MAX_CONCURRENT,
        }
    }

    /// Cap the number of simultaneous in-flight generation calls.
    pub fn with_max_concurrent(mut self, max: usize) -> Self {
        self.max_concurrent = max.max(1);
        self
    }

    /// Run one worker task per section and collect results in section order.
    ///
    /// A failed generation call marks only its own slot as an error; sibling
    /// tasks keep running. A panicked task likewise costs only its own slot.
    pub async fn dispatch(&self, sections: &[Section]) -> Vec<WorkerResult> {
        info!(
            sections = sections.len(),
            max_concurrent = self.max_concurrent,
            "WorkerPool: dispatching"
        );

        let semaphore = Arc::new(Semaphore::new(self.max_concurrent));
        let mut tasks: JoinSet<WorkerResult> = JoinSet::new();

        for (index, section) in sections.iter().enumerate() {
            let generator = Arc::clone(&self.generator);
            let semaphore = Arc::clone(&semaphore);
            let section = section.clone();

            tasks.spawn(async move {
                let _permit = match semaphore.acquire().await {
                    Ok(permit) => permit,
                    // The semaphore lives as long as the task set; closure
                    // only happens if dispatch is torn down.
                    Err(_) => {
                        return WorkerResult::error(
                            index,
                            section.title,
                            "worker pool shut down before dispatch",
                        )
                    }
                };

                let prompt =
                    prompts::worker_prompt(index + 1, &section.title, &section.instruction);

                match generator.generate(&prompt).await {
                    Ok(text) => WorkerResult::success(index, section.title, text),
                    Err(e) => {
                        warn!(section = index, error = %e, "Worker task failed");
                        WorkerResult::error(index, section.title, e.to_string())
                    }
                }
            });
        }

        // Full barrier: every task reaches a terminal state before results
        // are assembled, keyed by section slot rather than completion order.
        let mut slots: Vec<Option<WorkerResult>> = (0..sections.len()).map(|_| None).collect();
        while let Some(joined) = tasks.join_next().await {
            match joined {
                Ok(result) => {
                    let index = result.section_index;
                    slots[index] = Some(result);
                }
                Err(e) => {
                    error!(error = %e, "Worker task panicked or was aborted");
                }
            }
        }

        slots
            .into_iter()
            .enumerate()
            .map(|(index, slot)| {
                slot.unwrap_or_else(|| {
                    WorkerResult::error(
                        index,
                        sections[index].title.clone(),
                        "worker task did not complete",
                    )
                })
            })
            .collect()
    }
}
