use crate::aggregator::{Concatenate, MergeStrategy};
use crate::planner::Planner;
use crate::pool::WorkerPool;
use manifold_core::ManifoldResult;
use manifold_llm::TextGenerator;
use std::sync::Arc;
use std::time::Instant;
use tracing::info;
use uuid::Uuid;

/// The fan-out/fan-in engine.
/// Composes plan → dispatch → merge for one end-to-end question.
pub struct Orchestrator {
    planner: Planner,
    pool: WorkerPool,
    merger: Box<dyn MergeStrategy>,
}

impl Orchestrator {
    /// Create an orchestrator over a shared generator with default settings:
    /// default pool cap and strict concatenating merge.
    pub fn new(generator: Arc<TextGenerator>) -> Self {
        Self {
            planner: Planner::new(Arc::clone(&generator)),
            pool: WorkerPool::new(generator),
            merger: Box::new(Concatenate::default()),
        }
    }

    /// Replace the planner (e.g. to route planning to a different model).
    pub fn with_planner(mut self, planner: Planner) -> Self {
        self.planner = planner;
        self
    }

    /// Replace the worker pool (e.g. to change the concurrency cap).
    pub fn with_pool(mut self, pool: WorkerPool) -> Self {
        self.pool = pool;
        self
    }

    /// Replace the merge strategy.
    pub fn with_merge_strategy(mut self, merger: Box<dyn MergeStrategy>) -> Self {
        self.merger = merger;
        self
    }

    /// Answer a question end to end.
    ///
    /// A planning failure short-circuits before any worker dispatch. Under
    /// the strict merge policy any failed section yields an error — a
    /// partial answer is never returned. Dropping the returned future
    /// cancels in-flight worker tasks.
    pub async fn answer(&self, question: &str) -> ManifoldResult<String> {
        let run_id = Uuid::new_v4();
        let start = Instant::now();

        info!(run_id = %run_id, question_len = question.len(), "Orchestrator: planning");
        let plan = self.planner.plan(question).await?;

        info!(
            run_id = %run_id,
            sections = plan.sections.len(),
            "Orchestrator: dispatching workers"
        );
        let results = self.pool.dispatch(&plan.sections).await;

        let answer = self.merger.merge(&results)?;

        info!(
            run_id = %run_id,
            duration_ms = start.elapsed().as_millis() as u64,
            "Orchestrator: run complete"
        );
        Ok(answer)
    }
}
