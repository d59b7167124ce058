//! Fan-out/fan-in orchestration for large-language-model calls.
//!
//! A question is decomposed by the [`Planner`] into an ordered set of
//! independent sections, each section is generated concurrently by the
//! [`WorkerPool`], and the outputs are merged back into a single answer in
//! planner-assigned order, regardless of completion order.
//!
//! # Main types
//!
//! - [`Orchestrator`] — Top-level engine composing plan → dispatch → merge.
//! - [`Planner`] — Turns a question into a validated [`manifold_core::Plan`].
//! - [`WorkerPool`] — Bounded concurrent dispatch, one task per section.
//! - [`MergeStrategy`] / [`Concatenate`] — Pluggable merge seam and its default.

/// Merge strategies for combining worker results.
pub mod aggregator;
/// The plan → dispatch → merge engine.
pub mod engine;
/// Question decomposition via one planning call.
pub mod planner;
/// Bounded concurrent worker dispatch.
pub mod pool;
/// Prompt templates for the planning and worker calls.
pub mod prompts;

pub use aggregator::{Concatenate, MergePolicy, MergeStrategy};
pub use engine::Orchestrator;
pub use planner::Planner;
pub use pool::WorkerPool;
