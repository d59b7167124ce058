//! Core types and error definitions for the Manifold workspace.
//!
//! This crate provides the foundational types shared across all Manifold
//! crates: the unified error enum, the plan model produced by the planning
//! stage, and the per-section result type the worker pool hands to the
//! merge stage.
//!
//! # Main types
//!
//! - [`ManifoldError`] — Unified error enum for all Manifold subsystems.
//! - [`ManifoldResult`] — Convenience alias for `Result<T, ManifoldError>`.
//! - [`Section`] — One planner-assigned sub-task of a question.
//! - [`Plan`] — The planner's ordered decomposition of a question.
//! - [`WorkerResult`] — The outcome of one worker task, tied to its section slot.

use serde::{Deserialize, Serialize};

// --- Error types ---

/// Top-level error type for the Manifold workspace.
///
/// Each variant corresponds to a pipeline stage that can produce errors.
/// Per-worker failures are not represented here: they are data, carried in
/// [`WorkerResult`], so a single failed section never aborts its siblings.
#[derive(Debug, thiserror::Error)]
pub enum ManifoldError {
    /// An outbound generation call failed (network, auth, rate limit, timeout).
    #[error("Generation error: {0}")]
    Generation(String),

    /// The planning response could not be turned into a valid plan.
    #[error("Planning error: {0}")]
    Planning(String),

    /// One or more sections failed under a merge policy that requires
    /// whole-run failure. The message names the failed sections.
    #[error("Aggregation error: {0}")]
    Aggregation(String),

    /// An error in configuration parsing or validation.
    #[error("Config error: {0}")]
    Config(String),

    /// A JSON serialization or deserialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// A standard I/O error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// A convenience `Result` alias using [`ManifoldError`].
pub type ManifoldResult<T> = Result<T, ManifoldError>;

// --- Plan types ---

/// One planner-assigned sub-task of the original question.
///
/// Sections are immutable once produced and owned by their [`Plan`]; the
/// worker pool borrows them for dispatch.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Section {
    /// Short heading for the section; position in the plan encodes answer order.
    pub title: String,
    /// What the worker handling this section should produce.
    pub instruction: String,
}

impl Section {
    /// Creates a new section.
    pub fn new(title: impl Into<String>, instruction: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            instruction: instruction.into(),
        }
    }
}

/// The planner's decomposition of a question: an ordered section list plus
/// the worker count.
///
/// Invariant: `worker_count == sections.len()`. [`Plan::from_sections`] is
/// the only constructor, so the invariant holds by construction.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Plan {
    /// Number of worker tasks the plan calls for. Always equals the section count.
    pub worker_count: usize,
    /// The ordered sections; position encodes intended answer order.
    pub sections: Vec<Section>,
}

impl Plan {
    /// Builds a plan from a section list, deriving the worker count from it.
    pub fn from_sections(sections: Vec<Section>) -> Self {
        Self {
            worker_count: sections.len(),
            sections,
        }
    }
}

// --- Worker result types ---

/// The outcome of one worker task, keyed to the section slot it filled.
///
/// On failure `content` carries the error description instead of generated
/// text. Exactly one result exists per dispatched section.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorkerResult {
    /// Zero-based position of the section this result belongs to.
    pub section_index: usize,
    /// Title of the section, carried for diagnostics.
    pub title: String,
    /// Generated text on success; an error description on failure.
    pub content: String,
    /// Whether the worker task ended in an error.
    pub is_error: bool,
}

impl WorkerResult {
    /// Creates a successful worker result.
    pub fn success(
        section_index: usize,
        title: impl Into<String>,
        content: impl Into<String>,
    ) -> Self {
        Self {
            section_index,
            title: title.into(),
            content: content.into(),
            is_error: false,
        }
    }

    /// Creates a failed worker result.
    pub fn error(
        section_index: usize,
        title: impl Into<String>,
        content: impl Into<String>,
    ) -> Self {
        Self {
            section_index,
            title: title.into(),
            content: content.into(),
            is_error: true,
        }
    }
}
