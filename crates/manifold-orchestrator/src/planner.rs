use crate::prompts;
use manifold_core::{ManifoldError, ManifoldResult, Plan, Section};
use manifold_llm::TextGenerator;
use regex::Regex;
use serde::Deserialize;
use std::sync::Arc;
use tracing::{info, warn};

/// Wire shape of the planning response.
#[derive(Debug, Deserialize)]
struct PlanResponse {
    num_workers: i64,
    sections: Vec<Section>,
}

/// Decomposes a question into an ordered [`Plan`] via one generation call.
pub struct Planner {
    generator: Arc<TextGenerator>,
    model_override: Option<String>,
}

impl Planner {
    pub fn new(generator: Arc<TextGenerator>) -> Self {
        Self {
            generator,
            model_override: None,
        }
    }

    /// Route planning calls to a specific model instead of the configured default.
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model_override = Some(model.into());
        self
    }

    /// Produce a plan for the question.
    ///
    /// Issues exactly one generation call. Fails with
    /// [`ManifoldError::Planning`] when the response cannot be parsed into a
    /// valid plan; no dispatch happens on failure.
    pub async fn plan(&self, question: &str) -> ManifoldResult<Plan> {
        let prompt = prompts::planning_prompt(question);

        let response = match &self.model_override {
            Some(model) => self.generator.generate_with(&prompt, model).await?,
            None => self.generator.generate(&prompt).await?,
        };

        let plan = parse_plan(&response)?;
        info!(sections = plan.sections.len(), "Planner: plan accepted");
        Ok(plan)
    }
}

/// Parses a planning response into a validated [`Plan`].
///
/// The JSON is accepted either inside a fenced `json` code block or as the
/// whole trimmed response. The section list is ground truth: a declared
/// `num_workers` that disagrees with it is overridden with a warning.
pub fn parse_plan(response: &str) -> ManifoldResult<Plan> {
    let json = extract_json(response);

    let parsed: PlanResponse = serde_json::from_str(json)
        .map_err(|e| ManifoldError::Planning(format!("response is not valid plan JSON: {e}")))?;

    if parsed.num_workers < 1 {
        return Err(ManifoldError::Planning(format!(
            "declared worker count must be positive, got {}",
            parsed.num_workers
        )));
    }
    if parsed.sections.is_empty() {
        return Err(ManifoldError::Planning(
            "plan contains no sections".to_string(),
        ));
    }

    let declared = parsed.num_workers as usize;
    if declared != parsed.sections.len() {
        warn!(
            declared,
            sections = parsed.sections.len(),
            "Planner: worker count mismatch, using section count"
        );
    }

    Ok(Plan::from_sections(parsed.sections))
}

// Returns the body of a fenced json block if present, the trimmed response
// otherwise.
fn extract_json(response: &str) -> &str {
    fenced_json(response).unwrap_or_else(|| response.trim())
}

fn fenced_json(response: &str) -> Option<&str> {
    let re = Regex::new(r"(?s)```json\s*(\{.*?\})\s*```").ok()?;
    re.captures(response)
        .and_then(|c| c.get(1))
        .map(|m| m.as_str())
}
