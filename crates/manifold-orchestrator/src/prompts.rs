//! Prompt templates for the planning and worker generation calls.

/// Builds the planning prompt: decompose `question` into non-overlapping,
/// logically ordered sections and return strict JSON.
pub fn planning_prompt(question: &str) -> String {
    format!(
        r#"You are a planning module for a parallel large language model system.

The system divides complex questions into smaller reasoning sections.
Each section is processed by a separate worker LLM in parallel.

Your task:
1. Read the user's question: "{question}"
2. Determine how many logical sections are required to answer it clearly and completely.
3. For each section, write:
   - A clear section title
   - A short instruction for that section
4. Decide the minimum number of worker nodes required (equal to the number of sections).
5. Ensure that sections are non-overlapping, logically ordered, and cover all key aspects.

Return your answer in strict JSON with this exact format:
{{
  "num_workers": <number_of_sections>,
  "sections": [
    {{
      "title": "Section 1 Title",
      "instruction": "Describe what this section should include."
    }},
    {{
      "title": "Section 2 Title",
      "instruction": "..."
    }}
  ]
}}"#
    )
}

/// Builds the worker prompt for one section.
///
/// `worker_number` is the 1-based position of the section in the plan; it is
/// display-only and carries no coordination meaning.
pub fn worker_prompt(worker_number: usize, title: &str, instruction: &str) -> String {
    format!(
        r#"You are a specialized worker node in a distributed large language model system.
You are worker node number {worker_number}.

You will be given one specific reasoning section to complete, based on the master plan of a larger question.

Follow these instructions carefully:
1. Focus only on the section assigned to you.
2. Do not repeat or summarize content from other sections.
3. Write a clear, detailed, and coherent explanation according to your assigned instruction.
4. Ensure your output can be directly merged with outputs from other worker nodes to form a complete, logically flowing answer.

Section:
{title}

Instructions:
{instruction}"#
    )
}
