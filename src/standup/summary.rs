//! Prompt rendering and summary generation with backend fallback.

use std::fmt::Write;
use std::sync::Arc;

use super::{SummaryTask, TaskSummaryInput};
use crate::llm::TextGenerator;

pub const SYSTEM_INSTRUCTION: &str = "You write daily standup updates for a software engineer. \
Using the task lists provided, write a short update in the first person with a professional tone. \
Structure it in exactly three sections, each with a heading: \"Completed\" (what was finished since the last standup), \
\"Today's Focus\" (what is being worked on next, drawing on in-progress work first and then the most important todo items) \
and \"Blockers\" (anything that looks stuck or risky; say \"None\" if nothing stands out). \
Synthesize related tasks into a few clear sentences or bullets instead of listing every task, \
and do not invent work that is not in the lists.";

pub const SUMMARY_FAILURE_MESSAGE: &str =
    "Failed to generate a standup summary: no text generation backend responded. Please try again later.";

fn render_task(out: &mut String, task: &SummaryTask) {
    let _ = write!(out, "- {}", task.content.trim());
    let description = task.description.trim();
    if !description.is_empty() {
        let _ = write!(out, " ({})", description);
    }
    if !task.labels.is_empty() {
        let _ = write!(out, " [{}]", task.labels.join(", "));
    }
    out.push('\n');
}

fn render_block(out: &mut String, title: &str, tasks: &[SummaryTask]) {
    let _ = writeln!(out, "{}:", title);
    if tasks.is_empty() {
        out.push_str("- None\n");
    }
    for task in tasks {
        render_task(out, task);
    }
}

/// Render the user prompt body for the three buckets.
pub fn render_prompt(input: &TaskSummaryInput) -> String {
    let mut out = String::new();
    render_block(&mut out, "COMPLETED TASKS", &input.completed_tasks);
    out.push('\n');
    render_block(&mut out, "IN PROGRESS TASKS", &input.in_progress_tasks);
    out.push('\n');
    render_block(&mut out, "TODO TASKS", &input.priority_tasks);
    out
}

/// Writes the standup text, trying the primary backend and then the fallback.
pub struct SummaryGenerator {
    primary: Arc<dyn TextGenerator>,
    fallback: Arc<dyn TextGenerator>,
}

impl SummaryGenerator {
    pub fn new(primary: Arc<dyn TextGenerator>, fallback: Arc<dyn TextGenerator>) -> Self {
        Self { primary, fallback }
    }

    /// Never fails; returns [`SUMMARY_FAILURE_MESSAGE`] when both backends do.
    pub async fn generate(&self, input: &TaskSummaryInput) -> String {
        let prompt = render_prompt(input);

        for (attempt, backend) in [&self.primary, &self.fallback].into_iter().enumerate() {
            match backend.generate(Some(SYSTEM_INSTRUCTION), &prompt).await {
                Ok(text) => {
                    tracing::info!("Standup summary generated by {}", backend.name());
                    return text;
                }
                Err(e) if attempt == 0 => {
                    tracing::warn!(
                        "{} failed ({:?}): {}; falling back to {}",
                        backend.name(),
                        e.kind(),
                        e,
                        self.fallback.name()
                    );
                }
                Err(e) => {
                    tracing::error!("{} failed ({:?}): {}", backend.name(), e.kind(), e);
                }
            }
        }

        SUMMARY_FAILURE_MESSAGE.to_string()
    }
}
