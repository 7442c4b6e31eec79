//! Standup summary pipeline.
//!
//! Tasks and sections are classified into workflow stages, completed events
//! from the activity log are folded in, and the resulting three buckets are
//! handed to a text generator.

pub mod activity;
pub mod assemble;
pub mod classify;
pub mod stage;
pub mod summary;

pub use activity::reconcile;
pub use assemble::SummaryAssembler;
pub use classify::{classify, sort_sections, SectionBucket};
pub use stage::{PositionalStages, Stage, StageMapping};
pub use summary::{render_prompt, SummaryGenerator, SUMMARY_FAILURE_MESSAGE, SYSTEM_INSTRUCTION};

use crate::todoist::Task;

/// One line item handed to the summarizer.
#[derive(Clone, Debug, PartialEq, Eq, Default)]
pub struct SummaryTask {
    pub content: String,
    pub description: String,
    pub labels: Vec<String>,
}

impl SummaryTask {
    pub fn new(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            ..Default::default()
        }
    }
}

impl From<&Task> for SummaryTask {
    fn from(task: &Task) -> Self {
        Self {
            content: task.content.clone(),
            description: task.description.clone(),
            labels: task.labels.clone(),
        }
    }
}

/// The three buckets the summary is written from.
#[derive(Clone, Debug, PartialEq, Eq, Default)]
pub struct TaskSummaryInput {
    pub completed_tasks: Vec<SummaryTask>,
    pub in_progress_tasks: Vec<SummaryTask>,
    pub priority_tasks: Vec<SummaryTask>,
}

impl TaskSummaryInput {
    pub fn is_empty(&self) -> bool {
        self.completed_tasks.is_empty() && self.in_progress_tasks.is_empty() && self.priority_tasks.is_empty()
    }
}
