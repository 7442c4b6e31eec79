//! Workflow stages and how sections map onto them.

use std::collections::HashMap;

use crate::todoist::Section;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Stage {
    Backlog,
    InProgress,
    ReviewOrDone,
}

impl std::fmt::Display for Stage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Stage::Backlog => write!(f, "backlog"),
            Stage::InProgress => write!(f, "in progress"),
            Stage::ReviewOrDone => write!(f, "review/done"),
        }
    }
}

/// Assigns stages to sections that are already sorted by order.
///
/// Sections absent from the returned map belong to no stage.
pub trait StageMapping: Send + Sync {
    fn assign(&self, sorted: &[Section]) -> HashMap<String, Stage>;
}

impl<F> StageMapping for F
where
    F: Fn(&[Section]) -> HashMap<String, Stage> + Send + Sync,
{
    fn assign(&self, sorted: &[Section]) -> HashMap<String, Stage> {
        self(sorted)
    }
}

/// First section is the backlog, second is in progress, and the last two are
/// review/done when they are not already one of the first two.
#[derive(Debug, Clone, Copy, Default)]
pub struct PositionalStages;

impl StageMapping for PositionalStages {
    fn assign(&self, sorted: &[Section]) -> HashMap<String, Stage> {
        let n = sorted.len();
        let mut stages = HashMap::new();

        for (position, section) in sorted.iter().enumerate() {
            let stage = match position {
                0 => Stage::Backlog,
                1 => Stage::InProgress,
                p if p + 2 >= n => Stage::ReviewOrDone,
                _ => continue,
            };
            stages.entry(section.id.clone()).or_insert(stage);
        }

        stages
    }
}
