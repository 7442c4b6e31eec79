//! Completed-task extraction from the activity log.

use super::SummaryTask;
use crate::todoist::ActivityEvent;

fn is_completed_item(event: &ActivityEvent) -> bool {
    event.event_type == "completed" && event.object_type == "item"
}

/// Normalize completed item events into summary tasks.
pub fn reconcile(events: &[ActivityEvent]) -> Vec<SummaryTask> {
    events
        .iter()
        .filter(|e| is_completed_item(e))
        .map(|event| {
            let extra = event.extra.clone().unwrap_or_default();
            SummaryTask {
                content: extra
                    .content
                    .filter(|c| !c.trim().is_empty())
                    .unwrap_or_else(|| format!("Task {}", event.object_id)),
                description: extra.description.unwrap_or_default(),
                labels: extra.labels.unwrap_or_default(),
            }
        })
        .collect()
}
