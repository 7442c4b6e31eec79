//! Builds the three summary buckets from live task data.

use chrono::{Days, Local, NaiveDate};
use std::sync::Arc;

use super::activity::reconcile;
use super::classify::{classify, sort_sections};
use super::stage::{PositionalStages, Stage, StageMapping};
use super::{SummaryTask, TaskSummaryInput};
use crate::error::{Error, Result};
use crate::todoist::TaskProvider;

pub const DEFAULT_ACTIVITY_WINDOW_DAYS: i64 = 1;

pub struct SummaryAssembler {
    provider: Arc<dyn TaskProvider>,
    stages: Box<dyn StageMapping>,
    window_days: i64,
}

/// First calendar day of the activity window; time of day is discarded.
///
/// `None` when the window reaches past the earliest representable date.
pub fn activity_since(today: NaiveDate, window_days: i64) -> Option<NaiveDate> {
    today.checked_sub_days(Days::new(window_days.max(0).unsigned_abs()))
}

impl SummaryAssembler {
    pub fn new(provider: Arc<dyn TaskProvider>) -> Self {
        Self {
            provider,
            stages: Box::new(PositionalStages),
            window_days: DEFAULT_ACTIVITY_WINDOW_DAYS,
        }
    }

    pub fn with_stage_mapping(mut self, stages: impl StageMapping + 'static) -> Self {
        self.stages = Box::new(stages);
        self
    }

    pub fn with_window_days(mut self, days: i64) -> Self {
        self.window_days = days;
        self
    }

    /// Assemble using an activity window that ends today.
    pub async fn assemble(&self, project_id: &str) -> Result<TaskSummaryInput> {
        let since = activity_since(Local::now().date_naive(), self.window_days).ok_or_else(|| {
            Error::Config(format!("activity window of {} days is out of range", self.window_days))
        })?;
        self.assemble_since(project_id, since).await
    }

    /// Assemble with an explicit start date for the activity window.
    pub async fn assemble_since(&self, project_id: &str, since: NaiveDate) -> Result<TaskSummaryInput> {
        if project_id.trim().is_empty() {
            return Err(Error::needs_setup("No default project configured"));
        }

        let (tasks, sections, activity) = tokio::join!(
            self.provider.list_tasks(project_id),
            self.provider.list_sections(project_id),
            self.provider.list_activity(project_id, since),
        );

        let tasks = tasks?;
        let sections = sections?;
        tracing::info!("Found {} tasks in {} sections of project {}", tasks.len(), sections.len(), project_id);

        if sections.is_empty() {
            return Err(Error::needs_setup("No sections found in the project"));
        }

        let completed_from_activity = match activity {
            Ok(events) => {
                let completed = reconcile(&events);
                tracing::info!("Found {} tasks completed since {}", completed.len(), since);
                completed
            }
            Err(e) => {
                tracing::warn!("Could not fetch activity data, continuing with tasks from sections only: {}", e);
                Vec::new()
            }
        };

        let sorted = sort_sections(&sections);
        let stages = self.stages.assign(&sorted);
        for section in &sorted {
            if let Some(stage) = stages.get(&section.id) {
                tracing::debug!("Section '{}' treated as {}", section.name, stage);
            }
        }
        let buckets = classify(&tasks, &sections);

        let mut input = TaskSummaryInput {
            completed_tasks: completed_from_activity,
            ..Default::default()
        };

        // Done before review: walk the board from the right.
        for bucket in buckets.iter().rev() {
            if stages.get(&bucket.section.id) == Some(&Stage::ReviewOrDone) {
                input.completed_tasks.extend(bucket.tasks.iter().map(SummaryTask::from));
            }
        }

        for bucket in &buckets {
            let target = match stages.get(&bucket.section.id) {
                Some(Stage::Backlog) => &mut input.priority_tasks,
                Some(Stage::InProgress) => &mut input.in_progress_tasks,
                _ => continue,
            };
            target.extend(bucket.tasks.iter().map(SummaryTask::from));
        }

        Ok(input)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::todoist::provider::{ProviderError, Result as ProviderResult};
    use crate::todoist::{ActivityEvent, ActivityExtra, NewTask, Project, Section, Task};
    use async_trait::async_trait;
    use std::collections::HashMap;

    #[derive(Default)]
    struct FakeTodoist {
        tasks: Vec<Task>,
        sections: Vec<Section>,
        activity: Vec<ActivityEvent>,
        activity_fails: bool,
        tasks_fail: bool,
    }

    #[async_trait]
    impl TaskProvider for FakeTodoist {
        async fn list_tasks(&self, _project_id: &str) -> ProviderResult<Vec<Task>> {
            if self.tasks_fail {
                return Err(ProviderError::ApiError { status: 500, body: "boom".to_string() });
            }
            Ok(self.tasks.clone())
        }

        async fn list_sections(&self, _project_id: &str) -> ProviderResult<Vec<Section>> {
            Ok(self.sections.clone())
        }

        async fn list_activity(&self, _project_id: &str, _since: NaiveDate) -> ProviderResult<Vec<ActivityEvent>> {
            if self.activity_fails {
                return Err(ProviderError::ParseError("bad json".to_string()));
            }
            Ok(self.activity.clone())
        }

        async fn list_projects(&self) -> ProviderResult<Vec<Project>> {
            Ok(Vec::new())
        }

        async fn add_task(&self, _task: &NewTask) -> ProviderResult<Task> {
            Err(ProviderError::MissingToken)
        }
    }

    fn completed(object_id: &str, content: &str) -> ActivityEvent {
        ActivityEvent {
            object_id: object_id.to_string(),
            object_type: "item".to_string(),
            event_type: "completed".to_string(),
            extra: Some(ActivityExtra {
                content: Some(content.to_string()),
                ..Default::default()
            }),
            ..Default::default()
        }
    }

    fn contents(tasks: &[SummaryTask]) -> Vec<&str> {
        tasks.iter().map(|t| t.content.as_str()).collect()
    }

    fn since() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 4, 1).unwrap()
    }

    fn assembler(fake: FakeTodoist) -> SummaryAssembler {
        crate::logging::init_test();
        SummaryAssembler::new(Arc::new(fake))
    }

    #[test]
    fn window_is_a_calendar_date() {
        let today = NaiveDate::from_ymd_opt(2025, 3, 1).unwrap();
        assert_eq!(activity_since(today, 1), NaiveDate::from_ymd_opt(2025, 2, 28));
        assert_eq!(activity_since(today, -3), Some(today));
    }

    #[test]
    fn huge_window_is_out_of_range() {
        let today = NaiveDate::from_ymd_opt(2026, 10, 16).unwrap();
        assert_eq!(activity_since(today, 100_000_000), None);
        assert_eq!(activity_since(today, i64::MAX), None);
    }

    #[tokio::test]
    async fn huge_window_is_a_configuration_error() {
        let fake = FakeTodoist {
            sections: vec![Section::new("s1", "Todo", 0)],
            ..Default::default()
        };

        let err = assembler(fake).with_window_days(i64::MAX).assemble("p1").await.unwrap_err();
        assert!(matches!(err, Error::Config(ref m) if m.contains("out of range")));
    }

    #[tokio::test]
    async fn four_sections_fill_every_bucket() {
        let fake = FakeTodoist {
            sections: vec![
                Section::new("done", "Done", 4),
                Section::new("review", "Review", 3),
                Section::new("todo", "Todo", 1),
                Section::new("doing", "Doing", 2),
            ],
            tasks: vec![
                Task::new("t1", "todo", "Plan"),
                Task::new("t2", "doing", "Build"),
                Task::new("t3", "review", "Check"),
                Task::new("t4", "done", "Ship"),
            ],
            activity: vec![completed("t0", "Yesterday's fix")],
            ..Default::default()
        };

        let input = assembler(fake).assemble_since("p1", since()).await.unwrap();
        assert_eq!(contents(&input.priority_tasks), vec!["Plan"]);
        assert_eq!(contents(&input.in_progress_tasks), vec!["Build"]);
        assert_eq!(contents(&input.completed_tasks), vec!["Yesterday's fix", "Ship", "Check"]);
    }

    #[tokio::test]
    async fn activity_failure_degrades_to_sections_only() {
        let fake = FakeTodoist {
            sections: vec![
                Section::new("s1", "Todo", 0),
                Section::new("s2", "Doing", 1),
                Section::new("s3", "Done", 2),
            ],
            tasks: vec![Task::new("t1", "s3", "Ship v1")],
            activity_fails: true,
            ..Default::default()
        };

        let input = assembler(fake).assemble_since("p1", since()).await.unwrap();
        assert_eq!(contents(&input.completed_tasks), vec!["Ship v1"]);
    }

    #[tokio::test]
    async fn task_fetch_failure_propagates() {
        let fake = FakeTodoist {
            sections: vec![Section::new("s1", "Todo", 0)],
            tasks_fail: true,
            ..Default::default()
        };

        let err = assembler(fake).assemble_since("p1", since()).await.unwrap_err();
        assert!(matches!(err, Error::Provider(ProviderError::ApiError { status: 500, .. })));
    }

    #[tokio::test]
    async fn blank_project_is_refused() {
        let err = assembler(FakeTodoist::default()).assemble_since(" ", since()).await.unwrap_err();
        assert!(matches!(err, Error::Config(_)));
    }

    #[tokio::test]
    async fn two_sections_complete_only_from_activity() {
        let fake = FakeTodoist {
            sections: vec![Section::new("a", "Todo", 0), Section::new("b", "Doing", 1)],
            tasks: vec![Task::new("t1", "a", "Plan"), Task::new("t2", "b", "Build")],
            activity: vec![completed("t9", "Fix bug")],
            ..Default::default()
        };

        let input = assembler(fake).assemble_since("p1", since()).await.unwrap();
        assert_eq!(contents(&input.priority_tasks), vec!["Plan"]);
        assert_eq!(contents(&input.in_progress_tasks), vec!["Build"]);
        assert_eq!(contents(&input.completed_tasks), vec!["Fix bug"]);
    }

    #[tokio::test]
    async fn custom_stage_mapping_is_honored() {
        let fake = FakeTodoist {
            sections: vec![Section::new("a", "Inbox", 0), Section::new("b", "Shipped", 1)],
            tasks: vec![Task::new("t1", "a", "Triage"), Task::new("t2", "b", "Release")],
            ..Default::default()
        };
        let mapping = |sorted: &[Section]| -> HashMap<String, Stage> {
            sorted
                .iter()
                .map(|s| {
                    let stage = if s.name == "Shipped" { Stage::ReviewOrDone } else { Stage::Backlog };
                    (s.id.clone(), stage)
                })
                .collect()
        };

        let input = assembler(fake)
            .with_stage_mapping(mapping)
            .assemble_since("p1", since())
            .await
            .unwrap();
        assert_eq!(contents(&input.priority_tasks), vec!["Triage"]);
        assert!(input.in_progress_tasks.is_empty());
        assert_eq!(contents(&input.completed_tasks), vec!["Release"]);
    }
}
