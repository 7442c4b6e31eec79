use async_trait::async_trait;
use chrono::NaiveDate;
use std::sync::{Arc, Mutex};

use standup_cli::llm::{GenerationError, TextGenerator};
use standup_cli::standup::summary::{render_prompt, SUMMARY_FAILURE_MESSAGE, SYSTEM_INSTRUCTION};
use standup_cli::standup::{SummaryAssembler, SummaryGenerator, SummaryTask};
use standup_cli::todoist::provider::{ProviderError, Result as ProviderResult};
use standup_cli::todoist::{ActivityEvent, ActivityExtra, NewTask, Project, Section, Task, TaskProvider};
use standup_cli::Error;

#[derive(Default)]
struct FakeTodoist {
    tasks: Vec<Task>,
    sections: Vec<Section>,
    activity: Vec<ActivityEvent>,
}

#[async_trait]
impl TaskProvider for FakeTodoist {
    async fn list_tasks(&self, _: &str) -> ProviderResult<Vec<Task>> {
        Ok(self.tasks.clone())
    }

    async fn list_sections(&self, _: &str) -> ProviderResult<Vec<Section>> {
        Ok(self.sections.clone())
    }

    async fn list_activity(&self, _: &str, _: NaiveDate) -> ProviderResult<Vec<ActivityEvent>> {
        Ok(self.activity.clone())
    }

    async fn list_projects(&self) -> ProviderResult<Vec<Project>> {
        Ok(Vec::new())
    }

    async fn add_task(&self, _: &NewTask) -> ProviderResult<Task> {
        Err(ProviderError::MissingToken)
    }
}

/// Records every call and answers with a fixed outcome.
struct ScriptedBackend {
    name: &'static str,
    reply: Option<&'static str>,
    calls: Mutex<Vec<(Option<String>, String)>>,
}

impl ScriptedBackend {
    fn new(name: &'static str, reply: Option<&'static str>) -> Arc<Self> {
        Arc::new(Self {
            name,
            reply,
            calls: Mutex::new(Vec::new()),
        })
    }

    fn calls(&self) -> Vec<(Option<String>, String)> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl TextGenerator for ScriptedBackend {
    fn name(&self) -> &str {
        self.name
    }

    async fn generate(&self, system_instruction: Option<&str>, prompt: &str) -> Result<String, GenerationError> {
        self.calls
            .lock()
            .unwrap()
            .push((system_instruction.map(str::to_string), prompt.to_string()));
        match self.reply {
            Some(text) => Ok(text.to_string()),
            None => Err(GenerationError::ApiError {
                status: 503,
                body: "unavailable".to_string(),
            }),
        }
    }
}

fn board() -> Vec<Section> {
    vec![
        Section::new("s1", "Todo", 0),
        Section::new("s2", "Doing", 1),
        Section::new("s3", "Done", 2),
    ]
}

fn scenario_tasks() -> Vec<Task> {
    let mut shipped = Task::new("t2", "s3", "Ship v1");
    shipped.checked = true;
    vec![Task::new("t1", "s1", "Write spec"), shipped]
}

fn completed_event(object_id: &str, content: &str) -> ActivityEvent {
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

fn since() -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 4, 1).unwrap()
}

#[tokio::test]
async fn scenario_a_sections_only() {
    let fake = FakeTodoist {
        tasks: scenario_tasks(),
        sections: board(),
        ..Default::default()
    };

    let input = SummaryAssembler::new(Arc::new(fake)).assemble_since("p1", since()).await.unwrap();

    assert_eq!(input.priority_tasks, vec![SummaryTask::new("Write spec")]);
    assert!(input.in_progress_tasks.is_empty());
    assert_eq!(input.completed_tasks, vec![SummaryTask::new("Ship v1")]);
}

#[tokio::test]
async fn scenario_b_activity_adds_completed_work() {
    let fake = FakeTodoist {
        tasks: scenario_tasks(),
        sections: board(),
        activity: vec![completed_event("t9", "Fix bug")],
    };

    let input = SummaryAssembler::new(Arc::new(fake)).assemble_since("p1", since()).await.unwrap();

    assert!(input.completed_tasks.contains(&SummaryTask::new("Fix bug")));
    assert!(input.completed_tasks.contains(&SummaryTask::new("Ship v1")));
    assert_eq!(input.completed_tasks.len(), 2);
}

#[tokio::test]
async fn one_section_project_has_no_in_progress() {
    let fake = FakeTodoist {
        tasks: vec![Task::new("t1", "only", "Everything")],
        sections: vec![Section::new("only", "Inbox", 0)],
        activity: vec![completed_event("t8", "Closed yesterday")],
    };

    let input = SummaryAssembler::new(Arc::new(fake)).assemble_since("p1", since()).await.unwrap();

    assert!(input.in_progress_tasks.is_empty());
    assert_eq!(input.priority_tasks, vec![SummaryTask::new("Everything")]);
    assert_eq!(input.completed_tasks, vec![SummaryTask::new("Closed yesterday")]);
}

#[tokio::test]
async fn zero_section_project_is_a_configuration_error() {
    let fake = FakeTodoist {
        tasks: scenario_tasks(),
        ..Default::default()
    };

    let err = SummaryAssembler::new(Arc::new(fake)).assemble_since("p1", since()).await.unwrap_err();
    assert!(matches!(err, Error::Config(_)));
}

#[tokio::test]
async fn assembling_twice_gives_the_same_input() {
    let fake = Arc::new(FakeTodoist {
        tasks: scenario_tasks(),
        sections: board(),
        activity: vec![completed_event("t9", "Fix bug")],
    });
    let assembler = SummaryAssembler::new(fake);

    let first = assembler.assemble_since("p1", since()).await.unwrap();
    let second = assembler.assemble_since("p1", since()).await.unwrap();
    assert_eq!(first, second);
}

#[tokio::test]
async fn scenario_c_falls_back_with_identical_prompt() {
    let input = standup_cli::TaskSummaryInput {
        priority_tasks: vec![SummaryTask::new("Write spec")],
        completed_tasks: vec![SummaryTask::new("Ship v1")],
        ..Default::default()
    };
    let primary = ScriptedBackend::new("hosted", None);
    let local = ScriptedBackend::new("local", Some("Yesterday I shipped v1."));

    let generator = SummaryGenerator::new(primary.clone(), local.clone());
    let summary = generator.generate(&input).await;

    assert_eq!(summary, "Yesterday I shipped v1.");
    let (primary_calls, local_calls) = (primary.calls(), local.calls());
    assert_eq!(primary_calls.len(), 1);
    assert_eq!(local_calls.len(), 1);
    assert_eq!(primary_calls[0].1, render_prompt(&input));
    assert_eq!(local_calls[0].1, primary_calls[0].1);
    assert_eq!(local_calls[0].0.as_deref(), Some(SYSTEM_INSTRUCTION));
}

#[tokio::test]
async fn scenario_d_both_backends_fail() {
    let primary = ScriptedBackend::new("hosted", None);
    let local = ScriptedBackend::new("local", None);

    let generator = SummaryGenerator::new(primary.clone(), local.clone());
    let summary = generator.generate(&Default::default()).await;

    assert_eq!(summary, SUMMARY_FAILURE_MESSAGE);
    assert_eq!(primary.calls().len(), 1);
    assert_eq!(local.calls().len(), 1);
}

#[tokio::test]
async fn primary_success_skips_fallback() {
    let primary = ScriptedBackend::new("hosted", Some("  raw model text\n"));
    let local = ScriptedBackend::new("local", Some("unused"));

    let generator = SummaryGenerator::new(primary.clone(), local.clone());
    let summary = generator.generate(&Default::default()).await;

    assert_eq!(summary, "  raw model text\n");
    assert!(local.calls().is_empty());
}
