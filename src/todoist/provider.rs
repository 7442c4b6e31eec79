//! Task provider trait for the tracking service.

use async_trait::async_trait;
use chrono::NaiveDate;
use thiserror::Error;

use super::types::{ActivityEvent, NewTask, Project, Section, Task};

#[derive(Error, Debug)]
pub enum ProviderError {
    #[error("Todoist token not configured")]
    MissingToken,

    #[error("HTTP error: {0}")]
    HttpError(#[from] reqwest::Error),

    #[error("API error: HTTP {status}: {body}")]
    ApiError { status: u16, body: String },

    #[error("Parse error: {0}")]
    ParseError(String),
}

pub type Result<T> = std::result::Result<T, ProviderError>;

/// Read and write access to one user's task-tracking account.
#[async_trait]
pub trait TaskProvider: Send + Sync {
    /// All open tasks in a project.
    async fn list_tasks(&self, project_id: &str) -> Result<Vec<Task>>;

    /// Sections of a project, in whatever order the service returns them.
    async fn list_sections(&self, project_id: &str) -> Result<Vec<Section>>;

    /// Activity events for a project since the start of `since`.
    async fn list_activity(&self, project_id: &str, since: NaiveDate) -> Result<Vec<ActivityEvent>>;

    async fn list_projects(&self) -> Result<Vec<Project>>;

    async fn add_task(&self, task: &NewTask) -> Result<Task>;
}
